//! Share text for a finished roast, and its inverse.
//!
//! Layout with a name:
//!
//! ```text
//! 🔥 <name> 🔥
//! <linkedin url, optional>
//!
//! "<roast>"
//!
//! #RoastMyLinkedIn
//! ```
//!
//! Without a name the header is `Just got roasted by AI:` and no URL is shown.
//! `parse_share_text` inverts the layout and is only built for tests.

pub const SHARE_HASHTAG: &str = "#RoastMyLinkedIn";
const ANONYMOUS_HEADER: &str = "Just got roasted by AI:";
const NAME_MARK: &str = "🔥";

/// Fields recovered from a share text.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRoast {
    pub roast: String,
    pub name: Option<String>,
    pub linkedin_url: Option<String>,
}

pub fn format_share_text(roast: &str, name: Option<&str>, linkedin_url: Option<&str>) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => {
            let mut text = format!("{NAME_MARK} {name} {NAME_MARK}\n");
            if let Some(url) = linkedin_url.filter(|u| !u.is_empty()) {
                text.push_str(url);
                text.push('\n');
            }
            text.push_str(&format!("\n\"{roast}\"\n\n{SHARE_HASHTAG}"));
            text
        }
        None => format!("{ANONYMOUS_HEADER}\n\n\"{roast}\"\n\n{SHARE_HASHTAG}"),
    }
}

/// Recovers the roast (and name/URL when present) from `format_share_text` output.
/// Returns `None` for text that does not follow the layout.
#[cfg(test)]
pub fn parse_share_text(text: &str) -> Option<SharedRoast> {
    let trailer = format!("\"\n\n{SHARE_HASHTAG}");
    let body = text.strip_suffix(trailer.as_str())?;

    if let Some(roast) = body.strip_prefix(&format!("{ANONYMOUS_HEADER}\n\n\"")) {
        return Some(SharedRoast {
            roast: roast.to_string(),
            name: None,
            linkedin_url: None,
        });
    }

    let (header, rest) = body.split_once('\n')?;
    let name = header
        .strip_prefix(&format!("{NAME_MARK} "))?
        .strip_suffix(&format!(" {NAME_MARK}"))?;

    let (linkedin_url, roast) = match rest.strip_prefix("\n\"") {
        Some(roast) => (None, roast),
        None => {
            let (url, rest) = rest.split_once('\n')?;
            (Some(url.to_string()), rest.strip_prefix("\n\"")?)
        }
    };

    Some(SharedRoast {
        roast: roast.to_string(),
        name: Some(name.to_string()),
        linkedin_url,
    })
}
