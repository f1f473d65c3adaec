use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const MAX_EXPERIENCE: usize = 3;
pub const MAX_EDUCATION: usize = 2;
pub const MAX_SKILLS: usize = 5;

/// Normalized professional profile. Sequence caps are applied by every
/// constructor, including deserialization, so a record never holds more than
/// 3 experience, 2 education or 5 skill entries.
///
/// Deserialization goes through `from_extraction`, so a client-supplied
/// profile is read as leniently as a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "serde_json::Map<String, Value>")]
pub struct ProfileRecord {
    pub name: String,
    pub headline: String,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
}

impl From<serde_json::Map<String, Value>> for ProfileRecord {
    fn from(object: serde_json::Map<String, Value>) -> Self {
        ProfileRecord::from_extraction(&object)
    }
}

impl ProfileRecord {
    pub fn new(
        name: Option<String>,
        headline: Option<String>,
        about: Option<String>,
        linkedin_url: Option<String>,
        mut experience: Vec<String>,
        mut education: Vec<String>,
        mut skills: Vec<String>,
    ) -> Self {
        experience.truncate(MAX_EXPERIENCE);
        education.truncate(MAX_EDUCATION);
        skills.truncate(MAX_SKILLS);

        Self {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            headline: headline.unwrap_or_default(),
            about: about.unwrap_or_default(),
            linkedin_url,
            experience,
            education,
            skills,
        }
    }

    /// Builds a record from an untyped model reply object.
    ///
    /// Lenient by field: wrong-typed scalars count as missing, non-array
    /// sequences become empty, and non-string array items are dropped.
    pub fn from_extraction(object: &serde_json::Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);
        let list = |key: &str| -> Vec<String> {
            object
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(String::from))
                        .collect()
                })
                .unwrap_or_default()
        };

        ProfileRecord::new(
            text("name"),
            text("headline"),
            text("about"),
            text("linkedinUrl"),
            list("experience"),
            list("education"),
            list("skills"),
        )
    }
}
