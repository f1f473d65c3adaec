//! Profile extraction: turns raw document text into a normalized `ProfileRecord`.
//!
//! One completion call per document. The reply is either parsed into a full
//! record or the whole extraction fails; there is no partial profile.

use thiserror::Error;
use tracing::{error, info};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, CompletionBackend, CompletionOptions};
use crate::models::profile::ProfileRecord;
use crate::profile::prompts::{PROFILE_EXTRACT_PROMPT_TEMPLATE, PROFILE_EXTRACT_SYSTEM_TEMPLATE};

pub mod handlers;
pub mod prompts;

/// Only this many characters of document text are sent to the model.
pub const MAX_DOCUMENT_CHARS: usize = 8000;

const EXTRACTION_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.1,
    max_tokens: 1000,
};

#[derive(Debug, Error)]
pub enum ProfileParseError {
    #[error("reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the (system, user) prompt pair for a document.
pub fn build_extraction_prompts(document_text: &str) -> (String, String) {
    let system = PROFILE_EXTRACT_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_INSTRUCTION);
    let prompt = PROFILE_EXTRACT_PROMPT_TEMPLATE.replace(
        "{document_text}",
        truncate_chars(document_text, MAX_DOCUMENT_CHARS),
    );
    (system, prompt)
}

/// Parses the model's reply into a record, tolerating a code-fence wrapper.
pub fn parse_profile_reply(content: &str) -> Result<ProfileRecord, ProfileParseError> {
    let value: serde_json::Value = serde_json::from_str(strip_json_fences(content))?;
    let object = value.as_object().ok_or(ProfileParseError::NotAnObject)?;
    Ok(ProfileRecord::from_extraction(object))
}

/// Runs the extraction pipeline for one document.
pub async fn extract_profile(
    document_text: &str,
    llm: &dyn CompletionBackend,
) -> Result<ProfileRecord, AppError> {
    if document_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Document contains no extractable text".to_string(),
        ));
    }

    info!(
        "Extracting profile from {} chars of text",
        document_text.chars().count()
    );

    let (system, prompt) = build_extraction_prompts(document_text);
    let content = llm.complete(&system, &prompt, EXTRACTION_OPTIONS).await?;

    let profile = parse_profile_reply(&content).map_err(|e| {
        error!("Failed to parse profile reply ({e}): {content}");
        AppError::ProfileParse(e)
    })?;

    info!("Profile extracted: {}", profile.name);
    Ok(profile)
}
