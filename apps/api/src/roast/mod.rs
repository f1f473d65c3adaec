//! Roast generation: a profile or a raw bio in, a short roast out.
//!
//! The character budget is only an instruction to the model. Replies are
//! trimmed and returned as-is, even when they run long.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::ROAST_CHAR_BUDGET;
use crate::llm_client::{CompletionBackend, CompletionOptions};
use crate::models::profile::ProfileRecord;
use crate::models::roast::{RoastInput, RoastRequest, RoastResult};
use crate::roast::prompts::{
    BIO_ROAST_INSTRUCTION_TEMPLATE, PROFILE_ROAST_INSTRUCTION_TEMPLATE, ROAST_SYSTEM_TEMPLATE,
};

pub mod handlers;
pub mod prompts;

const ROAST_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.9,
    max_tokens: 300,
};

fn with_budget(template: &str) -> String {
    template.replace("{budget}", &ROAST_CHAR_BUDGET.to_string())
}

pub fn roast_system_prompt() -> String {
    with_budget(ROAST_SYSTEM_TEMPLATE)
}

/// Builds the user prompt for a profile. Empty fields get no line at all.
pub fn build_profile_prompt(profile: &ProfileRecord) -> String {
    let mut lines = vec![format!("Roast {}'s LinkedIn profile.", profile.name)];

    if !profile.headline.is_empty() {
        lines.push(format!("Headline: \"{}\"", profile.headline));
    }
    if !profile.about.is_empty() {
        lines.push(format!("About: \"{}\"", profile.about));
    }
    if !profile.experience.is_empty() {
        lines.push(format!("Experience: {}", profile.experience.join("; ")));
    }
    if !profile.skills.is_empty() {
        lines.push(format!("Skills: {}", profile.skills.join(", ")));
    }

    format!(
        "{}\n\n{}",
        lines.join("\n"),
        with_budget(PROFILE_ROAST_INSTRUCTION_TEMPLATE)
    )
}

pub fn build_bio_prompt(bio_text: &str) -> String {
    format!(
        "Roast this LinkedIn bio:\n\n{}\n\n{}",
        bio_text,
        with_budget(BIO_ROAST_INSTRUCTION_TEMPLATE)
    )
}

pub fn build_roast_prompt(input: &RoastInput) -> String {
    match input {
        RoastInput::Profile(profile) => build_profile_prompt(profile),
        RoastInput::Bio(bio_text) => build_bio_prompt(bio_text),
    }
}

/// Runs the roast pipeline. Validates the request before any network call.
pub async fn generate_roast(
    request: RoastRequest,
    llm: &dyn CompletionBackend,
) -> Result<RoastResult, AppError> {
    let input = request.into_input().ok_or_else(|| {
        AppError::Validation("Either profile or bioText is required".to_string())
    })?;

    let name = match &input {
        RoastInput::Profile(profile) => Some(profile.name.clone()),
        RoastInput::Bio(_) => None,
    };
    info!(
        "Generating roast for: {}",
        name.as_deref().unwrap_or("bio text")
    );

    let prompt = build_roast_prompt(&input);
    let roast = llm
        .complete(&roast_system_prompt(), &prompt, ROAST_OPTIONS)
        .await?
        .trim()
        .to_string();

    if roast.is_empty() {
        return Err(AppError::EmptyResponse);
    }

    info!("Roast generated ({} chars)", roast.chars().count());
    Ok(RoastResult { roast, name })
}
