use serde::{Deserialize, Serialize};

use crate::models::profile::ProfileRecord;

/// Body of a roast request. At least one of the two fields must be usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRequest {
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    #[serde(default)]
    pub bio_text: Option<String>,
}

/// The validated shape a roast is generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum RoastInput {
    Profile(ProfileRecord),
    Bio(String),
}

impl RoastRequest {
    /// Resolves the request to a single input. The profile wins when both are
    /// present; a blank `bioText` counts as absent.
    pub fn into_input(self) -> Option<RoastInput> {
        match (self.profile, self.bio_text) {
            (Some(profile), _) => Some(RoastInput::Profile(profile)),
            (None, Some(bio)) if !bio.trim().is_empty() => Some(RoastInput::Bio(bio)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastResult {
    pub roast: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
