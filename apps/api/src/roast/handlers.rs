use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::roast::{RoastRequest, RoastResult};
use crate::roast::generate_roast;
use crate::share::format_share_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastResponse {
    #[serde(flatten)]
    pub result: RoastResult,
    /// Ready-to-paste text for social sharing.
    pub share_text: String,
}

/// POST /api/roast
///
/// Accepts `{profile?, bioText?}` and returns `{roast, name?, shareText}`.
pub async fn handle_generate_roast(
    State(state): State<AppState>,
    payload: Result<Json<RoastRequest>, JsonRejection>,
) -> Result<Json<RoastResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let linkedin_url = request
        .profile
        .as_ref()
        .and_then(|p| p.linkedin_url.clone());

    let result = generate_roast(request, state.llm.as_ref()).await?;
    let share_text = format_share_text(
        &result.roast,
        result.name.as_deref(),
        linkedin_url.as_deref(),
    );

    Ok(Json(RoastResponse { result, share_text }))
}
