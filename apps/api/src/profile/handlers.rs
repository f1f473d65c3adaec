use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::document::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::models::profile::ProfileRecord;
use crate::profile::extract_profile;
use crate::state::AppState;

/// Multipart field names accepted for the uploaded document.
const DOCUMENT_FIELDS: &[&str] = &["pdf", "file"];

#[derive(Debug, Serialize)]
pub struct ParsePdfResponse {
    pub profile: ProfileRecord,
}

/// Oversized bodies surface as a multipart error carrying 413.
fn multipart_error(err: MultipartError, limit: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// POST /api/parse-pdf
///
/// Reads the uploaded document, extracts its text, and asks the model for a
/// structured profile.
pub async fn handle_parse_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsePdfResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "Invalid multipart body"))?
    {
        if !field.name().is_some_and(|n| DOCUMENT_FIELDS.contains(&n)) {
            continue;
        }
        let kind = DocumentKind::detect(field.content_type(), field.file_name());
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit, "Failed to read upload"))?;
        upload = Some((file_name, kind, bytes));
        break;
    }

    let (file_name, kind, bytes) = upload
        .filter(|(_, _, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("PDF file is required".to_string()))?;

    if !state.llm.is_configured() {
        return Err(AppError::MissingCredential);
    }

    info!("Parsing document: {} ({} bytes, {:?})", file_name, bytes.len(), kind);

    let text = extract_text(bytes, kind).await?;
    let profile = extract_profile(&text, state.llm.as_ref()).await?;

    Ok(Json(ParsePdfResponse { profile }))
}
