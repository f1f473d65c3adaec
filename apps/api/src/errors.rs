use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::DocumentError;
use crate::llm_client::LlmError;
use crate::profile::ProfileParseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("API key not configured")]
    MissingCredential,

    /// Non-success status or transport failure talking to the completion endpoint.
    /// `status` is `None` when no usable HTTP status came back.
    #[error("API Error: {}", upstream_message(.status, .message))]
    Upstream { status: Option<u16>, message: String },

    #[error("No response generated")]
    EmptyResponse,

    #[error("Failed to parse profile data: {0}")]
    ProfileParse(#[from] ProfileParseError),

    #[error("Failed to read document: {0}")]
    Document(#[from] DocumentError),
}

fn upstream_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{status} - {message}"),
        None => message.to_string(),
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => AppError::MissingCredential,
            LlmError::EmptyContent => AppError::EmptyResponse,
            LlmError::Api { status, message } => AppError::Upstream {
                status: Some(status),
                message,
            },
            LlmError::Http(e) => AppError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            // A 2xx with an unreadable body: the upstream status would claim success.
            err @ LlmError::MalformedResponse { .. } => AppError::Upstream {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::MissingCredential => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_CREDENTIAL")
            }
            AppError::Upstream { status, .. } => (
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "UPSTREAM_ERROR",
            ),
            AppError::EmptyResponse => (StatusCode::INTERNAL_SERVER_ERROR, "EMPTY_RESPONSE"),
            AppError::ProfileParse(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PROFILE_PARSE_ERROR"),
            AppError::Document(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DOCUMENT_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(_) | AppError::PayloadTooLarge { .. } => self.to_string(),
            other => {
                tracing::error!("{code}: {other}");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
