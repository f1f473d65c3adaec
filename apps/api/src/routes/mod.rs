pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers::handle_parse_pdf;
use crate::roast::handlers::handle_generate_roast;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/parse-pdf",
            post(handle_parse_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/roast", post(handle_generate_roast))
        .with_state(state)
}
