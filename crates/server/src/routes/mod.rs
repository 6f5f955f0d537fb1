//! API route handlers
//!
//! - `health`: liveness probe
//! - `report`: HTML drone spray report for a Notion page

pub mod health;
pub mod report;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service info (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Drone Report Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/drone/{page_id}"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
