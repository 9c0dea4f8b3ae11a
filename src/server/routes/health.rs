use axum::Json;
use serde::{Deserialize, Serialize};

use crate::document::Format;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub supported_formats: Vec<Format>,
}

/// Liveness check. Always healthy once the server is accepting requests.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "docnav is running".to_string(),
        supported_formats: vec![Format::Markup, Format::Package],
    })
}
