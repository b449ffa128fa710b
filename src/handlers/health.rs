//! Service banner and health check endpoints.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Banner returned from `/`.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Finance Tracker API".to_string(),
    })
}

/// Health check handler.
///
/// Liveness only: the process is up and serving requests.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "OK",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}
