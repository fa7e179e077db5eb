//! Health check handlers

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Exoplanet Detection API is running!",
    })
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
