//! Exoplanet Detection API
//!
//! Inference-serving backend for a previously trained exoplanet classifier.
//!
//! # Architecture
//!
//! ```text
//! request ──▶ FeatureValidator ──▶ FeatureOrderer ──▶ Scorer ──▶ ResponseBuilder
//!                                        ▲               ▲
//!                                        └── Artifacts ──┘
//!                                     (classifier + scaler + feature order,
//!                                      loaded once, shared read-only)
//! ```
//!
//! The pipeline is exposed over HTTP (`src/main.rs`) and through a batch CLI
//! (`src/bin/batch_predict.rs`); both call the same [`logic::pipeline::run`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;

pub use error::{AppError, AppResult};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::Config;
use logic::ArtifactStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/model/info", get(handlers::predict::model_info))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
