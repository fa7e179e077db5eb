//! Exoplanet Detection API Server

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exoplanet_api::config::Config;
use exoplanet_api::logic::ArtifactStore;
use exoplanet_api::{create_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exoplanet_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Exoplanet Detection API starting...");
    tracing::info!("Model directory: {}", config.model_dir.display());

    // Load artifacts eagerly; a failure leaves the service up but degraded
    // (503 on /predict) until an operator fixes the model directory.
    let store = Arc::new(ArtifactStore::new(&config.model_dir));
    match store.load() {
        Ok(artifacts) => tracing::info!(
            model_type = artifacts.classifier.model_type(),
            model_version = artifacts.classifier.version().unwrap_or("unversioned"),
            features = artifacts.feature_order.len(),
            "model artifacts loaded"
        ),
        Err(e) => tracing::error!("failed to load model artifacts, serving degraded: {}", e),
    }

    // Build application state
    let state = AppState {
        store,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
