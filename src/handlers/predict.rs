//! Prediction handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::logic::{pipeline, ArtifactStatus, LabelStyle, Prediction, RawFeatures};
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// The raw feature mapping; all seven schema names, any order
    pub features: RawFeatures,

    /// Optional phrasing for the positive-class label
    #[serde(default)]
    pub label_style: LabelStyle,
}

/// Predict whether the given features indicate an exoplanet
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> AppResult<Json<Prediction>> {
    let artifacts = state.store.artifacts()?;
    let prediction = pipeline::run(&artifacts, &request.features, request.label_style)?;
    Ok(Json(prediction))
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    /// "not_loaded" | "ready" | "failed"
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report the artifact store state without forcing a load
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    let model_dir = state.store.dir().display().to_string();

    let info = match state.store.status() {
        ArtifactStatus::NotLoaded => ModelInfo {
            status: "not_loaded",
            model_loaded: false,
            model_dir,
            model_type: None,
            model_version: None,
            feature_count: None,
            features: None,
            error: None,
        },
        ArtifactStatus::Ready(artifacts) => ModelInfo {
            status: "ready",
            model_loaded: true,
            model_dir,
            model_type: Some(artifacts.classifier.model_type().to_string()),
            model_version: artifacts.classifier.version().map(str::to_string),
            feature_count: Some(artifacts.feature_order.len()),
            features: Some(artifacts.feature_order.clone()),
            error: None,
        },
        ArtifactStatus::Failed(e) => ModelInfo {
            status: "failed",
            model_loaded: false,
            model_dir,
            model_type: None,
            model_version: None,
            feature_count: None,
            features: None,
            error: Some(e.to_string()),
        },
    };

    Json(info)
}
