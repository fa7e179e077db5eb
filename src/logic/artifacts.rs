//! Artifact Store
//!
//! Loads the trained classifier, scaler, and feature-name list from a fixed
//! directory and holds them immutable for the process lifetime. The store
//! holds either all three artifacts or none: a partial load is a total
//! failure, and a failed load stays failed until an operator intervenes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::fs;

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{ClassifierSpec, MlpClassifier, StandardScaler};
use super::pipeline::PipelineError;
use super::schema::{is_known_feature, FEATURE_COUNT};

// ============================================================================
// ARTIFACT FILE NAMES
// ============================================================================

/// Serialized classifier
pub const MODEL_FILE: &str = "exoplanet_model.json";

/// Fitted feature scaler
pub const SCALER_FILE: &str = "exoplanet_scaler.json";

/// Ordered feature-name list the model was trained on
pub const FEATURES_FILE: &str = "model_features.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("artifact {file} not found in {}", .dir.display())]
    NotFound { file: &'static str, dir: PathBuf },

    #[error("artifact {file} is corrupt: {reason}")]
    Corrupt { file: &'static str, reason: String },
}

impl LoadError {
    fn corrupt(file: &'static str, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            file,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// ARTIFACTS
// ============================================================================

/// The immutable triple every scoring request reads
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub classifier: MlpClassifier,
    pub scaler: StandardScaler,
    pub feature_order: Vec<String>,
}

impl Artifacts {
    /// Load all three artifacts from `dir`, or fail as a whole.
    ///
    /// Cross-artifact consistency is checked here so a mismatched bundle
    /// never reaches the scorer: the feature list must be a permutation of
    /// the serving schema, and scaler and classifier must both be fitted on
    /// exactly that many features.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let spec: ClassifierSpec = read_artifact(dir, MODEL_FILE)?;
        let classifier =
            MlpClassifier::build(spec).map_err(|e| LoadError::corrupt(MODEL_FILE, e.to_string()))?;

        let scaler: StandardScaler = read_artifact(dir, SCALER_FILE)?;
        if !scaler.is_consistent() {
            return Err(LoadError::corrupt(
                SCALER_FILE,
                "mean/scale lengths differ or scale contains zeros",
            ));
        }

        let feature_order: Vec<String> = read_artifact(dir, FEATURES_FILE)?;
        if feature_order.len() != FEATURE_COUNT
            || feature_order.iter().any(|n| !is_known_feature(n))
            || (1..feature_order.len())
                .any(|i| feature_order[i..].contains(&feature_order[i - 1]))
        {
            return Err(LoadError::corrupt(
                FEATURES_FILE,
                "feature list does not match the serving schema",
            ));
        }

        if scaler.n_features() != feature_order.len() {
            return Err(LoadError::corrupt(
                SCALER_FILE,
                format!(
                    "scaler fitted on {} features, feature list has {}",
                    scaler.n_features(),
                    feature_order.len()
                ),
            ));
        }
        if classifier.n_features() != feature_order.len() {
            return Err(LoadError::corrupt(
                MODEL_FILE,
                format!(
                    "classifier expects {} features, feature list has {}",
                    classifier.n_features(),
                    feature_order.len()
                ),
            ));
        }

        Ok(Self {
            classifier,
            scaler,
            feature_order,
        })
    }
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &'static str) -> Result<T, LoadError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(LoadError::NotFound {
            file,
            dir: dir.to_path_buf(),
        });
    }
    let data = fs::read(&path).map_err(|e| LoadError::corrupt(file, e.to_string()))?;
    serde_json::from_slice(&data).map_err(|e| LoadError::corrupt(file, e.to_string()))
}

// ============================================================================
// STORE
// ============================================================================

/// Where the store currently stands.
/// A failed load is reported distinctly from "not yet loaded".
#[derive(Debug, Clone)]
pub enum ArtifactStatus {
    NotLoaded,
    Ready(Arc<Artifacts>),
    Failed(LoadError),
}

/// Owns the artifact directory and memoizes the load outcome.
///
/// Concurrent first requests gate behind the cell, so the disk load runs
/// exactly once per process and every waiter observes the same result,
/// success or failure.
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
    cell: OnceCell<Result<Arc<Artifacts>, LoadError>>,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load (or return the memoized outcome of loading) the artifacts.
    pub fn load(&self) -> Result<Arc<Artifacts>, LoadError> {
        self.cell
            .get_or_init(|| Artifacts::load(&self.dir).map(Arc::new))
            .clone()
    }

    /// The handle scoring paths use: any unusable store state collapses to
    /// `ModelUnavailable` (the detailed `LoadError` stays available through
    /// [`ArtifactStore::load`] and [`ArtifactStore::status`]).
    pub fn artifacts(&self) -> Result<Arc<Artifacts>, PipelineError> {
        self.load().map_err(|_| PipelineError::ModelUnavailable)
    }

    pub fn status(&self) -> ArtifactStatus {
        match self.cell.get() {
            None => ArtifactStatus::NotLoaded,
            Some(Ok(artifacts)) => ArtifactStatus::Ready(artifacts.clone()),
            Some(Err(e)) => ArtifactStatus::Failed(e.clone()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
