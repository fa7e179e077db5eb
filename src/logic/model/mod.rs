//! Model Module - Classifier & Scaler Artifacts
//!
//! The two fitted objects the pipeline scores with. Both are loaded
//! unchanged from disk and never mutated at serving time.

pub mod mlp;
pub mod scaler;

// Re-export common types
pub use mlp::{ClassifierSpec, LayerSpec, MlpClassifier, ModelError};
pub use scaler::StandardScaler;
