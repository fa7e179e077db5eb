//! Logic Module - Inference Pipeline
//!
//! Everything between a raw feature mapping and a shaped prediction:
//! - `schema` - the serving feature schema and soft bounds
//! - `validate` - request validation (errors + non-blocking warnings)
//! - `vector` - projection into the trained feature order
//! - `artifacts` - classifier/scaler/feature-list loading, once per process
//! - `model` - the fitted scaler and MLP classifier
//! - `scorer` - scale + forward pass
//! - `response` - response shaping
//! - `pipeline` - the single flow tying the above together

pub mod artifacts;
pub mod model;
pub mod pipeline;
pub mod response;
pub mod schema;
pub mod scorer;
pub mod validate;
pub mod vector;

// Re-export common types
pub use artifacts::{ArtifactStatus, ArtifactStore, Artifacts, LoadError};
pub use pipeline::PipelineError;
pub use response::{LabelStyle, Prediction};
pub use validate::RawFeatures;
