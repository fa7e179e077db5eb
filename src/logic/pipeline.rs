//! Prediction Pipeline
//!
//! The single scoring flow: validate → order → score → build. Every entry
//! point (HTTP handler, batch CLI) goes through here, once per sample.

use thiserror::Error;

use super::artifacts::Artifacts;
use super::response::{self, LabelStyle, Prediction};
use super::scorer;
use super::validate::{self, RawFeatures};
use super::vector;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Artifacts were never successfully loaded; the service is degraded
    #[error("model artifacts are not available")]
    ModelUnavailable,

    /// The request is structurally invalid; every violation is listed
    #[error("input validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A feature slipped past validation but is absent at ordering time.
    /// Indicates a caller bypassed validation; must fail loudly.
    #[error("feature '{0}' missing from input mapping")]
    FieldMissing(String),

    /// Vector width does not match what the artifacts were fitted on
    #[error("feature vector has {actual} values, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run one sample through the full pipeline.
pub fn run(
    artifacts: &Artifacts,
    raw: &RawFeatures,
    style: LabelStyle,
) -> Result<Prediction, PipelineError> {
    let report = validate::validate(raw);
    if !report.is_valid() {
        return Err(PipelineError::Validation(report.errors));
    }

    let ordered = vector::order_features(&report.values, &artifacts.feature_order)?;
    let outcome = scorer::score(&ordered, artifacts)?;

    Ok(response::build(outcome, report.warnings, style))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{ClassifierSpec, LayerSpec, MlpClassifier, StandardScaler};
    use serde_json::json;

    /// Small model that calls anything with koi_prad above ~17.5 a false
    /// positive.
    fn test_artifacts() -> Artifacts {
        let spec = ClassifierSpec {
            model_type: "mlp".to_string(),
            version: Some("pipeline_test".to_string()),
            hidden_activation: "relu".to_string(),
            layers: vec![LayerSpec {
                weights: vec![
                    vec![0.0],
                    vec![0.0],
                    vec![0.0],
                    vec![-2.0],
                    vec![0.0],
                    vec![0.0],
                    vec![0.0],
                ],
                bias: vec![1.0],
            }],
        };

        Artifacts {
            classifier: MlpClassifier::build(spec).unwrap(),
            scaler: StandardScaler {
                mean: vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
                scale: vec![1.0, 1.0, 1.0, 15.0, 1.0, 1.0, 1.0],
            },
            feature_order: [
                "koi_period",
                "koi_duration",
                "koi_depth",
                "koi_prad",
                "koi_teq",
                "koi_insol",
                "koi_steff",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    fn raw(prad: f64) -> RawFeatures {
        let mut raw = RawFeatures::new();
        raw.insert("koi_period".into(), json!(9.488));
        raw.insert("koi_duration".into(), json!(2.9575));
        raw.insert("koi_depth".into(), json!(615.8));
        raw.insert("koi_prad".into(), json!(prad));
        raw.insert("koi_teq".into(), json!(793.0));
        raw.insert("koi_insol".into(), json!(93.59));
        raw.insert("koi_steff".into(), json!(5455.0));
        raw
    }

    #[test]
    fn test_end_to_end_prediction() {
        let artifacts = test_artifacts();

        let planet = run(&artifacts, &raw(2.26), LabelStyle::Standard).unwrap();
        assert_eq!(planet.prediction, 1);
        assert_eq!(planet.prediction_label, "Exoplanet");
        assert!(planet.warnings.is_empty());

        let giant = run(&artifacts, &raw(40.0), LabelStyle::Standard).unwrap();
        assert_eq!(giant.prediction, 0);
    }

    #[test]
    fn test_validation_failure_lists_everything() {
        let artifacts = test_artifacts();
        let mut input = raw(2.26);
        input.remove("koi_teq");
        input.insert("koi_depth".into(), json!("deep"));

        match run(&artifacts, &input, LabelStyle::Standard).unwrap_err() {
            PipelineError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.contains("koi_teq")));
                assert!(errors.iter().any(|e| e.contains("koi_depth")));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let artifacts = test_artifacts();

        // Same entries, inserted in reverse order
        let forward = raw(2.26);
        let mut reversed = RawFeatures::new();
        for (k, v) in forward.iter().rev() {
            reversed.insert(k.clone(), v.clone());
        }

        let a = run(&artifacts, &forward, LabelStyle::Standard).unwrap();
        let b = run(&artifacts, &reversed, LabelStyle::Standard).unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.exoplanet_probability, b.exoplanet_probability);
        assert_eq!(a.not_exoplanet_probability, b.not_exoplanet_probability);
    }

    #[test]
    fn test_warnings_surface_with_success() {
        let artifacts = test_artifacts();
        let mut input = raw(2.26);
        input.insert("koi_steff".into(), json!(11_000.0));

        let prediction = run(&artifacts, &input, LabelStyle::Standard).unwrap();
        assert_eq!(prediction.warnings.len(), 1);
        assert!(prediction.warnings[0].contains("koi_steff"));
    }

    #[test]
    fn test_probability_properties_hold() {
        let artifacts = test_artifacts();
        for prad in [0.5, 2.26, 9.0, 15.0, 33.46] {
            let p = run(&artifacts, &raw(prad), LabelStyle::Standard).unwrap();
            assert!((p.exoplanet_probability + p.not_exoplanet_probability - 1.0).abs() < 1e-9);
            assert!(
                (p.confidence - p.exoplanet_probability.max(p.not_exoplanet_probability)).abs()
                    < 1e-12
            );
            let expected_class = u8::from(p.exoplanet_probability >= p.not_exoplanet_probability);
            assert_eq!(p.prediction, expected_class);
        }
    }
}
