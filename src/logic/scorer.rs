//! Scorer
//!
//! Applies the fitted scaler then the classifier to one ordered feature
//! vector. Stateless: each call is a pure function of the vector and the
//! shared immutable artifacts, so any number of requests may score in
//! parallel.

use super::artifacts::Artifacts;
use super::pipeline::PipelineError;

/// Raw scorer output, before response shaping
#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    /// 0 = not an exoplanet, 1 = exoplanet
    pub class: u8,
    /// `[p(not exoplanet), p(exoplanet)]`
    pub probabilities: [f64; 2],
}

/// Score one ordered feature vector against the loaded artifacts.
///
/// The class is the argmax of the two probabilities, with a tie going to
/// the positive class, so prediction and probabilities can never disagree.
pub fn score(vector: &[f64], artifacts: &Artifacts) -> Result<ScoreOutcome, PipelineError> {
    let expected = artifacts.feature_order.len();
    if vector.len() != expected {
        return Err(PipelineError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }

    let scaled = artifacts.scaler.transform(vector);
    let probabilities = artifacts.classifier.predict_proba(&scaled);
    let class = u8::from(probabilities[1] >= probabilities[0]);

    Ok(ScoreOutcome {
        class,
        probabilities,
    })
}
