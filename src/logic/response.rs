//! Response Builder
//!
//! Deterministic mapping from raw scorer output to the documented response
//! shape. The timestamp is wall-clock at build time, for audit trails only.

use serde::{Deserialize, Serialize};

use super::scorer::ScoreOutcome;

/// Caller-selectable phrasing for the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// "Exoplanet" / "Not Exoplanet"
    #[default]
    Standard,
    /// "Exoplanet Candidate" / "Not Exoplanet"
    Candidate,
}

impl LabelStyle {
    fn label(self, class: u8) -> &'static str {
        match (self, class) {
            (_, 0) => "Not Exoplanet",
            (LabelStyle::Standard, _) => "Exoplanet",
            (LabelStyle::Candidate, _) => "Exoplanet Candidate",
        }
    }
}

/// The stable per-sample response shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class: 0 or 1
    pub prediction: u8,
    pub prediction_label: String,
    pub interpretation: String,
    /// Probability mass of the predicted class
    pub confidence: f64,
    pub exoplanet_probability: f64,
    pub not_exoplanet_probability: f64,
    /// RFC 3339 generation time
    pub timestamp: String,
    /// Validator notes that did not block the prediction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Shape one scorer outcome into the response contract.
///
/// `exoplanet_probability` is always the positive-class probability, even
/// when the predicted class is 0; `confidence` is the larger of the two.
pub fn build(outcome: ScoreOutcome, warnings: Vec<String>, style: LabelStyle) -> Prediction {
    let [p_not, p_exo] = outcome.probabilities;
    let interpretation = if outcome.class == 1 {
        "Exoplanet detected!"
    } else {
        "No exoplanet detected"
    };

    Prediction {
        prediction: outcome.class,
        prediction_label: style.label(outcome.class).to_string(),
        interpretation: interpretation.to_string(),
        confidence: p_not.max(p_exo),
        exoplanet_probability: p_exo,
        not_exoplanet_probability: p_not,
        timestamp: chrono::Utc::now().to_rfc3339(),
        warnings,
    }
}
