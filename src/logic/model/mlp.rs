//! Serialized MLP classifier
//!
//! Loads the model artifact (dense layers with ReLU hidden activation and a
//! logistic or softmax output) and runs the forward pass. The artifact keeps
//! weights as nested arrays so it stays hand-readable; they are lifted into
//! `ndarray` matrices here, with every structural problem reported before
//! the model is ever scored.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problem in a classifier artifact
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ModelError(pub String);

// ============================================================================
// ON-DISK FORMAT
// ============================================================================

/// One dense layer as stored in the artifact.
/// `weights[i][j]` maps input `i` to unit `j` (the scikit-learn `coefs_`
/// layout the training side exports).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// Classifier artifact as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSpec {
    pub model_type: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_hidden_activation")]
    pub hidden_activation: String,
    pub layers: Vec<LayerSpec>,
}

fn default_hidden_activation() -> String {
    "relu".to_string()
}

// ============================================================================
// RUNTIME MODEL
// ============================================================================

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputActivation {
    /// Single output unit through the logistic function
    Logistic,
    /// Two output units through softmax
    Softmax,
}

/// A validated, ready-to-score binary classifier
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    layers: Vec<DenseLayer>,
    output: OutputActivation,
    model_type: String,
    version: Option<String>,
}

impl MlpClassifier {
    /// Build a runtime model from the on-disk spec, rejecting anything that
    /// could not have come from a consistent training run.
    pub fn build(spec: ClassifierSpec) -> Result<Self, ModelError> {
        if spec.model_type != "mlp" {
            return Err(ModelError(format!(
                "unsupported model type '{}'",
                spec.model_type
            )));
        }
        if spec.hidden_activation != "relu" {
            return Err(ModelError(format!(
                "unsupported hidden activation '{}'",
                spec.hidden_activation
            )));
        }
        if spec.layers.is_empty() {
            return Err(ModelError("classifier has no layers".to_string()));
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut prev_width: Option<usize> = None;

        for (idx, layer) in spec.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            if rows == 0 {
                return Err(ModelError(format!("layer {} has no weights", idx)));
            }
            let cols = layer.weights[0].len();
            if cols == 0 {
                return Err(ModelError(format!("layer {} has no units", idx)));
            }
            if layer.weights.iter().any(|row| row.len() != cols) {
                return Err(ModelError(format!(
                    "layer {} weight matrix is ragged",
                    idx
                )));
            }
            if layer.bias.len() != cols {
                return Err(ModelError(format!(
                    "layer {} bias length {} does not match {} units",
                    idx,
                    layer.bias.len(),
                    cols
                )));
            }
            if let Some(width) = prev_width {
                if rows != width {
                    return Err(ModelError(format!(
                        "layer {} expects {} inputs but the previous layer produces {}",
                        idx, rows, width
                    )));
                }
            }

            let flat: Vec<f64> = layer.weights.into_iter().flatten().collect();
            if flat.iter().chain(layer.bias.iter()).any(|v| !v.is_finite()) {
                return Err(ModelError(format!(
                    "layer {} contains non-finite parameters",
                    idx
                )));
            }

            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|e| ModelError(format!("layer {} shape error: {}", idx, e)))?;
            layers.push(DenseLayer {
                weights,
                bias: Array1::from_vec(layer.bias),
            });
            prev_width = Some(cols);
        }

        let output = match prev_width {
            Some(1) => OutputActivation::Logistic,
            Some(2) => OutputActivation::Softmax,
            Some(n) => {
                return Err(ModelError(format!(
                    "output layer has {} units, binary classifier expects 1 or 2",
                    n
                )))
            }
            None => unreachable!("layers checked non-empty"),
        };

        Ok(Self {
            layers,
            output,
            model_type: spec.model_type,
            version: spec.version,
        })
    }

    /// Input width the network was trained on
    pub fn n_features(&self) -> usize {
        self.layers[0].weights.nrows()
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Forward pass over one scaled feature vector.
    ///
    /// Returns `[p(not exoplanet), p(exoplanet)]`; the two always sum to 1
    /// up to float rounding, which the pipeline accepts as the model's own
    /// guarantee.
    pub fn predict_proba(&self, input: &Array1<f64>) -> [f64; 2] {
        let mut activation = input.clone();
        let last = self.layers.len() - 1;

        for (i, layer) in self.layers.iter().enumerate() {
            let mut z = activation.dot(&layer.weights) + &layer.bias;
            if i < last {
                z.mapv_inplace(|v| v.max(0.0));
            }
            activation = z;
        }

        match self.output {
            OutputActivation::Logistic => {
                let p = sigmoid(activation[0]);
                [1.0 - p, p]
            }
            OutputActivation::Softmax => softmax2(activation[0], activation[1]),
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax2(z0: f64, z1: f64) -> [f64; 2] {
    let m = z0.max(z1);
    let e0 = (z0 - m).exp();
    let e1 = (z1 - m).exp();
    let sum = e0 + e1;
    [e0 / sum, e1 / sum]
}

// ============================================================================
// TESTS
// ============================================================================
