//! Fitted standard scaler
//!
//! Per-feature `(x - mean) / scale` using statistics frozen at training
//! time. Loaded unchanged from the scaler artifact; never refitted at
//! serving time.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean from the training set
    pub mean: Vec<f64>,
    /// Per-feature standard deviation from the training set
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// True when the stored statistics are internally consistent
    pub fn is_consistent(&self) -> bool {
        self.mean.len() == self.scale.len() && self.scale.iter().all(|s| *s != 0.0 && s.is_finite())
    }

    /// Apply the frozen transform to one ordered feature vector
    pub fn transform(&self, vector: &[f64]) -> Array1<f64> {
        let mut scaled = Array1::zeros(vector.len());
        for (i, &x) in vector.iter().enumerate() {
            scaled[i] = (x - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 4.0],
        };
        let scaled = scaler.transform(&[14.0, -2.0]);
        assert_eq!(scaled[0], 2.0);
        assert_eq!(scaled[1], -0.5);
    }

    #[test]
    fn test_identity_scaler() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let scaled = scaler.transform(&[1.5, -2.5, 0.0]);
        assert_eq!(scaled.to_vec(), vec![1.5, -2.5, 0.0]);
    }

    #[test]
    fn test_consistency_checks() {
        let good = StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 2.0],
        };
        assert!(good.is_consistent());

        let ragged = StandardScaler {
            mean: vec![0.0],
            scale: vec![1.0, 2.0],
        };
        assert!(!ragged.is_consistent());

        let zero_scale = StandardScaler {
            mean: vec![0.0],
            scale: vec![0.0],
        };
        assert!(!zero_scale.is_consistent());
    }
}
