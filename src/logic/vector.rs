//! Feature Orderer
//!
//! Projects a validated feature mapping into the fixed-order vector the
//! model was fitted on. The order comes from the feature-list artifact, so
//! request payload order never matters.

use std::collections::BTreeMap;

use super::pipeline::PipelineError;

/// Project `values` through `feature_order` into a dense vector.
///
/// An absent name is always an error here. The validator makes this
/// unreachable in normal operation, but a caller that bypassed validation
/// must fail loudly rather than score a silently defaulted vector.
pub fn order_features(
    values: &BTreeMap<String, f64>,
    feature_order: &[String],
) -> Result<Vec<f64>, PipelineError> {
    let mut vector = Vec::with_capacity(feature_order.len());
    for name in feature_order {
        match values.get(name) {
            Some(&x) => vector.push(x),
            None => return Err(PipelineError::FieldMissing(name.clone())),
        }
    }
    Ok(vector)
}
