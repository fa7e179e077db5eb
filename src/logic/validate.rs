//! Feature Validator
//!
//! Pure validation of a raw request mapping against the serving schema.
//! Structural problems (missing name, non-numeric value, NaN/infinity) are
//! errors and block scoring; physically unusual values only produce warnings
//! that ride along with a successful prediction.

use std::collections::BTreeMap;

use serde_json::Value;

use super::schema::{
    is_known_feature, MAX_TYPICAL_DURATION_HOURS, MAX_TYPICAL_PERIOD_DAYS, REQUIRED_FEATURES,
    TYPICAL_STEFF_MAX_K, TYPICAL_STEFF_MIN_K,
};

/// Raw per-request feature mapping as received from the caller.
/// Values stay as JSON values so a non-numeric entry is a validation error
/// naming the field, not a deserialization crash.
pub type RawFeatures = BTreeMap<String, Value>;

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// Outcome of validating one request
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Blocking violations, one message per violated rule
    pub errors: Vec<String>,
    /// Non-blocking notes, surfaced alongside a successful prediction
    pub warnings: Vec<String>,
    /// Coerced numeric values for every structurally valid field
    pub values: BTreeMap<String, f64>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a raw feature mapping against the serving schema.
///
/// Collects every violation rather than stopping at the first, so a caller
/// can fix a whole request in one round trip.
pub fn validate(raw: &RawFeatures) -> ValidationReport {
    let mut report = ValidationReport::default();

    for &name in REQUIRED_FEATURES {
        match raw.get(name) {
            None => report
                .errors
                .push(format!("missing required feature: {}", name)),
            Some(value) => match value.as_f64() {
                Some(x) => check_numeric(name, x, &mut report),
                None => report
                    .errors
                    .push(format!("feature '{}' must be a number", name)),
            },
        }
    }

    // Names outside the schema are ignored, not rejected
    for name in raw.keys() {
        if !is_known_feature(name) {
            report
                .warnings
                .push(format!("ignoring unknown feature '{}'", name));
        }
    }

    report
}

/// Check one coerced numeric value: finiteness is structural, everything
/// else is a warning.
fn check_numeric(name: &str, x: f64, report: &mut ValidationReport) {
    if !x.is_finite() {
        report
            .errors
            .push(format!("feature '{}' must be finite (got NaN or infinity)", name));
        return;
    }

    if x < 0.0 {
        report
            .warnings
            .push(format!("feature '{}' is negative ({})", name, x));
    }

    match name {
        "koi_period" if x > MAX_TYPICAL_PERIOD_DAYS => report.warnings.push(format!(
            "koi_period of {} days is unusually long",
            x
        )),
        "koi_duration" if x > MAX_TYPICAL_DURATION_HOURS => report.warnings.push(format!(
            "koi_duration of {} hours is unusually long",
            x
        )),
        "koi_steff" if x < TYPICAL_STEFF_MIN_K || x > TYPICAL_STEFF_MAX_K => {
            report.warnings.push(format!(
                "koi_steff of {} K is outside the typical range [{}, {}]",
                x, TYPICAL_STEFF_MIN_K, TYPICAL_STEFF_MAX_K
            ))
        }
        _ => {}
    }

    report.values.insert(name.to_string(), x);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_raw() -> RawFeatures {
        let mut raw = RawFeatures::new();
        raw.insert("koi_period".into(), json!(9.488));
        raw.insert("koi_duration".into(), json!(2.9575));
        raw.insert("koi_depth".into(), json!(615.8));
        raw.insert("koi_prad".into(), json!(2.26));
        raw.insert("koi_teq".into(), json!(793.0));
        raw.insert("koi_insol".into(), json!(93.59));
        raw.insert("koi_steff".into(), json!(5455.0));
        raw
    }

    #[test]
    fn test_valid_sample_passes() {
        let report = validate(&sample_raw());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.values.len(), 7);
        assert_eq!(report.values["koi_depth"], 615.8);
    }

    #[test]
    fn test_all_missing_fields_are_listed() {
        let mut raw = sample_raw();
        raw.remove("koi_period");
        raw.remove("koi_steff");

        let report = validate(&raw);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.contains("koi_period")));
        assert!(report.errors.iter().any(|e| e.contains("koi_steff")));
    }

    #[test]
    fn test_non_numeric_value_names_the_field() {
        let mut raw = sample_raw();
        raw.insert("koi_prad".into(), json!("2.26"));

        let report = validate(&raw);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("koi_prad"));
        assert!(report.errors[0].contains("must be a number"));
    }

    #[test]
    fn test_null_value_is_rejected() {
        let mut raw = sample_raw();
        raw.insert("koi_teq".into(), Value::Null);

        let report = validate(&raw);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("koi_teq"));
    }

    #[test]
    fn test_nan_fails_as_structural_error() {
        let mut report = ValidationReport::default();
        check_numeric("koi_period", f64::NAN, &mut report);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("finite"));
        assert!(report.values.is_empty());
    }

    #[test]
    fn test_infinity_fails_as_structural_error() {
        let mut report = ValidationReport::default();
        check_numeric("koi_depth", f64::INFINITY, &mut report);
        check_numeric("koi_prad", f64::NEG_INFINITY, &mut report);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_negative_value_warns_but_does_not_block() {
        let mut raw = sample_raw();
        raw.insert("koi_insol".into(), json!(-5.0));

        let report = validate(&raw);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("koi_insol"));
        assert_eq!(report.values["koi_insol"], -5.0);
    }

    #[test]
    fn test_soft_bound_warnings() {
        let mut raw = sample_raw();
        raw.insert("koi_period".into(), json!(12_000.0));
        raw.insert("koi_duration".into(), json!(150.0));
        raw.insert("koi_steff".into(), json!(11_000.0));

        let report = validate(&raw);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings.iter().any(|w| w.contains("unusually long")));
        assert!(report.warnings.iter().any(|w| w.contains("typical range")));
    }

    #[test]
    fn test_cool_star_warns() {
        let mut raw = sample_raw();
        raw.insert("koi_steff".into(), json!(1_500.0));

        let report = validate(&raw);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_feature_warns() {
        let mut raw = sample_raw();
        raw.insert("koi_disposition".into(), json!("CONFIRMED"));

        let report = validate(&raw);
        assert!(report.is_valid());
        assert!(report.warnings[0].contains("koi_disposition"));
        assert!(!report.values.contains_key("koi_disposition"));
    }

    #[test]
    fn test_mixed_violations_are_all_collected() {
        let mut raw = sample_raw();
        raw.remove("koi_period");
        raw.insert("koi_duration".into(), json!(true));

        let report = validate(&raw);
        assert_eq!(report.errors.len(), 2);
    }
}
