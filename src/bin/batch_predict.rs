//! Batch prediction runner
//!
//! Reads a JSON file of samples, scores each one through the same pipeline
//! the HTTP server uses, and writes a JSON results file. Samples that carry
//! an `expected_prediction` are checked and summarized into an accuracy
//! block. A sample that fails validation is logged and skipped; the batch
//! keeps going. A missing or corrupt artifact bundle aborts the whole run.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use exoplanet_api::config::Config;
use exoplanet_api::logic::{pipeline, ArtifactStore, LabelStyle, Prediction, RawFeatures};

// ============================================================================
// FILE FORMATS
// ============================================================================

#[derive(Debug, Deserialize)]
struct BatchInput {
    predictions: Vec<BatchSample>,
}

#[derive(Debug, Deserialize)]
struct BatchSample {
    run_id: String,
    /// Optional ground truth for accuracy reporting
    #[serde(default)]
    expected_prediction: Option<u8>,
    /// Feature fields sit inline beside run_id
    #[serde(flatten)]
    features: RawFeatures,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    prediction_batch: BatchMeta,
    results: Vec<BatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<BatchSummary>,
}

#[derive(Debug, Serialize)]
struct BatchMeta {
    timestamp: String,
    total_predictions: usize,
    model_version: String,
}

#[derive(Debug, Serialize)]
struct BatchResult {
    run_id: String,
    parameters: RawFeatures,
    result: Prediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    correct: Option<bool>,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    total_tests: usize,
    correct: usize,
    incorrect: usize,
    accuracy: f64,
}

fn summarize(results: &[BatchResult]) -> Option<BatchSummary> {
    let checked: Vec<bool> = results.iter().filter_map(|r| r.correct).collect();
    if checked.is_empty() {
        return None;
    }
    let correct = checked.iter().filter(|&&c| c).count();
    Some(BatchSummary {
        total_tests: checked.len(),
        correct,
        incorrect: checked.len() - correct,
        accuracy: correct as f64 / checked.len() as f64,
    })
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let mut args = std::env::args().skip(1);
    let input_path = PathBuf::from(args.next().unwrap_or_else(|| "input.json".to_string()));
    let output_path =
        PathBuf::from(args.next().unwrap_or_else(|| "predictions_log.json".to_string()));

    // Artifact failure is fatal here; there is nothing useful a batch run
    // can do in degraded mode.
    let store = ArtifactStore::new(&config.model_dir);
    let artifacts = store
        .load()
        .with_context(|| format!("loading model artifacts from {}", config.model_dir.display()))?;
    tracing::info!(
        model_version = artifacts.classifier.version().unwrap_or("unversioned"),
        "model artifacts loaded"
    );

    let data = fs::read_to_string(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let input: BatchInput = serde_json::from_str(&data)
        .with_context(|| format!("parsing {}", input_path.display()))?;
    tracing::info!("processing {} samples", input.predictions.len());

    let mut results = Vec::with_capacity(input.predictions.len());
    for sample in input.predictions {
        match pipeline::run(&artifacts, &sample.features, LabelStyle::Standard) {
            Ok(result) => {
                let correct = sample.expected_prediction.map(|e| e == result.prediction);
                tracing::info!(
                    run_id = %sample.run_id,
                    label = %result.prediction_label,
                    confidence = result.confidence,
                    "scored"
                );
                results.push(BatchResult {
                    run_id: sample.run_id,
                    parameters: sample.features,
                    result,
                    correct,
                });
            }
            Err(e) => {
                tracing::warn!(run_id = %sample.run_id, "skipping sample: {}", e);
            }
        }
    }

    let summary = summarize(&results);
    if let Some(s) = &summary {
        tracing::info!(
            total = s.total_tests,
            correct = s.correct,
            accuracy = s.accuracy,
            "expectation check"
        );
    }

    let output = BatchOutput {
        prediction_batch: BatchMeta {
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_predictions: results.len(),
            model_version: artifacts
                .classifier
                .version()
                .unwrap_or("unversioned")
                .to_string(),
        },
        results,
        summary,
    };

    fs::write(&output_path, serde_json::to_string_pretty(&output)?)
        .with_context(|| format!("writing {}", output_path.display()))?;
    tracing::info!(
        "completed {} predictions, results in {}",
        output.prediction_batch.total_predictions,
        output_path.display()
    );

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
