use std::collections::HashSet;

use crate::descriptors::FingerprintScheme;
use crate::features::FeatureSchema;
use crate::model::{read_estimator, ModelMetadata, StoredEstimator};

use super::{Stage, ValidationReport};

/// Both files of the pair exist; returns false when either is missing
pub(super) fn check_structure(report: &mut ValidationReport) -> bool {
    let files = [
        ("Estimator file present", report.paths.estimator.clone()),
        ("Schema file present", report.paths.schema.clone()),
    ];
    let mut present = true;
    for (name, path) in files {
        if path.is_file() {
            report.pass(Stage::Structure, name);
        } else {
            report.fail(Stage::Structure, name, format!("{} not found", path.display()));
            present = false;
        }
    }
    present
}

/// Estimator decodes and its metadata is plausible
pub(super) fn check_estimator(
    expected_scheme: Option<FingerprintScheme>,
    report: &mut ValidationReport,
) -> Option<StoredEstimator> {
    let stored = match read_estimator(&report.paths.estimator) {
        Ok(stored) => stored,
        Err(e) => {
            report.fail(Stage::Estimator, "Estimator decodes", e.to_string());
            return None;
        }
    };
    report.scheme = Some(stored.metadata.scheme);
    report.pass(
        Stage::Estimator,
        format!(
            "Estimator decodes ({} trees, {} features)",
            stored.forest.n_trees(),
            stored.forest.n_features()
        ),
    );
    check_metadata(&stored.metadata, expected_scheme, report);
    Some(stored)
}

fn check_metadata(
    metadata: &ModelMetadata,
    expected_scheme: Option<FingerprintScheme>,
    report: &mut ValidationReport,
) {
    let name = format!("Recorded scheme {}", metadata.scheme);
    match expected_scheme {
        Some(expected) if expected != metadata.scheme => {
            report.fail(Stage::Estimator, name, format!("expected {expected}"))
        }
        _ => report.pass(Stage::Estimator, name),
    }

    if chrono::DateTime::parse_from_rfc3339(&metadata.trained_at).is_ok() {
        report.pass(Stage::Estimator, "Training timestamp");
    } else {
        report.warn(
            Stage::Estimator,
            "Training timestamp",
            format!("'{}' is not an RFC 3339 date", metadata.trained_at),
        );
    }

    let name = format!("Held-out R² {:.4}", metadata.test_r2);
    if !metadata.test_r2.is_finite() {
        report.warn(Stage::Estimator, name, "not a finite number");
    } else if metadata.test_r2 < 0.0 {
        report.warn(Stage::Estimator, name, "model does worse than predicting the mean");
    } else {
        report.pass(Stage::Estimator, name);
    }
}

/// Schema file reads and lists each column once
pub(super) fn check_schema(report: &mut ValidationReport) -> Option<FeatureSchema> {
    let schema = match FeatureSchema::read(&report.paths.schema) {
        Ok(schema) => schema,
        Err(e) => {
            report.fail(Stage::Schema, "Schema readable", e.to_string());
            return None;
        }
    };
    report.pass(Stage::Schema, format!("Schema readable ({} columns)", schema.len()));

    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = schema
        .columns()
        .iter()
        .filter(|c| !seen.insert(c.as_str()))
        .map(String::as_str)
        .collect();
    if duplicates.is_empty() {
        report.pass(Stage::Schema, "Schema columns unique");
    } else {
        report.fail(
            Stage::Schema,
            "Schema columns unique",
            format!("repeated: {}", duplicates.join(", ")),
        );
    }
    Some(schema)
}

/// Schema lists the estimator's training columns in training order
pub(super) fn check_consistency(
    stored: &StoredEstimator,
    schema: &FeatureSchema,
    report: &mut ValidationReport,
) {
    match stored.schema_mismatch(schema) {
        None => report.pass(Stage::Consistency, "Schema matches estimator"),
        Some(reason) => report.fail(Stage::Consistency, "Schema matches estimator", reason),
    }
}
