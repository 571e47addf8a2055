//! # Model validation
//!
//! Integrity checks for a stored model pair, run without making predictions:
//!
//! 1. **Structure**: both `<name>.model.json` and `<name>_schema.txt` exist
//! 2. **Estimator**: the file decodes, its format version is supported and
//!    the recorded metadata is plausible
//! 3. **Schema**: the column list reads and has no repeats
//! 4. **Consistency**: the schema lists the estimator's training columns in
//!    training order
//!
//! The report groups check results by these stages and carries the pair's
//! file paths and, once the estimator decodes, its recorded scheme.
//!
//! ```rust,no_run
//! use pic50::model::ModelStore;
//! use pic50::validator::validate_model;
//!
//! let store = ModelStore::new("models");
//! let report = validate_model(&store, "ache_pubchem", None)?;
//! println!("{}", report);
//! # Ok::<(), pic50::validator::ValidationError>(())
//! ```

use crate::descriptors::FingerprintScheme;
use crate::model::{ModelError, ModelStore};

pub use report::{CheckStatus, Stage, ValidationCheck, ValidationReport};

mod checks;
mod report;

/// Errors that prevent validation from running at all
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The model name cannot address a stored pair
    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),
}

/// Validate the pair named `name`; `expected_scheme` adds a scheme check
pub fn validate_model(
    store: &ModelStore,
    name: &str,
    expected_scheme: Option<FingerprintScheme>,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(name, store.paths(name)?);

    if !checks::check_structure(&mut report) {
        return Ok(report);
    }
    let stored = checks::check_estimator(expected_scheme, &mut report);
    let schema = checks::check_schema(&mut report);
    if let (Some(stored), Some(schema)) = (stored, schema) {
        checks::check_consistency(&stored, &schema, &mut report);
    }

    log::info!(
        "Validated model '{}': {} passed, {} warnings, {} failed",
        name,
        report.success_count(),
        report.warning_count(),
        report.failure_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::FeatureTable;
    use crate::model::{ForestConfig, ModelTrainer, TrainerConfig, TrainingSet};
    use tempfile::tempdir;

    fn stored_model(dir: &std::path::Path) -> ModelStore {
        let mut table = FeatureTable::new(vec!["a".into(), "b".into(), "c".into()]);
        let mut targets = Vec::new();
        for row in 0..20usize {
            table
                .push_row(format!("m{row}"), vec![(row % 2) as f64, ((row / 2) % 2) as f64, 0.0])
                .unwrap();
            targets.push(5.0 + (row % 2) as f64);
        }
        let set = TrainingSet::new(table, targets, FingerprintScheme::Maccs).unwrap();
        let trainer = ModelTrainer::new(TrainerConfig {
            forest: ForestConfig {
                n_trees: 5,
                ..ForestConfig::default()
            },
            ..TrainerConfig::default()
        });
        let store = ModelStore::new(dir);
        trainer.propose(&set).unwrap().commit(&store, "m").unwrap();
        store
    }

    #[test]
    fn test_validation_report_display() {
        let paths = ModelStore::new("models").paths("ache").unwrap();
        let mut report = ValidationReport::new("ache", paths);
        report.scheme = Some(FingerprintScheme::PubChem);
        report.fail(Stage::Consistency, "Test check 3", "This failed");
        report.pass(Stage::Structure, "Test check 1");
        report.warn(Stage::Estimator, "Test check 2", "This is a warning");

        let output = format!("{}", report);
        assert!(output.starts_with("Model: ache\n"));
        assert!(output.contains("estimator: models/ache.model.json"));
        assert!(output.contains("schema:    models/ache_schema.txt"));
        assert!(output.contains("scheme:    PubChem"));
        assert!(output.contains("  ✓ Test check 1\n"));
        assert!(output.contains("  ⚠ Test check 2: This is a warning\n"));
        assert!(output.contains("  ✗ Test check 3: This failed\n"));
        assert!(!output.contains("\nSchema\n"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.ends_with("Validation FAILED\n"));

        // Stages render in run order whatever order checks were recorded in.
        let structure = output.find("\nStructure\n").unwrap();
        let estimator = output.find("\nEstimator\n").unwrap();
        let consistency = output.find("\nConsistency\n").unwrap();
        assert!(structure < estimator && estimator < consistency);
    }

    #[test]
    fn test_plain_render_without_colour_feature() {
        let paths = ModelStore::new("models").paths("ache").unwrap();
        let mut report = ValidationReport::new("ache", paths);
        report.pass(Stage::Structure, "Estimator file present");
        assert!(format!("{report}").contains("scheme:    unknown"));
        assert!(format!("{report}").ends_with("Validation PASSED\n"));
        #[cfg(not(feature = "colorized_output"))]
        assert_eq!(report.format_colored(), format!("{report}"));
    }

    #[test]
    fn test_valid_model_passes() {
        let dir = tempdir().unwrap();
        let store = stored_model(dir.path());
        let report = validate_model(&store, "m", Some(FingerprintScheme::Maccs)).unwrap();
        assert!(!report.has_failures(), "{report}");
        assert_eq!(report.scheme, Some(FingerprintScheme::Maccs));
        assert_eq!(report.paths, store.paths("m").unwrap());
        for stage in Stage::ALL {
            assert!(report.stage(stage).next().is_some(), "{stage:?}");
        }
        assert!(report
            .stage(Stage::Consistency)
            .any(|c| c.name == "Schema matches estimator"));
    }

    #[test]
    fn test_reordered_schema_fails_consistency() {
        let dir = tempdir().unwrap();
        let store = stored_model(dir.path());
        let schema = store.paths("m").unwrap().schema;
        let original = std::fs::read_to_string(&schema).unwrap();
        let mut reversed: Vec<&str> = original.lines().collect();
        reversed.reverse();
        std::fs::write(&schema, reversed.join("\n")).unwrap();

        let report = validate_model(&store, "m", None).unwrap();
        assert_eq!(report.failures(), ["Schema matches estimator"]);
        assert!(report.stage(Stage::Consistency).all(|c| c.status.is_failed()));
    }

    #[test]
    fn test_missing_schema_fails() {
        let dir = tempdir().unwrap();
        let store = stored_model(dir.path());
        std::fs::remove_file(store.paths("m").unwrap().schema).unwrap();

        let report = validate_model(&store, "m", None).unwrap();
        assert!(report.has_failures());
        assert_eq!(report.failures(), ["Schema file present"]);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.scheme, None);
        assert!(report.stage(Stage::Estimator).next().is_none());
    }

    #[test]
    fn test_scheme_and_width_mismatch_fail() {
        let dir = tempdir().unwrap();
        let store = stored_model(dir.path());
        std::fs::write(store.paths("m").unwrap().schema, "a\nb\nb\n").unwrap();

        let report = validate_model(&store, "m", Some(FingerprintScheme::PubChem)).unwrap();
        assert_eq!(
            report.failures(),
            ["Recorded scheme MACCS", "Schema columns unique", "Schema matches estimator"]
        );
    }

    #[test]
    fn test_garbage_estimator_fails() {
        let dir = tempdir().unwrap();
        let store = stored_model(dir.path());
        std::fs::write(store.paths("m").unwrap().estimator, "{not json").unwrap();

        let report = validate_model(&store, "m", None).unwrap();
        assert!(report
            .stage(Stage::Estimator)
            .any(|c| c.name == "Estimator decodes" && c.status.is_failed()));
        assert!(report.stage(Stage::Consistency).next().is_none());
    }

    #[test]
    fn test_invalid_name_is_an_error() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        assert!(validate_model(&store, "../escape", None).is_err());
    }
}
