use super::*;
use crate::activity::ActivityError;
use crate::chembl::{BioactivitySource, ChemblError, RawActivity, StandardValue, TargetSummary};
use crate::descriptors::{
    read_listing, DescriptorAdapter, DescriptorError, DescriptorGenerator, FingerprintScheme,
    GenerationRequest, SchemeRegistry,
};
use crate::model::TrainingSet;
use std::io::Write;
use tempfile::tempdir;

struct FixtureSource {
    zero_potency: bool,
}

fn activity(id: &str, smiles: Option<&str>, value: Option<StandardValue>) -> RawActivity {
    RawActivity {
        activity_id: None,
        molecule_chembl_id: id.to_string(),
        canonical_smiles: smiles.map(str::to_string),
        standard_type: Some("IC50".to_string()),
        standard_relation: Some("=".to_string()),
        standard_value: value,
        standard_units: Some("nM".to_string()),
        target_chembl_id: Some("CHEMBL220".to_string()),
        assay_chembl_id: None,
    }
}

impl BioactivitySource for FixtureSource {
    fn search_targets(&self, _query: &str) -> Result<Vec<TargetSummary>, ChemblError> {
        Ok(vec![
            TargetSummary {
                target_chembl_id: "CHEMBL4078".to_string(),
                pref_name: Some("Acetylcholinesterase".to_string()),
                organism: Some("Torpedo californica".to_string()),
                target_type: None,
            },
            TargetSummary {
                target_chembl_id: "CHEMBL220".to_string(),
                pref_name: Some("Acetylcholinesterase".to_string()),
                organism: Some("Homo sapiens".to_string()),
                target_type: None,
            },
        ])
    }

    fn activities(&self, target_id: &str, _standard_type: &str) -> Result<Vec<RawActivity>, ChemblError> {
        if target_id != "CHEMBL220" {
            return Ok(Vec::new());
        }
        let n = StandardValue::Number;
        let mut activities = vec![
            activity("CHEMBL1", Some("CCO"), Some(n(100.0))),
            activity("CHEMBL2", Some("c1ccccc1"), Some(StandardValue::Text("50000".to_string()))),
            activity("CHEMBL3", Some("CCN"), Some(n(5000.0))),
            activity("CHEMBL4", None, Some(n(10.0))),
            activity("CHEMBL5", Some("C1CC"), Some(n(10.0))),
            activity("CHEMBL6", Some("CC(=O)O"), Some(StandardValue::Text("abc".to_string()))),
            activity("CHEMBL7", Some("CCCl"), Some(n(1e12))),
        ];
        if self.zero_potency {
            activities.push(activity("CHEMBL8", Some("CCO"), Some(n(0.0))));
        }
        Ok(activities)
    }
}

/// Two columns: heavy-atom-ish length and a constant.
struct LengthGenerator;

impl DescriptorGenerator for LengthGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), DescriptorError> {
        let entries = read_listing(request.listing)?;
        let mut out = std::fs::File::create(request.output)?;
        writeln!(out, "Name,PubchemFP0,PubchemFP1")?;
        for entry in entries {
            writeln!(out, "{},{},1", entry.label, entry.smiles.len())?;
        }
        Ok(())
    }
}

fn builder(dir: &std::path::Path) -> DatasetBuilder<FixtureSource, LengthGenerator> {
    builder_with(dir, FixtureSource { zero_potency: false })
}

fn builder_with(dir: &std::path::Path, source: FixtureSource) -> DatasetBuilder<FixtureSource, LengthGenerator> {
    let adapter = DescriptorAdapter::new(LengthGenerator, SchemeRegistry::new(dir.join("xml")));
    DatasetBuilder::new(source, adapter, dir.join("data"))
}

#[test]
fn test_build_writes_every_table() {
    let dir = tempdir().unwrap();
    let summary = builder(dir.path()).build("acetylcholinesterase", 1, FingerprintScheme::PubChem).unwrap();

    assert_eq!(summary.target.target_chembl_id, "CHEMBL220");
    assert_eq!(summary.downloaded, 7);
    assert_eq!(summary.incomplete, 2);
    assert_eq!(summary.intermediate, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.columns, 2);

    let files = &summary.files;
    for path in [&files.raw, &files.labelled, &files.processed, &files.listing, &files.fingerprints, &files.training] {
        assert!(path.is_file(), "{} missing", path.display());
    }
    assert!(files.training.ends_with("training_PubChem.csv"));
    assert!(files.fingerprints.ends_with("PubChem_fingerprints.csv"));

    let listed: Vec<String> = read_listing(&files.listing).unwrap().into_iter().map(|e| e.label).collect();
    assert_eq!(listed, ["CHEMBL1", "CHEMBL2", "CHEMBL7"]);

    let training = TrainingSet::read_csv(&files.training, FingerprintScheme::PubChem).unwrap();
    assert_eq!(training.features().labels(), ["CHEMBL1", "CHEMBL2", "CHEMBL7"]);
    let expected = [7.0, 4.301029995663981, 1.0];
    for (got, want) in training.targets().iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn test_processed_table_has_descriptor_columns() {
    let dir = tempdir().unwrap();
    let summary = builder(dir.path()).build("ache", 1, FingerprintScheme::PubChem).unwrap();
    let text = std::fs::read_to_string(&summary.files.processed).unwrap();
    assert_eq!(
        text.lines().next().unwrap(),
        "molecule_chembl_id,canonical_smiles,bioactivity_class,MW,LogP,NumHDonors,NumHAcceptors,pIC50"
    );
    assert!(text.lines().nth(1).unwrap().starts_with("CHEMBL1,CCO,active,"));
}

#[test]
fn test_labelled_table_keeps_intermediates() {
    let dir = tempdir().unwrap();
    let summary = builder(dir.path()).build("ache", 1, FingerprintScheme::PubChem).unwrap();
    let labelled = crate::activity::BioactivityRecord::read_csv(&summary.files.labelled).unwrap();
    assert_eq!(labelled.len(), 5);
    assert!(labelled.iter().any(|r| r.compound_id == "CHEMBL3"));
}

#[test]
fn test_zero_potency_fails_the_build() {
    let dir = tempdir().unwrap();
    let err = builder_with(dir.path(), FixtureSource { zero_potency: true })
        .build("ache", 1, FingerprintScheme::PubChem)
        .unwrap_err();
    match err {
        DatasetError::InvalidPotency { compound_id, source } => {
            assert_eq!(compound_id, "CHEMBL8");
            assert!(matches!(source, ActivityError::Domain { value, .. } if value == 0.0));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("data").join("training_PubChem.csv").exists());
}

#[test]
fn test_clean_keeps_non_positive_values() {
    let dir = tempdir().unwrap();
    let source = FixtureSource { zero_potency: true };
    let raw = source.activities("CHEMBL220", "IC50").unwrap();
    let cleaned = builder_with(dir.path(), source).clean(&raw);
    assert_eq!(cleaned.incomplete, 2);
    assert!(cleaned.records.iter().any(|r| r.compound_id == "CHEMBL8"));
}

#[test]
fn test_target_without_data() {
    let dir = tempdir().unwrap();
    let err = builder(dir.path()).build("ache", 0, FingerprintScheme::PubChem).unwrap_err();
    assert!(matches!(err, DatasetError::NoRecords { stage: "download", .. }));
}

#[test]
fn test_target_index_out_of_range() {
    let dir = tempdir().unwrap();
    let err = builder(dir.path()).build("ache", 5, FingerprintScheme::PubChem).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::ChemblError(ChemblError::TargetIndex { index: 5, available: 2 })
    ));
}
