use super::client::resolve_next;
use super::types::{ActivityPage, TargetPage};
use super::*;
use crate::activity::BioactivityClass;
use reqwest::Url;
use std::collections::HashMap;

struct StaticSource {
    targets: Vec<TargetSummary>,
    counts: HashMap<&'static str, usize>,
}

impl StaticSource {
    fn new(counts: &[(&'static str, usize)]) -> Self {
        Self {
            targets: counts
                .iter()
                .map(|(id, _)| TargetSummary {
                    target_chembl_id: id.to_string(),
                    pref_name: Some(format!("{id} kinase")),
                    organism: Some("Homo sapiens".to_string()),
                    target_type: Some("SINGLE PROTEIN".to_string()),
                })
                .collect(),
            counts: counts.iter().copied().collect(),
        }
    }
}

impl BioactivitySource for StaticSource {
    fn search_targets(&self, _query: &str) -> Result<Vec<TargetSummary>, ChemblError> {
        Ok(self.targets.clone())
    }

    fn activities(&self, target_id: &str, standard_type: &str) -> Result<Vec<RawActivity>, ChemblError> {
        let n = self.counts.get(target_id).copied().unwrap_or(0);
        Ok((0..n)
            .map(|i| RawActivity {
                activity_id: Some(i as u64),
                molecule_chembl_id: format!("CHEMBL{i}"),
                canonical_smiles: Some("CCO".to_string()),
                standard_type: Some(standard_type.to_string()),
                standard_relation: Some("=".to_string()),
                standard_value: Some(StandardValue::Number(100.0)),
                standard_units: Some("nM".to_string()),
                target_chembl_id: Some(target_id.to_string()),
                assay_chembl_id: None,
            })
            .collect())
    }
}

#[test]
fn test_scout_sorts_by_count_and_keeps_ties_stable() {
    let source = StaticSource::new(&[("CHEMBL1", 4), ("CHEMBL2", 12), ("CHEMBL3", 4), ("CHEMBL4", 0)]);
    let ranked = scout_targets(&source, "kinase", "IC50", 3).unwrap();

    let order: Vec<(usize, usize)> = ranked.iter().map(|t| (t.index, t.count)).collect();
    assert_eq!(order, [(1, 12), (0, 4), (2, 4)]);
    assert_eq!(ranked[0].target_chembl_id, "CHEMBL2");
    assert!(ranked[0].to_string().contains("CHEMBL2 kinase"));
}

#[test]
fn test_scout_with_no_hits() {
    let source = StaticSource::new(&[]);
    assert!(scout_targets(&source, "nothing", "IC50", 5).unwrap().is_empty());
}

#[test]
fn test_select_target() {
    let source = StaticSource::new(&[("CHEMBL1", 1), ("CHEMBL2", 2)]);
    assert_eq!(select_target(&source, "q", 1).unwrap().target_chembl_id, "CHEMBL2");
    assert!(matches!(
        select_target(&source, "q", 2),
        Err(ChemblError::TargetIndex { index: 2, available: 2 })
    ));
    let empty = StaticSource::new(&[]);
    assert!(matches!(
        select_target(&empty, "q", 0),
        Err(ChemblError::NoTargets { .. })
    ));
}

#[test]
fn test_standard_value_accepts_numbers_and_text() {
    let values: Vec<Option<StandardValue>> =
        serde_json::from_str(r#"[12.5, "1200.0", " 3 ", "n/a", null]"#).unwrap();
    let parsed: Vec<Option<f64>> = values.iter().map(|v| v.as_ref().and_then(StandardValue::as_f64)).collect();
    assert_eq!(parsed, [Some(12.5), Some(1200.0), Some(3.0), None, None]);
}

#[test]
fn test_activity_page_decodes() {
    let json = r#"{
        "activities": [
            {"activity_id": 31863, "molecule_chembl_id": "CHEMBL113081",
             "canonical_smiles": "CC(=O)Nc1ccc(O)cc1", "standard_type": "IC50",
             "standard_relation": "=", "standard_value": "750.0", "standard_units": "nM",
             "target_chembl_id": "CHEMBL220", "assay_chembl_id": "CHEMBL641224",
             "pchembl_value": "6.12"},
            {"activity_id": 31864, "molecule_chembl_id": "CHEMBL2",
             "canonical_smiles": null, "standard_value": null}
        ],
        "page_meta": {"limit": 2, "next": "/chembl/api/data/activity.json?limit=2&offset=2",
                      "offset": 0, "previous": null, "total_count": 7}
    }"#;
    let page: ActivityPage = serde_json::from_str(json).unwrap();
    assert_eq!(page.activities.len(), 2);
    assert_eq!(page.page_meta.total_count, Some(7));

    let record = page.activities[0].to_record().unwrap();
    assert_eq!(record.compound_id, "CHEMBL113081");
    assert_eq!(record.raw_potency, 750.0);
    assert_eq!(record.label, BioactivityClass::Active);
    assert!(page.activities[1].to_record().is_none());
}

#[test]
fn test_target_page_decodes() {
    let json = r#"{"targets": [{"target_chembl_id": "CHEMBL220", "pref_name": "Acetylcholinesterase",
                   "organism": "Homo sapiens", "target_type": "SINGLE PROTEIN", "score": 17.0}],
                   "page_meta": {"next": null, "total_count": 1}}"#;
    let page: TargetPage = serde_json::from_str(json).unwrap();
    assert_eq!(page.targets[0].target_chembl_id, "CHEMBL220");
    assert!(page.page_meta.next.is_none());
}

#[test]
fn test_next_link_is_resolved_against_host() {
    let current = Url::parse("https://www.ebi.ac.uk/chembl/api/data/activity.json?limit=2").unwrap();
    let next = resolve_next(&current, "/chembl/api/data/activity.json?limit=2&offset=2").unwrap();
    assert_eq!(
        next.as_str(),
        "https://www.ebi.ac.uk/chembl/api/data/activity.json?limit=2&offset=2"
    );
}

#[test]
fn test_default_config() {
    let config = ChemblConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.standard_type, "IC50");
    assert!(ChemblClient::new(config).is_ok());
}
