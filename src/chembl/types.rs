use serde::{Deserialize, Serialize};

use crate::activity::BioactivityRecord;

/// A target returned by the free-text target search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// ChEMBL target id, e.g. `CHEMBL240`
    pub target_chembl_id: String,
    /// Preferred name
    #[serde(default)]
    pub pref_name: Option<String>,
    /// Source organism
    #[serde(default)]
    pub organism: Option<String>,
    /// Target type, e.g. `SINGLE PROTEIN`
    #[serde(default)]
    pub target_type: Option<String>,
}

/// A `standard_value` as sent by the API, which uses both numbers and strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StandardValue {
    /// Numeric value
    Number(f64),
    /// Textual value, usually a decimal number
    Text(String),
}

impl StandardValue {
    /// Numeric value, if the text parses as a finite number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StandardValue::Number(v) => Some(*v).filter(|v| v.is_finite()),
            StandardValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

/// One activity row as downloaded, before cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    /// Activity id
    #[serde(default)]
    pub activity_id: Option<u64>,
    /// Compound id
    pub molecule_chembl_id: String,
    /// Canonical SMILES of the compound
    #[serde(default)]
    pub canonical_smiles: Option<String>,
    /// Activity type, e.g. `IC50`
    #[serde(default)]
    pub standard_type: Option<String>,
    /// Relation, e.g. `=` or `>`
    #[serde(default)]
    pub standard_relation: Option<String>,
    /// Standardised value
    #[serde(default)]
    pub standard_value: Option<StandardValue>,
    /// Units of `standard_value`
    #[serde(default)]
    pub standard_units: Option<String>,
    /// Target id
    #[serde(default)]
    pub target_chembl_id: Option<String>,
    /// Assay id
    #[serde(default)]
    pub assay_chembl_id: Option<String>,
}

impl RawActivity {
    /// Cleaned record, or `None` when the structure or a numeric value is missing
    pub fn to_record(&self) -> Option<BioactivityRecord> {
        let smiles = self.canonical_smiles.as_deref().filter(|s| !s.trim().is_empty())?;
        let value = self.standard_value.as_ref()?.as_f64()?;
        Some(BioactivityRecord::new(self.molecule_chembl_id.clone(), smiles, value))
    }
}

/// Pagination block of list responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetPage {
    #[serde(default)]
    pub targets: Vec<TargetSummary>,
    #[serde(default)]
    pub page_meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityPage {
    #[serde(default)]
    pub activities: Vec<RawActivity>,
    #[serde(default)]
    pub page_meta: PageMeta,
}
