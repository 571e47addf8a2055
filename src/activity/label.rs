use serde::{Deserialize, Serialize};
use std::fmt;

use super::BioactivityRecord;

/// Raw potencies at or below this value (nM) are labelled active.
pub const ACTIVE_CEILING_NM: f64 = 1_000.0;

/// Raw potencies at or above this value (nM) are labelled inactive.
pub const INACTIVE_FLOOR_NM: f64 = 10_000.0;

/// Activity class derived from a raw IC50 measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BioactivityClass {
    /// IC50 ≤ 1 µM
    Active,
    /// IC50 ≥ 10 µM
    Inactive,
    /// Anything in between; excluded from model training
    Intermediate,
}

impl BioactivityClass {
    /// Classify a raw (unclipped) potency in nM.
    pub fn from_raw_potency(value_nm: f64) -> Self {
        if value_nm >= INACTIVE_FLOOR_NM {
            BioactivityClass::Inactive
        } else if value_nm <= ACTIVE_CEILING_NM {
            BioactivityClass::Active
        } else {
            BioactivityClass::Intermediate
        }
    }

    /// Whether records of this class take part in model training.
    pub fn is_modelled(&self) -> bool {
        !matches!(self, BioactivityClass::Intermediate)
    }

    /// Lowercase label as written to CSV tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            BioactivityClass::Active => "active",
            BioactivityClass::Inactive => "inactive",
            BioactivityClass::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for BioactivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop intermediate records, keeping the relative order of the rest.
///
/// Returns the kept records and the number dropped.
pub fn retain_modelled(records: Vec<BioactivityRecord>) -> (Vec<BioactivityRecord>, usize) {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| r.label.is_modelled())
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
