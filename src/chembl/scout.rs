use serde::Serialize;
use std::fmt;

use super::{BioactivitySource, ChemblError};

/// Activity count of one search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetActivityCount {
    /// Position in the search results, usable as the `fetch` target index
    pub index: usize,
    /// ChEMBL target id
    pub target_chembl_id: String,
    /// Preferred name, when the service has one
    pub pref_name: Option<String>,
    /// Number of matching activity records
    pub count: usize,
}

impl fmt::Display for TargetActivityCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:<14} {:>7}  {}",
            self.index,
            self.target_chembl_id,
            self.count,
            self.pref_name.as_deref().unwrap_or("-")
        )
    }
}

/// Rank the targets matching `query` by how many activities they have
///
/// Returns at most `top` entries, largest count first. Targets with equal
/// counts keep their search order.
pub fn scout_targets<S: BioactivitySource>(
    source: &S,
    query: &str,
    standard_type: &str,
    top: usize,
) -> Result<Vec<TargetActivityCount>, ChemblError> {
    let targets = source.search_targets(query)?;
    let mut counts = Vec::with_capacity(targets.len());
    for (index, target) in targets.into_iter().enumerate() {
        let count = source.count_activities(&target.target_chembl_id, standard_type)?;
        log::debug!("{} has {count} {standard_type} activities", target.target_chembl_id);
        counts.push(TargetActivityCount {
            index,
            target_chembl_id: target.target_chembl_id,
            pref_name: target.pref_name,
            count,
        });
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top);
    Ok(counts)
}
