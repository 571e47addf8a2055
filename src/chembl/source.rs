use super::{ChemblError, RawActivity, TargetSummary};

/// Where targets and bioactivity rows come from
pub trait BioactivitySource {
    /// Targets matching a free-text query, in the service's ranking order
    fn search_targets(&self, query: &str) -> Result<Vec<TargetSummary>, ChemblError>;

    /// Every activity of `standard_type` measured against `target_id`
    fn activities(&self, target_id: &str, standard_type: &str) -> Result<Vec<RawActivity>, ChemblError>;

    /// Number of activities [`BioactivitySource::activities`] would return
    fn count_activities(&self, target_id: &str, standard_type: &str) -> Result<usize, ChemblError> {
        Ok(self.activities(target_id, standard_type)?.len())
    }
}

impl<S: BioactivitySource + ?Sized> BioactivitySource for &S {
    fn search_targets(&self, query: &str) -> Result<Vec<TargetSummary>, ChemblError> {
        (**self).search_targets(query)
    }

    fn activities(&self, target_id: &str, standard_type: &str) -> Result<Vec<RawActivity>, ChemblError> {
        (**self).activities(target_id, standard_type)
    }

    fn count_activities(&self, target_id: &str, standard_type: &str) -> Result<usize, ChemblError> {
        (**self).count_activities(target_id, standard_type)
    }
}

/// Search `query` and pick the result at `index`
pub fn select_target<S: BioactivitySource>(
    source: &S,
    query: &str,
    index: usize,
) -> Result<TargetSummary, ChemblError> {
    let mut targets = source.search_targets(query)?;
    if targets.is_empty() {
        return Err(ChemblError::NoTargets {
            query: query.to_string(),
        });
    }
    let available = targets.len();
    if index >= available {
        return Err(ChemblError::TargetIndex { index, available });
    }
    Ok(targets.swap_remove(index))
}
