use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::activity::{
    normalize_potencies, retain_modelled, ActivityError, BioactivityClass, BioactivityRecord,
};
use crate::chembl::{select_target, BioactivitySource, RawActivity, TargetSummary};
use crate::descriptors::{
    DescriptorAdapter, DescriptorGenerator, FeatureTable, FingerprintScheme, ListingEntry,
};
use crate::model::TrainingSet;

use super::{DatasetError, DatasetFiles, DatasetSummary};

/// An active or inactive record with its descriptors and regression target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Compound identifier
    #[serde(rename = "molecule_chembl_id")]
    pub compound_id: String,
    /// Canonical SMILES
    pub canonical_smiles: String,
    /// Activity class
    #[serde(rename = "bioactivity_class")]
    pub label: BioactivityClass,
    /// Molecular weight
    #[serde(rename = "MW")]
    pub molecular_weight: f64,
    /// Crippen logP
    #[serde(rename = "LogP")]
    pub logp: f64,
    /// Hydrogen-bond donors
    #[serde(rename = "NumHDonors")]
    pub h_bond_donors: f64,
    /// Hydrogen-bond acceptors
    #[serde(rename = "NumHAcceptors")]
    pub h_bond_acceptors: f64,
    /// Regression target
    #[serde(rename = "pIC50")]
    pub pic50: f64,
}

/// Output of [`DatasetBuilder::clean`]
#[derive(Debug, Clone)]
pub struct CleanedActivities {
    /// Records with a structure and a positive value, intermediates included
    pub records: Vec<BioactivityRecord>,
    /// Raw rows dropped for a missing structure or value
    pub incomplete: usize,
}

/// Output of [`DatasetBuilder::process`]
#[derive(Debug, Clone)]
pub struct ProcessedActivities {
    /// Active and inactive records that parsed
    pub records: Vec<ProcessedRecord>,
    /// Records dropped as intermediate
    pub intermediate: usize,
    /// Records whose SMILES failed to parse
    pub rejected: usize,
}

/// Turns the activities of one target into a fingerprint training table
#[derive(Debug, Clone)]
pub struct DatasetBuilder<S, G> {
    source: S,
    adapter: DescriptorAdapter<G>,
    data_dir: PathBuf,
    standard_type: String,
}

impl<S: BioactivitySource, G: DescriptorGenerator> DatasetBuilder<S, G> {
    /// Create a builder writing under `data_dir`
    pub fn new<P: Into<PathBuf>>(source: S, adapter: DescriptorAdapter<G>, data_dir: P) -> Self {
        Self {
            source,
            adapter,
            data_dir: data_dir.into(),
            standard_type: "IC50".to_string(),
        }
    }

    /// Activity type to download (default `IC50`)
    pub fn with_standard_type(mut self, standard_type: impl Into<String>) -> Self {
        self.standard_type = standard_type.into();
        self
    }

    /// Directory receiving every table
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Download activities of `target_id` and write them to `raw`
    pub fn fetch_raw(&self, target_id: &str, raw: &Path) -> Result<Vec<RawActivity>, DatasetError> {
        let activities = self.source.activities(target_id, &self.standard_type)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(raw)?));
        for activity in &activities {
            writer.serialize(activity)?;
        }
        writer.flush()?;
        log::debug!("Wrote {} raw activities to {}", activities.len(), raw.display());
        Ok(activities)
    }

    /// Keep rows with a structure and a numeric value, labelled by class
    ///
    /// Non-positive values are kept; they fail the pIC50 transform in
    /// [`DatasetBuilder::process`].
    pub fn clean(&self, raw: &[RawActivity]) -> CleanedActivities {
        let records: Vec<BioactivityRecord> = raw.iter().filter_map(RawActivity::to_record).collect();
        let incomplete = raw.len() - records.len();
        if incomplete > 0 {
            log::warn!("Dropped {incomplete} activities without a structure or usable value");
        }
        CleanedActivities { records, incomplete }
    }

    /// Drop intermediates, compute physicochemical descriptors and pIC50
    pub fn process(&self, records: Vec<BioactivityRecord>) -> Result<ProcessedActivities, DatasetError> {
        let (kept, intermediate) = retain_modelled(records);
        log::info!("{} active/inactive records, {} intermediate dropped", kept.len(), intermediate);

        let entries: Vec<ListingEntry> = kept
            .iter()
            .map(|r| ListingEntry::new(r.canonical_smiles.clone(), r.compound_id.clone()))
            .collect();
        let physchem = self.adapter.physicochemical(&entries)?;
        let mut is_rejected = vec![false; kept.len()];
        for rejection in &physchem.rejected {
            is_rejected[rejection.index] = true;
        }
        let accepted: Vec<BioactivityRecord> = kept
            .into_iter()
            .zip(is_rejected)
            .filter_map(|(record, rejected)| (!rejected).then_some(record))
            .collect();

        let potencies: Vec<f64> = accepted.iter().map(|r| r.raw_potency).collect();
        let pic50 = normalize_potencies(&potencies).map_err(|source| match source {
            ActivityError::Domain { index, .. } => DatasetError::InvalidPotency {
                compound_id: accepted
                    .get(index)
                    .map(|r| r.compound_id.clone())
                    .unwrap_or_default(),
                source,
            },
            other => other.into(),
        })?;

        let records = accepted
            .into_iter()
            .zip(physchem.table.rows())
            .zip(pic50)
            .map(|((record, row), pic50)| ProcessedRecord {
                compound_id: record.compound_id,
                canonical_smiles: record.canonical_smiles,
                label: record.label,
                molecular_weight: row[0],
                logp: row[1],
                h_bond_donors: row[2],
                h_bond_acceptors: row[3],
                pic50,
            })
            .collect();
        Ok(ProcessedActivities {
            records,
            intermediate,
            rejected: physchem.rejected.len(),
        })
    }

    /// Fingerprint the processed records through the listing file
    pub fn fingerprint(
        &self,
        records: &[ProcessedRecord],
        scheme: FingerprintScheme,
        files: &DatasetFiles,
    ) -> Result<FeatureTable, DatasetError> {
        let entries: Vec<ListingEntry> = records
            .iter()
            .map(|r| ListingEntry::new(r.canonical_smiles.clone(), r.compound_id.clone()))
            .collect();
        let table = self
            .adapter
            .fingerprints(&entries, scheme, &files.listing, &files.fingerprints)?;
        Ok(table)
    }

    /// Search `query`, take the target at `index` and build its training table
    pub fn build(
        &self,
        query: &str,
        index: usize,
        scheme: FingerprintScheme,
    ) -> Result<DatasetSummary, DatasetError> {
        let target = select_target(&self.source, query, index)?;
        log::info!(
            "Building {} dataset for {} ({})",
            scheme,
            target.target_chembl_id,
            target.pref_name.as_deref().unwrap_or("unnamed")
        );
        self.build_for(target, scheme)
    }

    /// Build the training table of a known target
    pub fn build_for(
        &self,
        target: TargetSummary,
        scheme: FingerprintScheme,
    ) -> Result<DatasetSummary, DatasetError> {
        fs::create_dir_all(&self.data_dir)?;
        let files = DatasetFiles::new(&self.data_dir, scheme);
        let target_id = target.target_chembl_id.clone();
        let empty = |stage| DatasetError::NoRecords {
            target: target_id.clone(),
            stage,
        };

        let raw = self.fetch_raw(&target.target_chembl_id, &files.raw)?;
        if raw.is_empty() {
            return Err(empty("download"));
        }

        let cleaned = self.clean(&raw);
        BioactivityRecord::write_csv(&cleaned.records, &files.labelled)?;
        if cleaned.records.is_empty() {
            return Err(empty("cleaning"));
        }

        let processed = self.process(cleaned.records)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(&files.processed)?));
        for record in &processed.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        if processed.records.is_empty() {
            return Err(empty("labelling and parsing"));
        }

        let features = self.fingerprint(&processed.records, scheme, &files)?;
        let targets: Vec<f64> = processed.records.iter().map(|r| r.pic50).collect();
        let training = TrainingSet::new(features, targets, scheme)?;
        training.write_csv(&files.training)?;
        log::info!("Wrote training table to {}", files.training.display());

        Ok(DatasetSummary {
            target,
            scheme,
            downloaded: raw.len(),
            incomplete: cleaned.incomplete,
            intermediate: processed.intermediate,
            rejected: processed.rejected,
            rows: training.len(),
            columns: training.features().n_columns(),
            files,
        })
    }
}
