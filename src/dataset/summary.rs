use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::chembl::TargetSummary;
use crate::descriptors::{fingerprint_file_name, FingerprintScheme};

/// File names written under the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetFiles {
    /// Activities as downloaded
    pub raw: PathBuf,
    /// Cleaned activities with their class, intermediates included
    pub labelled: PathBuf,
    /// Active/inactive records with physicochemical descriptors and pIC50
    pub processed: PathBuf,
    /// Listing handed to the descriptor generator
    pub listing: PathBuf,
    /// Fingerprint table as emitted by the generator
    pub fingerprints: PathBuf,
    /// Fingerprint columns plus `pIC50`
    pub training: PathBuf,
}

impl DatasetFiles {
    /// Locations for `scheme` under `data_dir`
    pub fn new(data_dir: &Path, scheme: FingerprintScheme) -> Self {
        Self {
            raw: data_dir.join("raw_bioactivity.csv"),
            labelled: data_dir.join("labelled_bioactivity.csv"),
            processed: data_dir.join("processed_bioactivity.csv"),
            listing: data_dir.join("molecules.smi"),
            fingerprints: data_dir.join(fingerprint_file_name(scheme)),
            training: data_dir.join(training_file_name(scheme)),
        }
    }
}

/// `training_<Scheme>.csv`
pub fn training_file_name(scheme: FingerprintScheme) -> String {
    format!("training_{scheme}.csv")
}

/// Record counts of a completed dataset build
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    /// Target the data belongs to
    pub target: TargetSummary,
    /// Fingerprint scheme
    pub scheme: FingerprintScheme,
    /// Activities downloaded
    pub downloaded: usize,
    /// Activities without a structure or a usable value
    pub incomplete: usize,
    /// Records labelled intermediate
    pub intermediate: usize,
    /// Records whose SMILES could not be parsed
    pub rejected: usize,
    /// Rows in the training table
    pub rows: usize,
    /// Fingerprint columns in the training table
    pub columns: usize,
    /// Files written
    pub files: DatasetFiles,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset for {}: {} downloaded, {} incomplete, {} intermediate, {} rejected, {} rows x {} {} columns",
            self.target.target_chembl_id,
            self.downloaded,
            self.incomplete,
            self.intermediate,
            self.rejected,
            self.rows,
            self.columns,
            self.scheme
        )
    }
}
