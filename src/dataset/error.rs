use crate::activity::ActivityError;
use crate::chembl::ChemblError;
use crate::descriptors::DescriptorError;
use crate::model::ModelError;

/// Errors that can occur while building a training dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error writing an intermediate table
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from the bioactivity source
    #[error("ChEMBL error: {0}")]
    ChemblError(#[from] ChemblError),

    /// Error normalizing or storing bioactivity records
    #[error("Activity error: {0}")]
    ActivityError(#[from] ActivityError),

    /// A record's potency has no pIC50
    #[error("record {compound_id}: {source}")]
    InvalidPotency {
        /// Compound identifier of the record
        compound_id: String,
        /// The transform error
        #[source]
        source: ActivityError,
    },

    /// Error computing descriptors
    #[error("Descriptor error: {0}")]
    DescriptorError(#[from] DescriptorError),

    /// Error assembling the training table
    #[error("Training table error: {0}")]
    ModelError(#[from] ModelError),

    /// A stage left no records to continue with
    #[error("no records left for {target} after {stage}")]
    NoRecords {
        /// Target id
        target: String,
        /// Stage that emptied the set
        stage: &'static str,
    },
}
