use std::path::PathBuf;

use crate::descriptors::DescriptorError;
use crate::features::SchemaError;
use crate::model::ModelError;

/// Errors from predicting pIC50 for new molecules
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// I/O error on the input or output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Predictions file could not be written
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Descriptor generation failed
    #[error("Descriptor error: {0}")]
    DescriptorError(#[from] DescriptorError),

    /// Model could not be loaded or applied
    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),

    /// Generated features do not cover the persisted schema
    #[error("features do not match schema {}: {source}", .schema.display())]
    SchemaMismatch {
        /// Schema file of the model
        schema: PathBuf,
        /// Projection failure
        #[source]
        source: SchemaError,
    },

    /// Input file holds no molecules
    #[error("no molecules in {}", .0.display())]
    EmptyInput(PathBuf),

    /// Every input molecule was rejected
    #[error("none of the {0} input molecules could be parsed")]
    NoValidMolecules(usize),
}
