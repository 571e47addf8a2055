use std::path::PathBuf;

use crate::descriptors::{DescriptorError, FingerprintScheme};
use crate::features::SchemaError;

/// Errors from training, persisting and loading models
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// I/O error on a model artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Estimator file could not be encoded or decoded
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Feature selection or projection failed
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// Training table could not be read
    #[error("Descriptor table error: {0}")]
    DescriptorError(#[from] DescriptorError),

    /// Training data is unusable
    #[error("Invalid training data: {0}")]
    InvalidInput(String),

    /// Model name would escape the model directory
    #[error("Invalid model name '{0}'")]
    InvalidName(String),

    /// One half of a model pair is absent
    #[error("Missing model artifact: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// Estimator file written by an unsupported format version
    #[error("{}: format version {found} is not supported (expected {supported})", .path.display())]
    UnsupportedVersion {
        /// Estimator file
        path: PathBuf,
        /// Version in the file
        found: u32,
        /// Version this build reads
        supported: u32,
    },

    /// Estimator file decoded but its content is unusable
    #[error("{}: {reason}", .path.display())]
    Corrupt {
        /// Estimator file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Estimator and schema of a pair disagree
    #[error("model '{name}' is inconsistent: {reason}")]
    Inconsistent {
        /// Model name
        name: String,
        /// How the schema departs from the estimator
        reason: String,
    },

    /// Model was trained on a different fingerprint scheme
    #[error("model '{name}' was trained on {trained} fingerprints, not {requested}")]
    SchemeMismatch {
        /// Model name
        name: String,
        /// Scheme stored with the model
        trained: FingerprintScheme,
        /// Scheme requested by the caller
        requested: FingerprintScheme,
    },
}
