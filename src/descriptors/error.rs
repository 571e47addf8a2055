use std::path::PathBuf;

use super::scheme::FingerprintScheme;

/// Errors raised by the descriptor adapter
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// I/O error on a listing or descriptor table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Fingerprint scheme name not in the closed set
    #[error(
        "unknown fingerprint scheme '{name}' (expected one of: {})",
        FingerprintScheme::ALL.map(|s| s.name()).join(", ")
    )]
    UnknownScheme {
        /// Name as supplied
        name: String,
    },

    /// Scheme is valid but the registry has no configuration file for it
    #[error("no descriptor configuration registered for scheme {0}")]
    Unregistered(FingerprintScheme),

    /// The external generator failed or returned unusable output
    #[error("descriptor generation failed: {0}")]
    Generation(String),

    /// A descriptor table is structurally invalid
    #[error("malformed descriptor table {path}: {reason}")]
    Malformed {
        /// Offending file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// A row does not have one value per column
    #[error("row '{label}' has {found} values but the table has {expected} columns")]
    RowWidth {
        /// Row label
        label: String,
        /// Column count
        expected: usize,
        /// Values supplied
        found: usize,
    },
}
