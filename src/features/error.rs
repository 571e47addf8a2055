/// Errors from feature selection and schema handling
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// I/O error reading or writing a schema file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Schema columns absent from a feature table
    #[error(
        "feature table is missing {} of {expected} schema columns: {}",
        .missing.len(),
        preview(.missing)
    )]
    Mismatch {
        /// Missing column names, in schema order
        missing: Vec<String>,
        /// Schema length
        expected: usize,
    },

    /// Selection was asked to work on a table without rows
    #[error("cannot select features from an empty table")]
    EmptyTable,

    /// No column survived selection, or a schema file lists no columns
    #[error("no feature columns remain")]
    NoFeatures,
}

fn preview(names: &[String]) -> String {
    const SHOWN: usize = 8;
    if names.len() <= SHOWN {
        names.join(", ")
    } else {
        format!("{}, ... ({} more)", names[..SHOWN].join(", "), names.len() - SHOWN)
    }
}
