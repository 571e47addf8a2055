/// Errors that can occur while handling bioactivity records
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// A potency value outside the domain of the pIC50 transform
    #[error("potency {value} nM at position {index} is not positive; pIC50 is undefined")]
    Domain {
        /// Position of the offending value in the input sequence
        index: usize,
        /// The offending raw potency (nM)
        value: f64,
    },

    /// I/O error reading or writing a record table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing or serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
