/// Errors from querying the ChEMBL REST API
#[derive(Debug, thiserror::Error)]
pub enum ChemblError {
    /// HTTP transport or client construction failure
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A URL could not be built from the configured base
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL text
        url: String,
        /// Parser message
        reason: String,
    },

    /// The target search returned nothing
    #[error("no ChEMBL targets match '{query}'")]
    NoTargets {
        /// Free-text query
        query: String,
    },

    /// A target index outside the search results
    #[error("target index {index} is out of range ({available} targets found)")]
    TargetIndex {
        /// Requested index
        index: usize,
        /// Number of search results
        available: usize,
    },
}
