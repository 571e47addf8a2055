//! # ChEMBL access
//!
//! Target search and IC50 activity download over the ChEMBL REST API
//! (`https://www.ebi.ac.uk/chembl/api/data`). The pipeline only depends on
//! the [`BioactivitySource`] trait; [`ChemblClient`] is the blocking HTTP
//! implementation.
//!
//! The API is not retried. Failed or empty responses produce empty or
//! partial results and a `warn` log line rather than an error.

mod client;
mod error;
mod scout;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use client::{ChemblClient, ChemblConfig, DEFAULT_BASE_URL};
pub use error::ChemblError;
pub use scout::{scout_targets, TargetActivityCount};
pub use source::{select_target, BioactivitySource};
pub use types::{RawActivity, StandardValue, TargetSummary};
