//! # Descriptor adapter
//!
//! Bridges a list of molecules (SMILES + label) and the two feature tables the
//! pipeline consumes:
//!
//! - **Physicochemical**: `MW`, `LogP`, `NumHDonors`, `NumHAcceptors`,
//!   computed in-process. A molecule whose SMILES does not parse is reported
//!   as a [`Rejection`] and left out; the rest of the batch continues.
//! - **Fingerprints**: the molecules are written to a tab-delimited listing
//!   and handed to an external [`DescriptorGenerator`] in a single batch
//!   call. The column set is whatever the generator emits for the chosen
//!   [`FingerprintScheme`]; rows are re-aligned to listing order.

mod error;
mod generator;
mod listing;
mod physchem;
mod scheme;
mod table;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use error::DescriptorError;
pub use generator::{DescriptorGenerator, GenerationRequest, PadelConfig, PadelDescriptor};
pub use listing::{read_listing, write_listing, ListingEntry};
pub use physchem::{physicochemical_table, PhysChemOutcome, Rejection, PHYSCHEM_COLUMNS};
pub use scheme::{FingerprintScheme, SchemeRegistry};
pub use table::{FeatureTable, LABEL_COLUMN};

/// File name of a fingerprint table for a scheme
pub fn fingerprint_file_name(scheme: FingerprintScheme) -> String {
    format!("{scheme}_fingerprints.csv")
}

/// Produces physicochemical and fingerprint tables for a batch of molecules
#[derive(Debug, Clone)]
pub struct DescriptorAdapter<G> {
    generator: G,
    registry: SchemeRegistry,
}

impl<G: DescriptorGenerator> DescriptorAdapter<G> {
    /// Create an adapter over a generator and an explicit scheme table
    pub fn new(generator: G, registry: SchemeRegistry) -> Self {
        Self { generator, registry }
    }

    /// Scheme table in use
    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// Physicochemical descriptors; parse failures become rejections
    pub fn physicochemical(&self, entries: &[ListingEntry]) -> Result<PhysChemOutcome, DescriptorError> {
        let outcome = physicochemical_table(entries)?;
        log::info!(
            "Computed physicochemical descriptors for {} molecules ({} rejected)",
            outcome.table.n_rows(),
            outcome.rejected.len()
        );
        Ok(outcome)
    }

    /// Fingerprint table for `entries`, one row per entry in the same order
    ///
    /// Writes the listing to `listing`, makes one generator call producing
    /// `output`, then reads it back. A molecule missing from the output or
    /// a non-numeric cell fails the whole batch.
    pub fn fingerprints(
        &self,
        entries: &[ListingEntry],
        scheme: FingerprintScheme,
        listing: &Path,
        output: &Path,
    ) -> Result<FeatureTable, DescriptorError> {
        if entries.is_empty() {
            return Err(DescriptorError::Generation(
                "no molecules to fingerprint".to_string(),
            ));
        }
        let scheme_config = self.registry.config_path(scheme)?;

        write_listing(listing, entries)?;
        if output.exists() {
            std::fs::remove_file(output)?;
        }

        let request = GenerationRequest {
            listing,
            output,
            scheme,
            scheme_config,
        };
        self.generator.generate(&request)?;

        if !output.exists() {
            return Err(DescriptorError::Generation(format!(
                "generator did not create {}",
                output.display()
            )));
        }
        let raw = FeatureTable::read_csv(output)
            .map_err(|e| DescriptorError::Generation(format!("unusable output: {e}")))?;
        if raw.n_columns() == 0 {
            return Err(DescriptorError::Generation(format!(
                "{} has no descriptor columns",
                output.display()
            )));
        }

        let labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
        let table = raw.align_to(&labels).map_err(DescriptorError::Generation)?;

        log::info!(
            "{} fingerprints: {} molecules x {} columns",
            scheme,
            table.n_rows(),
            table.n_columns()
        );
        Ok(table)
    }
}
