use anyhow::{Context, Result};

use pic50::chembl::ChemblClient;
use pic50::dataset::DatasetBuilder;
use pic50::descriptors::FingerprintScheme;

use super::Settings;

/// Build the training table for the target at `index` in the search results
pub fn run(settings: &Settings, query: &str, index: usize, scheme: FingerprintScheme) -> Result<()> {
    let client = ChemblClient::new(settings.chembl.clone()).context("Failed to create ChEMBL client")?;
    let builder = DatasetBuilder::new(client, settings.adapter(), &settings.layout.data_dir)
        .with_standard_type(settings.chembl.standard_type.clone());

    let summary = builder
        .build(query, index, scheme)
        .with_context(|| format!("Failed to build the {scheme} dataset for '{query}' #{index}"))?;

    println!("{summary}");
    println!("Training table: {}", summary.files.training.display());
    Ok(())
}
