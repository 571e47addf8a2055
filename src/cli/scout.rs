use anyhow::{Context, Result};
use log::info;

use pic50::chembl::{scout_targets, ChemblClient};

use super::Settings;

/// Rank matching targets by IC50 record count
pub fn run(settings: &Settings, query: &str, top: usize) -> Result<()> {
    let client = ChemblClient::new(settings.chembl.clone()).context("Failed to create ChEMBL client")?;
    info!("Scouting ChEMBL targets for '{query}'");

    let ranked = scout_targets(&client, query, &settings.chembl.standard_type, top)
        .with_context(|| format!("Failed to scout targets for '{query}'"))?;
    if ranked.is_empty() {
        println!("No targets found for '{query}'");
        return Ok(());
    }

    println!("{:>4}  {:<14} {:>7}  Name", "Idx", "Target", "Records");
    for target in &ranked {
        println!("{target}");
    }
    Ok(())
}
