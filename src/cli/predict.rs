use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use pic50::descriptors::FingerprintScheme;
use pic50::inference::InferencePipeline;

use super::{ensure_file, Settings};

/// Predict pIC50 for every molecule of `input`
pub fn run(
    settings: &Settings,
    input: &Path,
    model: &str,
    scheme: Option<FingerprintScheme>,
    output: Option<PathBuf>,
) -> Result<()> {
    ensure_file(input, "Input file")?;
    let layout = &settings.layout;
    let output = output.unwrap_or_else(|| layout.predictions_dir.clone());
    let pipeline = InferencePipeline::new(settings.adapter(), layout.model_store(), &layout.work_dir);

    info!("Predicting {} with model '{model}'", input.display());
    let (report, path) = pipeline
        .predict_file(model, scheme, input, &output)
        .with_context(|| format!("Prediction with model '{model}' failed for {}", input.display()))?;

    println!("{:<24} {:>7}  SMILES", "Molecule ID", "pIC50");
    for prediction in &report.predictions {
        println!("{:<24} {:>7.3}  {}", prediction.name, prediction.pic50, prediction.smiles);
    }
    if !report.rejected.is_empty() {
        println!();
        println!("Skipped {} molecules that could not be parsed:", report.rejected.len());
        for rejection in &report.rejected {
            println!("  {} ({}): {}", rejection.compound_id, rejection.smiles, rejection.reason);
        }
    }
    println!();
    println!("Predictions written to {}", path.display());
    Ok(())
}
