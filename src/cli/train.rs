use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use pic50::dataset::training_file_name;
use pic50::descriptors::FingerprintScheme;
use pic50::model::{ModelTrainer, TrainingSet};

use super::{ensure_file, Settings};

/// Train, show the report and keep or discard the model
pub fn run(
    settings: &Settings,
    name: &str,
    scheme: Option<FingerprintScheme>,
    training: Option<PathBuf>,
    decision: Option<bool>,
) -> Result<()> {
    let training = training.unwrap_or_else(|| {
        settings
            .layout
            .data_dir
            .join(training_file_name(scheme.unwrap_or_default()))
    });
    ensure_file(&training, "Training table")?;
    let store = settings.layout.model_store();
    // Fail on a bad name before spending time on training.
    store.paths(name)?;

    let set = TrainingSet::read_csv(&training, scheme.unwrap_or_default())
        .with_context(|| format!("Failed to read training table {}", training.display()))?;
    let detected = FingerprintScheme::detect(set.features().columns());
    let set = set.with_scheme(choose_scheme(scheme, detected, &training)?);
    let proposal = ModelTrainer::new(settings.trainer.clone())
        .propose(&set)
        .context("Training failed")?;

    println!("{}", proposal.report());
    if store.exists(name) {
        println!("A model named '{name}' already exists and will be replaced.");
    }

    let keep = match decision {
        Some(keep) => keep,
        None => {
            let stdin = io::stdin();
            confirm(stdin.lock(), io::stdout())?
        }
    };
    if keep {
        let paths = proposal.commit(&store, name).context("Failed to save model")?;
        println!("[Model saved] {}", paths.estimator.display());
        println!("[Schema saved] {}", paths.schema.display());
    } else {
        proposal.reject();
        println!("[Model rejected]");
    }
    Ok(())
}

/// Scheme recorded with the model: the requested one must agree with the columns
fn choose_scheme(
    requested: Option<FingerprintScheme>,
    detected: Option<FingerprintScheme>,
    table: &Path,
) -> Result<FingerprintScheme> {
    match (requested, detected) {
        (Some(requested), Some(detected)) if requested != detected => anyhow::bail!(
            "{} holds {detected} fingerprints, not {requested}",
            table.display()
        ),
        (Some(scheme), _) | (None, Some(scheme)) => Ok(scheme),
        (None, None) => anyhow::bail!(
            "Cannot tell the fingerprint scheme of {}; pass --scheme",
            table.display()
        ),
    }
}

/// Ask `Save model? y/n` until the answer is `y` or `n`
fn confirm<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<bool> {
    let mut line = String::new();
    loop {
        write!(output, "Save model? y/n: ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("No answer given; pass --yes or --no to decide non-interactively");
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            other => writeln!(output, "Invalid answer '{other}': please enter 'y' or 'n'")?,
        }
    }
}
