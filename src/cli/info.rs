use anyhow::{Context, Result};

use super::Settings;

const SCHEMA_PREVIEW: usize = 10;

/// Display information about a stored model
pub fn run(settings: &Settings, name: &str) -> Result<()> {
    let store = settings.layout.model_store();
    let model = store
        .load(name)
        .with_context(|| format!("Failed to load model '{name}'"))?;
    let paths = store.paths(name)?;
    let metadata = model.metadata();

    println!("Model Information");
    println!("=================");
    println!("Name: {name}");
    println!("Estimator: {}", paths.estimator.display());
    println!("Schema: {}", paths.schema.display());
    println!();

    println!("Training:");
    println!("  Scheme: {}", metadata.scheme);
    println!("  Trained at: {}", metadata.trained_at);
    println!("  Rows: {} train / {} test", metadata.n_train, metadata.n_test);
    println!("  Held-out R²: {:.4}", metadata.test_r2);
    println!();

    println!("Estimator:");
    println!("  Trees: {}", model.forest().n_trees());
    println!("  Features: {}", model.forest().n_features());
    println!();

    let columns = model.schema().columns();
    println!("Schema ({} columns):", columns.len());
    for (i, column) in columns.iter().take(SCHEMA_PREVIEW).enumerate() {
        println!("  {:3}. {}", i + 1, column);
    }
    if columns.len() > SCHEMA_PREVIEW {
        println!("  ... ({} more)", columns.len() - SCHEMA_PREVIEW);
    }

    let others: Vec<String> = store.list()?.into_iter().filter(|n| n != name).collect();
    if !others.is_empty() {
        println!();
        println!("Other models: {}", others.join(", "));
    }
    Ok(())
}
