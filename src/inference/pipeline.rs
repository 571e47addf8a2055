use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptors::{
    fingerprint_file_name, DescriptorAdapter, DescriptorGenerator, FingerprintScheme, ListingEntry,
    Rejection,
};
use crate::model::{ModelError, ModelStore};

use super::input::{read_input_molecules, valid_listing_path, InputMolecule};
use super::InferenceError;

/// One predicted molecule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Molecule name
    #[serde(rename = "Molecule ID")]
    pub name: String,
    /// SMILES as submitted
    #[serde(rename = "SMILES")]
    pub smiles: String,
    /// Predicted pIC50
    #[serde(rename = "pIC50")]
    pub pic50: f64,
}

/// Outcome of one prediction batch
#[derive(Debug, Clone)]
pub struct PredictionReport {
    /// Model used
    pub model: String,
    /// Fingerprint scheme used
    pub scheme: FingerprintScheme,
    /// Predictions in input order, rejected molecules left out
    pub predictions: Vec<Prediction>,
    /// Molecules whose SMILES could not be parsed
    pub rejected: Vec<Rejection>,
}

/// `<model>_predictions.csv` in `dir`
pub fn predictions_path(dir: &Path, model: &str) -> PathBuf {
    dir.join(format!("{model}_predictions.csv"))
}

/// Write predictions with the `Molecule ID,SMILES,pIC50` header
pub fn write_predictions_csv<P: AsRef<Path>>(
    path: P,
    predictions: &[Prediction],
) -> Result<(), InferenceError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for prediction in predictions {
        writer.serialize(prediction)?;
    }
    writer.flush()?;
    log::info!("Wrote {} predictions to {}", predictions.len(), path.display());
    Ok(())
}

/// Predicts pIC50 for new molecules with a stored model
#[derive(Debug, Clone)]
pub struct InferencePipeline<G> {
    adapter: DescriptorAdapter<G>,
    store: ModelStore,
    work_dir: PathBuf,
}

impl<G: DescriptorGenerator> InferencePipeline<G> {
    /// Create a pipeline; intermediate listings and fingerprints go to `work_dir`
    pub fn new<P: Into<PathBuf>>(adapter: DescriptorAdapter<G>, store: ModelStore, work_dir: P) -> Self {
        Self {
            adapter,
            store,
            work_dir: work_dir.into(),
        }
    }

    /// Model store in use
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Predict `molecules` with the model named `model`
    ///
    /// `scheme` defaults to the one the model was trained on; naming a
    /// different one is an error. Accepted molecules are written to
    /// `listing` and fingerprinted in one batch.
    pub fn run(
        &self,
        model: &str,
        scheme: Option<FingerprintScheme>,
        molecules: &[InputMolecule],
        listing: &Path,
    ) -> Result<PredictionReport, InferenceError> {
        let trained = self.store.load_for_scheme(model, scheme)?;
        let scheme = trained.scheme();

        let entries: Vec<ListingEntry> = molecules.iter().map(InputMolecule::to_entry).collect();
        let physchem = self.adapter.physicochemical(&entries)?;
        let mut is_rejected = vec![false; entries.len()];
        for rejection in &physchem.rejected {
            is_rejected[rejection.index] = true;
        }
        let accepted: Vec<&InputMolecule> = molecules
            .iter()
            .zip(&is_rejected)
            .filter(|(_, rejected)| !**rejected)
            .map(|(molecule, _)| molecule)
            .collect();
        if accepted.is_empty() {
            return Err(InferenceError::NoValidMolecules(molecules.len()));
        }

        fs::create_dir_all(&self.work_dir)?;
        let accepted_entries: Vec<ListingEntry> = accepted.iter().map(|m| m.to_entry()).collect();
        let output = self.work_dir.join(fingerprint_file_name(scheme));
        let table = self
            .adapter
            .fingerprints(&accepted_entries, scheme, listing, &output)?;

        let values = match trained.predict(&table) {
            Ok(values) => values,
            Err(ModelError::SchemaError(source)) => {
                return Err(InferenceError::SchemaMismatch {
                    schema: self.store.paths(model)?.schema,
                    source,
                })
            }
            Err(e) => return Err(e.into()),
        };

        let predictions = accepted
            .iter()
            .zip(values)
            .map(|(molecule, pic50)| Prediction {
                name: molecule.name.clone(),
                smiles: molecule.smiles.clone(),
                pic50,
            })
            .collect();
        Ok(PredictionReport {
            model: model.to_string(),
            scheme,
            predictions,
            rejected: physchem.rejected,
        })
    }

    /// Predict every molecule of an input `.smi` file and write `<model>_predictions.csv`
    ///
    /// The accepted molecules are listed in `VALID_<stem>.smi` in the work
    /// directory. Nothing is written to `output_dir` unless every step succeeds.
    pub fn predict_file(
        &self,
        model: &str,
        scheme: Option<FingerprintScheme>,
        input: &Path,
        output_dir: &Path,
    ) -> Result<(PredictionReport, PathBuf), InferenceError> {
        let molecules = read_input_molecules(input)?;
        let listing = valid_listing_path(&self.work_dir, input);
        let report = self.run(model, scheme, &molecules, &listing)?;
        for rejection in &report.rejected {
            log::warn!(
                "Skipped '{}' ({}): {}",
                rejection.compound_id,
                rejection.smiles,
                rejection.reason
            );
        }
        let path = predictions_path(output_dir, model);
        write_predictions_csv(&path, &report.predictions)?;
        Ok((report, path))
    }
}
