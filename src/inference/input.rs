use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::descriptors::ListingEntry;

use super::InferenceError;

/// Prefix of names given to unnamed molecules
pub const UNNAMED_PREFIX: &str = "compound_";

/// A molecule submitted for prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMolecule {
    /// Name shown in the predictions
    pub name: String,
    /// SMILES string as given
    pub smiles: String,
}

impl InputMolecule {
    /// Listing line for descriptor generation
    pub fn to_entry(&self) -> ListingEntry {
        ListingEntry::new(self.smiles.clone(), self.name.clone())
    }
}

/// Name every molecule, numbering the unnamed ones `compound_1`, `compound_2`, ...
///
/// The counter only advances on unnamed molecules, so named ones do not
/// leave gaps in the numbering.
pub fn name_molecules<I, S>(molecules: I) -> Vec<InputMolecule>
where
    I: IntoIterator<Item = (S, Option<String>)>,
    S: Into<String>,
{
    let mut counter = 0usize;
    molecules
        .into_iter()
        .map(|(smiles, name)| {
            let name = match name.filter(|n| !n.trim().is_empty()) {
                Some(name) => name,
                None => {
                    counter += 1;
                    format!("{UNNAMED_PREFIX}{counter}")
                }
            };
            InputMolecule {
                name,
                smiles: smiles.into(),
            }
        })
        .collect()
}

/// Parse a whitespace-separated `.smi` stream
///
/// The first token of a line is the SMILES; any remaining tokens are
/// concatenated into the name. Blank lines are skipped.
pub fn parse_input_molecules<R: BufRead>(reader: R) -> Result<Vec<InputMolecule>, InferenceError> {
    let mut raw = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(smiles) = tokens.next() else {
            continue;
        };
        let name: String = tokens.collect();
        raw.push((smiles.to_string(), (!name.is_empty()).then_some(name)));
    }
    Ok(name_molecules(raw))
}

/// Read and name the molecules of an input `.smi` file
pub fn read_input_molecules<P: AsRef<Path>>(path: P) -> Result<Vec<InputMolecule>, InferenceError> {
    let path = path.as_ref();
    let molecules = parse_input_molecules(BufReader::new(File::open(path)?))?;
    if molecules.is_empty() {
        return Err(InferenceError::EmptyInput(path.to_path_buf()));
    }
    log::info!("Read {} molecules from {}", molecules.len(), path.display());
    Ok(molecules)
}

/// Path of the normalised listing for an input file: `VALID_<stem>.smi` in `dir`
pub fn valid_listing_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    dir.join(format!("VALID_{stem}.smi"))
}
