use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{ActivityError, BioactivityClass};

/// A cleaned IC50 measurement for one compound
///
/// Column names follow the ChEMBL activity fields so that intermediate CSV
/// tables stay readable next to the raw download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioactivityRecord {
    /// Compound identifier (ChEMBL molecule id)
    #[serde(rename = "molecule_chembl_id")]
    pub compound_id: String,

    /// Canonical SMILES as reported by the source
    pub canonical_smiles: String,

    /// Raw IC50 in nM
    #[serde(rename = "standard_value")]
    pub raw_potency: f64,

    /// Class derived from `raw_potency`
    #[serde(rename = "bioactivity_class")]
    pub label: BioactivityClass,
}

impl BioactivityRecord {
    /// Create a record, deriving its label from the raw potency
    pub fn new(compound_id: impl Into<String>, canonical_smiles: impl Into<String>, raw_potency: f64) -> Self {
        Self {
            compound_id: compound_id.into(),
            canonical_smiles: canonical_smiles.into(),
            raw_potency,
            label: BioactivityClass::from_raw_potency(raw_potency),
        }
    }

    /// Read records from a CSV file written by [`BioactivityRecord::write_csv`]
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, ActivityError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read records from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Self>, ActivityError> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Write records to a CSV file
    pub fn write_csv<P: AsRef<Path>>(records: &[Self], path: P) -> Result<(), ActivityError> {
        let file = File::create(path)?;
        Self::to_writer(records, BufWriter::new(file))
    }

    /// Write records to any writer as CSV
    pub fn to_writer<W: Write>(records: &[Self], writer: W) -> Result<(), ActivityError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
