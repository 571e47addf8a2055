use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::DescriptorError;

/// One line of a molecule listing: structure first, label second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// SMILES string
    pub smiles: String,
    /// Row label carried through descriptor generation
    pub label: String,
}

impl ListingEntry {
    /// Create an entry
    pub fn new(smiles: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
            label: label.into(),
        }
    }
}

/// Write a headerless tab-delimited listing (`smiles\tlabel` per line)
pub fn write_listing<P: AsRef<Path>>(path: P, entries: &[ListingEntry]) -> Result<(), DescriptorError> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(BufWriter::new(file));

    for entry in entries {
        writer.write_record([entry.smiles.as_str(), entry.label.as_str()])?;
    }
    writer.flush()?;
    log::debug!("Wrote {} molecules to {}", entries.len(), path.as_ref().display());
    Ok(())
}

/// Read a listing written by [`write_listing`]
pub fn read_listing<P: AsRef<Path>>(path: P) -> Result<Vec<ListingEntry>, DescriptorError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .from_reader(BufReader::new(file));

    let mut entries = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match (record.get(0), record.get(1)) {
            (Some(smiles), Some(label)) => entries.push(ListingEntry::new(smiles, label)),
            _ => {
                return Err(DescriptorError::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("line {} does not have a structure and a label", line + 1),
                })
            }
        }
    }
    Ok(entries)
}
