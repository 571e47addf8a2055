use crate::chem::{parse_smiles, Lipinski, SmilesError};

use super::{DescriptorError, FeatureTable, ListingEntry};

/// Column names of the physicochemical table, in order.
pub const PHYSCHEM_COLUMNS: [&str; 4] = ["MW", "LogP", "NumHDonors", "NumHAcceptors"];

/// A molecule excluded because its structure could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Position in the input batch
    pub index: usize,
    /// Label of the molecule
    pub compound_id: String,
    /// SMILES as given
    pub smiles: String,
    /// Parser error
    pub reason: SmilesError,
}

/// Physicochemical descriptors of the accepted molecules plus the rejects
///
/// `table.n_rows() + rejected.len()` equals the number of input molecules.
#[derive(Debug, Clone)]
pub struct PhysChemOutcome {
    /// One row per accepted molecule, in input order
    pub table: FeatureTable,
    /// Molecules whose SMILES failed to parse, in input order
    pub rejected: Vec<Rejection>,
}

impl PhysChemOutcome {
    /// Labels of the accepted molecules
    pub fn accepted(&self) -> &[String] {
        self.table.labels()
    }
}

/// Compute MW, LogP, HBD and HBA for every entry
///
/// A parse failure excludes that molecule only; the batch always completes.
pub fn physicochemical_table(entries: &[ListingEntry]) -> Result<PhysChemOutcome, DescriptorError> {
    let mut table = FeatureTable::new(PHYSCHEM_COLUMNS.iter().map(|c| c.to_string()).collect());
    let mut rejected = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match parse_smiles(&entry.smiles) {
            Ok(mol) => {
                let props = Lipinski::compute(&mol);
                let row = vec![
                    props.molecular_weight,
                    props.logp,
                    props.h_bond_donors as f64,
                    props.h_bond_acceptors as f64,
                ];
                table.push_row(entry.label.clone(), row)?;
            }
            Err(reason) => {
                log::warn!("Skipping {} ({}): {}", entry.label, entry.smiles, reason);
                rejected.push(Rejection {
                    index,
                    compound_id: entry.label.clone(),
                    smiles: entry.smiles.clone(),
                    reason,
                });
            }
        }
    }

    Ok(PhysChemOutcome { table, rejected })
}
