//! # Molecule parsing and physicochemical descriptors
//!
//! A small SMILES reader producing a [`Molecule`] graph with implicit
//! hydrogens resolved, and the Lipinski descriptor set (MW, LogP, HBD, HBA)
//! computed from it.
//!
//! ```
//! use pic50::chem::{parse_smiles, Lipinski};
//!
//! let ethanol = parse_smiles("CCO").unwrap();
//! let props = Lipinski::compute(&ethanol);
//! assert!((props.molecular_weight - 46.069).abs() < 0.01);
//! assert_eq!(props.h_bond_donors, 1);
//! assert_eq!(props.h_bond_acceptors, 1);
//! ```

pub mod element;
mod error;
mod molecule;
mod properties;
mod smiles;

#[cfg(test)]
mod tests;

pub use error::SmilesError;
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use properties::{crippen_logp, h_bond_acceptors, h_bond_donors, molecular_weight, Lipinski};
pub use smiles::parse_smiles;
