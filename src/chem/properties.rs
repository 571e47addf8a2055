//! Lipinski rule-of-five descriptors.
//!
//! LogP follows the Wildman-Crippen atom typing (J. Chem. Inf. Comput. Sci.
//! 1999, 39, 868). Donor and acceptor counts use the Lipinski definitions:
//! amide nitrogens and acid hydroxyls do not accept, `[nH]` donates.

use serde::{Deserialize, Serialize};

use super::element::{self, HYDROGEN_WEIGHT};
use super::molecule::{Atom, BondOrder, Molecule};

/// The four physicochemical descriptors reported next to fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lipinski {
    /// Average molecular weight (g/mol)
    #[serde(rename = "MW")]
    pub molecular_weight: f64,
    /// Wildman-Crippen octanol/water partition coefficient
    #[serde(rename = "LogP")]
    pub logp: f64,
    /// Hydrogen-bond donor count
    #[serde(rename = "NumHDonors")]
    pub h_bond_donors: u32,
    /// Hydrogen-bond acceptor count
    #[serde(rename = "NumHAcceptors")]
    pub h_bond_acceptors: u32,
}

impl Lipinski {
    /// Compute all four descriptors.
    pub fn compute(mol: &Molecule) -> Self {
        Self {
            molecular_weight: molecular_weight(mol),
            logp: crippen_logp(mol),
            h_bond_donors: h_bond_donors(mol),
            h_bond_acceptors: h_bond_acceptors(mol),
        }
    }
}

/// Average molecular weight including implicit hydrogens.
pub fn molecular_weight(mol: &Molecule) -> f64 {
    mol.atoms()
        .iter()
        .map(|atom| {
            let heavy = element::by_number(atom.number).map_or(0.0, |e| e.weight);
            heavy + atom.hydrogens as f64 * HYDROGEN_WEIGHT
        })
        .sum()
}

/// N-H (neutral, or protonated sp3), neutral O-H and S-H, and `[nH]`.
pub fn h_bond_donors(mol: &Molecule) -> u32 {
    (0..mol.atom_count())
        .filter(|&i| {
            let atom = &mol.atoms()[i];
            let h = mol.total_hydrogens(i);
            if h == 0 {
                return false;
            }
            match atom.number {
                7 if atom.aromatic => atom.charge == 0 && h == 1,
                7 => matches!((atom.charge, half_valence(mol, i)), (0, 6) | (1, 8)),
                8 | 16 => atom.charge == 0 && h == 1,
                _ => false,
            }
        })
        .count() as u32
}

/// Lone-pair bearing O, S, N and F atoms.
///
/// Excluded: acid hydroxyls, amide-type nitrogens (`N-X=O` with a chain
/// double bond), cationic and pyrrole-type nitrogens.
pub fn h_bond_acceptors(mol: &Molecule) -> u32 {
    let typer = Typer::new(mol);
    (0..mol.atom_count()).filter(|&i| typer.is_acceptor(i)).count() as u32
}

/// Wildman-Crippen logP: one typed contribution per heavy atom and one per
/// attached hydrogen.
pub fn crippen_logp(mol: &Molecule) -> f64 {
    let typer = Typer::new(mol);
    (0..mol.atom_count())
        .filter(|&i| mol.atoms()[i].number != 1)
        .map(|i| typer.atom_logp(i) + mol.total_hydrogens(i) as f64 * typer.hydrogen_logp(i))
        .sum()
}

/// Valence in half-bond units, hydrogens included.
fn half_valence(mol: &Molecule, index: usize) -> u32 {
    let bonds: u32 = mol.neighbours(index).map(|(_, b)| b.order.half_units()).sum();
    bonds + 2 * mol.atoms()[index].hydrogens as u32
}

/// Aliphatic N, O, P, S or halogen
fn is_polar(atom: &Atom) -> bool {
    !atom.aromatic && matches!(atom.number, 7 | 8 | 9 | 15 | 16 | 17 | 35 | 53)
}

/// A heavy neighbour seen from the atom being typed
struct Link<'a> {
    index: usize,
    atom: &'a Atom,
    order: BondOrder,
    ring: bool,
}

struct Typer<'a> {
    mol: &'a Molecule,
    ring_bonds: Vec<bool>,
}

impl<'a> Typer<'a> {
    fn new(mol: &'a Molecule) -> Self {
        Self {
            mol,
            ring_bonds: mol.ring_bonds(),
        }
    }

    fn heavy(&self, index: usize) -> Vec<Link<'a>> {
        let mol = self.mol;
        mol.links(index)
            .filter(|&(n, _)| mol.atoms()[n].number != 1)
            .map(|(n, b)| Link {
                index: n,
                atom: &mol.atoms()[n],
                order: mol.bonds()[b].order,
                ring: self.ring_bonds[b],
            })
            .collect()
    }

    fn has_double_to(&self, index: usize, pred: impl Fn(&Atom) -> bool) -> bool {
        self.heavy(index)
            .iter()
            .any(|l| l.order == BondOrder::Double && pred(l.atom))
    }

    fn is_acceptor(&self, index: usize) -> bool {
        let atom = &self.mol.atoms()[index];
        let h = self.mol.total_hydrogens(index);
        match atom.number {
            9 => true,
            8 | 16 if atom.aromatic => atom.charge == 0,
            8 | 16 if atom.charge < 0 => true,
            8 | 16 if atom.charge > 0 || half_valence(self.mol, index) != 4 => false,
            8 | 16 => match h {
                0 => true,
                1 => self.heavy(index).iter().any(|l| {
                    l.order == BondOrder::Single
                        && !self.has_double_to(l.index, |a| {
                            !a.aromatic && matches!(a.number, 7 | 8 | 15 | 16)
                        })
                }),
                _ => false,
            },
            7 if atom.aromatic => atom.charge == 0 && h == 0,
            7 => {
                half_valence(self.mol, index) == 6
                    && !self.heavy(index).iter().any(|l| {
                        l.order == BondOrder::Single
                            && self.heavy(l.index).iter().any(|m| {
                                m.order == BondOrder::Double
                                    && !m.ring
                                    && !m.atom.aromatic
                                    && matches!(m.atom.number, 7 | 8 | 15 | 16)
                            })
                    })
            }
            _ => false,
        }
    }

    fn atom_logp(&self, index: usize) -> f64 {
        let atom = &self.mol.atoms()[index];
        match atom.number {
            6 if atom.aromatic => self.aromatic_carbon(index),
            6 => self.aliphatic_carbon(index),
            7 => self.nitrogen(index),
            8 => self.oxygen(index),
            9 | 17 | 35 | 53 if atom.charge < 0 => -2.996,
            9 => 0.4202,
            17 => 0.6895,
            35 => 0.8456,
            53 => 0.8857,
            15 => 0.8612,
            16 if atom.aromatic => 0.6237,
            16 if atom.charge != 0 => -0.0024,
            16 => 0.6482,
            _ => 0.0,
        }
    }

    fn aliphatic_carbon(&self, index: usize) -> f64 {
        let h = self.mol.total_hydrogens(index);
        let heavy = self.heavy(index);
        let saturated = heavy.len() + h == 4 && heavy.iter().all(|l| l.order == BondOrder::Single);

        if saturated {
            if heavy.iter().all(|l| !l.atom.aromatic) {
                return if heavy.iter().all(|l| l.atom.number == 6) {
                    if h >= 2 { 0.1441 } else { 0.0 } // C1, C2
                } else if heavy.iter().any(|l| is_polar(l.atom)) {
                    if h >= 2 { -0.2035 } else { -0.2051 } // C3, C4
                } else {
                    0.2148 // C27
                };
            }
            return match h {
                3 if heavy.first().is_some_and(|l| l.atom.number == 6) => 0.08452, // C8
                3 => -0.1444,                                                      // C9
                2 => -0.0516,                                                      // C10
                1 => 0.1193,                                                       // C11
                _ => -0.0967,                                                      // C12
            };
        }

        let double_to_carbon = heavy
            .iter()
            .any(|l| l.order == BondOrder::Double && l.atom.number == 6);
        if heavy
            .iter()
            .any(|l| l.order == BondOrder::Double && !l.atom.aromatic && l.atom.number != 6)
        {
            -0.2783 // C5
        } else if double_to_carbon && heavy.iter().all(|l| !l.atom.aromatic) {
            0.1551 // C6
        } else if heavy.iter().any(|l| l.order == BondOrder::Triple) {
            0.0017 // C7
        } else if double_to_carbon {
            0.2640 // C26
        } else {
            0.08129 // CS
        }
    }

    fn aromatic_carbon(&self, index: usize) -> f64 {
        let h = self.mol.total_hydrogens(index);
        let heavy = self.heavy(index);
        let has = |number: u8| heavy.iter().any(|l| l.atom.number == number);
        let substituent = heavy.iter().find(|l| !(l.ring && l.atom.aromatic));

        if h == 0
            && heavy.iter().any(|l| {
                l.order == BondOrder::Single
                    && !l.atom.aromatic
                    && !matches!(l.atom.number, 6 | 7 | 8 | 9 | 16 | 17 | 35 | 53)
            })
        {
            return -0.5443; // C13
        }
        if has(9) {
            return 0.0; // C14
        }
        if has(17) {
            return 0.2450; // C15
        }
        if has(35) {
            return 0.1980; // C16
        }
        if has(53) {
            return 0.0; // C17
        }
        if h > 0 {
            return 0.1581; // C18
        }
        match substituent {
            None => 0.2955,                            // C19
            Some(l) if l.atom.aromatic => 0.2713,      // C20
            Some(l) if l.order == BondOrder::Double => {
                if matches!(l.atom.number, 6 | 7 | 8) { -0.8186 } else { 0.08129 } // C25
            }
            Some(l) => match l.atom.number {
                6 => 0.1360,  // C21
                7 => 0.4619,  // C22
                8 => 0.5437,  // C23
                16 => 0.1893, // C24
                _ => 0.08129, // CS
            },
        }
    }

    fn nitrogen(&self, index: usize) -> f64 {
        let atom = &self.mol.atoms()[index];
        let h = self.mol.total_hydrogens(index);
        let heavy = self.heavy(index);
        let triple = heavy.iter().any(|l| l.order == BondOrder::Triple);

        if atom.aromatic {
            return if atom.charge > 0 { -1.119 } else { -0.3239 }; // N12, N11
        }
        if atom.charge > 0 && h > 0 {
            return -1.950; // N10
        }
        if atom.charge != 0 {
            return if triple && atom.charge > 0 { 0.2887 } else { -0.3396 }; // N14, N13
        }
        if triple {
            return 0.01508; // N9
        }
        if heavy.iter().any(|l| l.order != BondOrder::Single) {
            return -0.4806; // NS
        }

        let aromatic = heavy.iter().filter(|l| l.atom.aromatic).count();
        match (h, aromatic, heavy.len() - aromatic) {
            (2, 0, 1) => -1.0190,             // N1
            (1, 0, 2) => -0.7096,             // N2
            (2, 1, 0) => -1.0270,             // N3
            (1, 1, 1) => -0.5188,             // N4
            (1, 2, 0) => 0.08387,             // N5
            (0, 0, 3) => 0.1836,              // N6
            (0, 1, 2) => -0.3187,             // N7
            (0, 2, 1) | (0, 3, 0) => -0.4458, // N8
            _ => -0.4806,                     // NS
        }
    }

    fn oxygen(&self, index: usize) -> f64 {
        let atom = &self.mol.atoms()[index];
        let heavy = self.heavy(index);

        if atom.aromatic {
            return 0.1552; // O1
        }
        if atom.charge < 0 {
            return match heavy.first() {
                Some(l) if l.atom.number == 7 => 0.0335,   // O5
                Some(l) if l.atom.number == 16 => -0.3339, // O6
                Some(l) if l.atom.number == 6 && self.has_double_to(l.index, |a| a.number == 8) => {
                    -1.326 // O12
                }
                _ => -1.189, // O7
            };
        }
        if let Some(partner) = heavy.iter().find(|l| l.order == BondOrder::Double) {
            return match partner.atom.number {
                7 | 8 => 0.0335,                       // O5
                6 if partner.atom.aromatic => 0.1788, // O8
                6 => self.carbonyl_oxygen(index, partner.index),
                _ => -0.1188, // OS
            };
        }
        if self.mol.total_hydrogens(index) > 0 {
            return -0.2893; // O2
        }
        match heavy.as_slice() {
            [a, b] if !a.atom.aromatic && !b.atom.aromatic => -0.0684, // O3
            [_, _] => -0.4195,                                         // O4
            _ => -0.1188,                                              // OS
        }
    }

    fn carbonyl_oxygen(&self, oxygen: usize, carbon: usize) -> f64 {
        let others: Vec<Link<'a>> = self
            .heavy(carbon)
            .into_iter()
            .filter(|l| l.index != oxygen)
            .collect();
        if others.iter().any(|l| l.atom.aromatic) {
            0.1129 // O10
        } else if others.len() == 2 && others.iter().all(|l| l.atom.number != 6) {
            0.4833 // O11
        } else {
            -0.1526 // O9
        }
    }

    /// Contribution of one hydrogen on `parent`
    fn hydrogen_logp(&self, parent: usize) -> f64 {
        match self.mol.atoms()[parent].number {
            6 => 0.1230, // H1
            7 => 0.2142, // H3
            8 => {
                let heavy = self.heavy(parent);
                let Some(l) = heavy.first() else {
                    return 0.1125; // HS
                };
                match l.atom.number {
                    7 => 0.2142,      // H3
                    8 | 16 => 0.2980, // H4
                    6 if l.atom.aromatic => -0.2677,
                    6 if self.has_double_to(l.index, |a| matches!(a.number, 6 | 7 | 8 | 16)) => 0.2980,
                    6 if self.heavy(l.index).iter().all(|m| m.order == BondOrder::Single) => -0.2677,
                    6 => 0.1125,
                    _ => -0.2677, // H2
                }
            }
            _ => -0.2677, // H2
        }
    }
}
