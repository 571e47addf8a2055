//! Molecular graph built by the SMILES parser.

use super::element;

/// Bond multiplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    /// Single bond
    Single,
    /// Double bond
    Double,
    /// Triple bond
    Triple,
    /// Aromatic bond (order 1.5)
    Aromatic,
}

impl BondOrder {
    /// Valence contribution in units of half bonds.
    ///
    /// Aromatic bonds count 3 so that sums stay integral.
    pub(crate) fn half_units(self) -> u32 {
        match self {
            BondOrder::Single => 2,
            BondOrder::Double => 4,
            BondOrder::Triple => 6,
            BondOrder::Aromatic => 3,
        }
    }
}

/// An atom (graph node)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Atomic number
    pub number: u8,
    /// Formal charge
    pub charge: i8,
    /// Lowercase (aromatic) atom in the input
    pub aromatic: bool,
    /// Hydrogens not present as graph nodes
    pub hydrogens: u8,
    /// Written inside `[...]`; its hydrogen count is explicit
    pub bracket: bool,
}

impl Atom {
    /// Element symbol, or `"?"` for numbers outside the element table.
    pub fn symbol(&self) -> &'static str {
        element::by_number(self.number).map_or("?", |e| e.symbol)
    }

    /// Nitrogen or oxygen.
    pub fn is_n_or_o(&self) -> bool {
        self.number == 7 || self.number == 8
    }
}

/// A bond (graph edge)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    /// First atom index
    pub a: usize,
    /// Second atom index
    pub b: usize,
    /// Bond order
    pub order: BondOrder,
}

/// Molecular graph with adjacency lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// `adjacency[i]` holds `(neighbour, bond index)` pairs
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Build a molecule from atoms and bonds.
    ///
    /// Bond endpoints must index into `atoms`.
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (index, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, index));
            adjacency[bond.b].push((bond.a, index));
        }
        Self { atoms, bonds, adjacency }
    }

    /// All atoms in input order
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds in input order
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Number of graph atoms
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of explicit neighbours of an atom
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Neighbour atoms and the bonds leading to them
    pub fn neighbours(&self, atom: usize) -> impl Iterator<Item = (&Atom, &Bond)> + '_ {
        self.adjacency[atom]
            .iter()
            .map(move |&(n, b)| (&self.atoms[n], &self.bonds[b]))
    }

    /// `(neighbour, bond index)` pairs of an atom
    pub fn links(&self, atom: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency[atom].iter().copied()
    }

    /// Hydrogens bonded to an atom, whether implicit or explicit graph nodes.
    pub fn total_hydrogens(&self, atom: usize) -> usize {
        let explicit = self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].number == 1)
            .count();
        self.atoms[atom].hydrogens as usize + explicit
    }

    /// Flags atoms that sit on at least one cycle.
    ///
    /// Terminal atoms are peeled off repeatedly; whatever survives is cyclic.
    pub fn ring_atoms(&self) -> Vec<bool> {
        let mut degree: Vec<usize> = (0..self.atom_count()).map(|i| self.degree(i)).collect();
        let mut alive = vec![true; self.atom_count()];
        let mut stack: Vec<usize> = (0..self.atom_count()).filter(|&i| degree[i] <= 1).collect();

        while let Some(atom) = stack.pop() {
            if !alive[atom] {
                continue;
            }
            alive[atom] = false;
            for &(n, _) in &self.adjacency[atom] {
                if alive[n] {
                    degree[n] -= 1;
                    if degree[n] <= 1 {
                        stack.push(n);
                    }
                }
            }
        }
        alive
    }

    /// Flags bonds that lie on a cycle.
    ///
    /// A bond is cyclic when its endpoints stay connected without it.
    pub fn ring_bonds(&self) -> Vec<bool> {
        let in_ring = self.ring_atoms();
        self.bonds
            .iter()
            .enumerate()
            .map(|(index, bond)| in_ring[bond.a] && in_ring[bond.b] && self.connected_without(bond.a, bond.b, index))
            .collect()
    }

    fn connected_without(&self, from: usize, to: usize, skipped: usize) -> bool {
        let mut seen = vec![false; self.atom_count()];
        let mut stack = vec![from];
        seen[from] = true;
        while let Some(atom) = stack.pop() {
            for &(n, b) in &self.adjacency[atom] {
                if b == skipped || seen[n] {
                    continue;
                }
                if n == to {
                    return true;
                }
                seen[n] = true;
                stack.push(n);
            }
        }
        false
    }
}
