//! SMILES reader.
//!
//! Supports the organic subset, bracket atoms (isotope, chirality, hydrogen
//! count, charge, atom class), branches, ring closures including `%nn`,
//! dot-separated fragments and the aromatic lowercase forms. Stereo bond
//! markers `/` and `\` are read as single bonds.

use std::collections::HashMap;

use super::element;
use super::molecule::{Atom, Bond, BondOrder, Molecule};
use super::SmilesError;

/// Parse a SMILES string into a [`Molecule`].
///
/// Surrounding whitespace is ignored; whitespace inside the string is an error.
pub fn parse_smiles(input: &str) -> Result<Molecule, SmilesError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::Empty);
    }
    let offset = input.len() - input.trim_start().len();
    let mut parser = Parser::new(trimmed, offset);
    parser.run()?;
    parser.finish()
}

struct RingOpening {
    atom: usize,
    order: Option<BondOrder>,
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    prev: Option<usize>,
    pending: Option<(BondOrder, usize)>,
    branches: Vec<(Option<usize>, usize)>,
    rings: HashMap<u16, RingOpening>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, offset: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            offset,
            atoms: Vec::new(),
            bonds: Vec::new(),
            prev: None,
            pending: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn here(&self) -> usize {
        self.offset + self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn unexpected(&self) -> SmilesError {
        let ch = std::str::from_utf8(&self.bytes[self.pos..])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or('\u{fffd}');
        SmilesError::UnexpectedChar { ch, position: self.here() }
    }

    fn run(&mut self) -> Result<(), SmilesError> {
        while let Some(c) = self.peek() {
            match c {
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => {
                    if self.pending.is_some() || self.prev.is_none() {
                        return Err(self.unexpected());
                    }
                    let order = match c {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, self.here()));
                    self.pos += 1;
                }
                b'(' => {
                    if self.prev.is_none() || self.pending.is_some() {
                        return Err(self.unexpected());
                    }
                    self.branches.push((self.prev, self.here()));
                    self.pos += 1;
                }
                b')' => {
                    if let Some((_, at)) = self.pending {
                        return Err(SmilesError::DanglingBond(at));
                    }
                    let (anchor, _) = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnbalancedBranch(self.here()))?;
                    self.prev = anchor;
                    self.pos += 1;
                }
                b'.' => {
                    if let Some((_, at)) = self.pending {
                        return Err(SmilesError::DanglingBond(at));
                    }
                    if self.prev.is_none() {
                        return Err(self.unexpected());
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' => {
                    let start = self.here();
                    let label = (c - b'0') as u16;
                    self.pos += 1;
                    self.ring_closure(label, start)?;
                }
                b'%' => {
                    let start = self.here();
                    let digits = self.bytes.get(self.pos + 1..self.pos + 3);
                    match digits {
                        Some([a, b]) if a.is_ascii_digit() && b.is_ascii_digit() => {
                            let label = ((a - b'0') as u16) * 10 + (b - b'0') as u16;
                            self.pos += 3;
                            self.ring_closure(label, start)?;
                        }
                        _ => {
                            return Err(SmilesError::UnexpectedChar { ch: '%', position: start });
                        }
                    }
                }
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom);
                }
                _ => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom);
                }
            }
        }
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = match self.pending.take() {
                Some((order, _)) => order,
                None => self.implicit_order(prev, index),
            };
            self.bonds.push(Bond { a: prev, b: index, order });
        }
        self.pending = None;
        self.prev = Some(index);
    }

    fn implicit_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].aromatic && self.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn ring_closure(&mut self, label: u16, position: usize) -> Result<(), SmilesError> {
        let ch = char::from_digit((label % 10) as u32, 10).unwrap_or('%');
        let current = self.prev.ok_or(SmilesError::UnexpectedChar { ch, position })?;
        let order = self.pending.take().map(|(order, _)| order);

        match self.rings.remove(&label) {
            Some(opening) if opening.atom == current => {
                return Err(SmilesError::UnexpectedChar { ch, position });
            }
            Some(opening) => {
                let order = order
                    .or(opening.order)
                    .unwrap_or_else(|| self.implicit_order(opening.atom, current));
                self.bonds.push(Bond { a: opening.atom, b: current, order });
            }
            None => {
                self.rings.insert(label, RingOpening { atom: current, order });
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.here();
        let c = self.peek().ok_or(self.unexpected())?;
        let (symbol, aromatic, width) = match c {
            b'C' if self.bytes.get(self.pos + 1) == Some(&b'l') => ("Cl", false, 2),
            b'B' if self.bytes.get(self.pos + 1) == Some(&b'r') => ("Br", false, 2),
            b'B' => ("B", false, 1),
            b'C' => ("C", false, 1),
            b'N' => ("N", false, 1),
            b'O' => ("O", false, 1),
            b'P' => ("P", false, 1),
            b'S' => ("S", false, 1),
            b'F' => ("F", false, 1),
            b'I' => ("I", false, 1),
            b'b' => ("B", true, 1),
            b'c' => ("C", true, 1),
            b'n' => ("N", true, 1),
            b'o' => ("O", true, 1),
            b'p' => ("P", true, 1),
            b's' => ("S", true, 1),
            c if c.is_ascii_uppercase() => {
                let end = if self.bytes.get(self.pos + 1).is_some_and(|n| n.is_ascii_lowercase()) {
                    self.pos + 2
                } else {
                    self.pos + 1
                };
                let symbol = String::from_utf8_lossy(&self.bytes[self.pos..end]).into_owned();
                return Err(SmilesError::UnknownElement { symbol, position: start });
            }
            _ => return Err(self.unexpected()),
        };
        self.pos += width;
        let number = element::by_symbol(symbol).map_or(0, |e| e.number);
        Ok(Atom {
            number,
            charge: 0,
            aromatic,
            hydrogens: 0,
            bracket: false,
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        let start = self.here();
        self.pos += 1;

        // isotope
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }

        let (number, aromatic) = self.bracket_symbol(start)?;

        // chirality, including @TH1 / @SP2 style classes
        if self.peek() == Some(b'@') {
            while self.peek() == Some(b'@') {
                self.pos += 1;
            }
            let rest = &self.bytes[self.pos..];
            if ["TH", "AL", "SP", "TB", "OH"].iter().any(|class| rest.starts_with(class.as_bytes())) {
                self.pos += 2;
                self.read_number();
            }
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            hydrogens = self.read_number().unwrap_or(1) as u8;
        }

        let mut charge: i32 = 0;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            let unit = if sign == b'+' { 1 } else { -1 };
            self.pos += 1;
            if let Some(magnitude) = self.read_number() {
                charge = unit * magnitude as i32;
            } else {
                charge = unit;
                while self.peek() == Some(sign) {
                    charge += unit;
                    self.pos += 1;
                }
            }
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.read_number().is_none() {
                return Err(self.unexpected());
            }
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(_) => return Err(self.unexpected()),
            None => return Err(SmilesError::UnclosedBracket(start)),
        }

        Ok(Atom {
            number,
            charge: charge.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            aromatic,
            hydrogens,
            bracket: true,
        })
    }

    fn bracket_symbol(&mut self, bracket_start: usize) -> Result<(u8, bool), SmilesError> {
        let start = self.here();
        let first = match self.peek() {
            Some(c) => c,
            None => return Err(SmilesError::UnclosedBracket(bracket_start)),
        };

        if first.is_ascii_lowercase() {
            for (text, number) in [("se", 34u8), ("as", 33), ("te", 52)] {
                if self.bytes[self.pos..].starts_with(text.as_bytes()) {
                    self.pos += 2;
                    return Ok((number, true));
                }
            }
            let number = match first {
                b'b' => 5,
                b'c' => 6,
                b'n' => 7,
                b'o' => 8,
                b'p' => 15,
                b's' => 16,
                _ => return Err(self.unexpected()),
            };
            self.pos += 1;
            return Ok((number, true));
        }

        if !first.is_ascii_uppercase() {
            return Err(self.unexpected());
        }

        if let Some(&second) = self.bytes.get(self.pos + 1) {
            if second.is_ascii_lowercase() {
                let two = [first, second];
                let symbol = std::str::from_utf8(&two).unwrap_or("");
                if let Some(found) = element::by_symbol(symbol) {
                    self.pos += 2;
                    return Ok((found.number, false));
                }
            }
        }

        let one = [first];
        let symbol = std::str::from_utf8(&one).unwrap_or("");
        match element::by_symbol(symbol) {
            Some(found) => {
                self.pos += 1;
                Ok((found.number, false))
            }
            None => Err(SmilesError::UnknownElement {
                symbol: symbol.to_string(),
                position: start,
            }),
        }
    }

    fn read_number(&mut self) -> Option<u32> {
        let begin = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if begin == self.pos {
            return None;
        }
        std::str::from_utf8(&self.bytes[begin..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
    }

    fn finish(mut self) -> Result<Molecule, SmilesError> {
        if let Some((_, at)) = self.pending {
            return Err(SmilesError::DanglingBond(at));
        }
        if let Some(&(_, at)) = self.branches.last() {
            return Err(SmilesError::UnbalancedBranch(at));
        }
        if let Some(&label) = self.rings.keys().min() {
            return Err(SmilesError::UnclosedRing(label));
        }

        assign_implicit_hydrogens(&mut self.atoms, &self.bonds)?;
        Ok(Molecule::new(self.atoms, self.bonds))
    }
}

/// Fill in hydrogen counts for organic-subset atoms.
///
/// Aromatic bonds count as single bonds here; an aromatic atom gives one
/// valence unit to the ring system.
fn assign_implicit_hydrogens(atoms: &mut [Atom], bonds: &[Bond]) -> Result<(), SmilesError> {
    let mut used = vec![0u32; atoms.len()];
    for bond in bonds {
        let order = match bond.order {
            BondOrder::Aromatic => 1,
            other => other.half_units() / 2,
        };
        used[bond.a] += order;
        used[bond.b] += order;
    }

    for (index, atom) in atoms.iter_mut().enumerate() {
        if atom.bracket {
            continue;
        }
        let bonds = used[index];
        let target = element::default_valences(atom.number)
            .iter()
            .map(|&v| v as u32)
            .find(|&v| v >= bonds)
            .ok_or(SmilesError::Valence {
                atom: index,
                symbol: atom.symbol(),
                bonds,
            })?;
        let mut free = target - bonds;
        if atom.aromatic {
            free = free.saturating_sub(1);
        }
        atom.hydrogens = free as u8;
    }
    Ok(())
}
