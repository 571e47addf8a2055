//! Element table for the atoms that occur in screening compounds.

/// Static element data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Atomic number
    pub number: u8,
    /// Element symbol with standard capitalisation
    pub symbol: &'static str,
    /// Standard atomic weight (g/mol)
    pub weight: f64,
}

const fn el(number: u8, symbol: &'static str, weight: f64) -> Element {
    Element { number, symbol, weight }
}

/// Hydrogen mass used for implicit hydrogens.
pub const HYDROGEN_WEIGHT: f64 = 1.008;

static ELEMENTS: &[Element] = &[
    el(1, "H", 1.008),
    el(2, "He", 4.003),
    el(3, "Li", 6.941),
    el(4, "Be", 9.012),
    el(5, "B", 10.812),
    el(6, "C", 12.011),
    el(7, "N", 14.007),
    el(8, "O", 15.999),
    el(9, "F", 18.998),
    el(11, "Na", 22.990),
    el(12, "Mg", 24.305),
    el(13, "Al", 26.982),
    el(14, "Si", 28.086),
    el(15, "P", 30.974),
    el(16, "S", 32.067),
    el(17, "Cl", 35.453),
    el(19, "K", 39.098),
    el(20, "Ca", 40.078),
    el(22, "Ti", 47.867),
    el(24, "Cr", 51.996),
    el(25, "Mn", 54.938),
    el(26, "Fe", 55.845),
    el(27, "Co", 58.933),
    el(28, "Ni", 58.693),
    el(29, "Cu", 63.546),
    el(30, "Zn", 65.39),
    el(31, "Ga", 69.723),
    el(32, "Ge", 72.61),
    el(33, "As", 74.922),
    el(34, "Se", 78.96),
    el(35, "Br", 79.904),
    el(38, "Sr", 87.62),
    el(42, "Mo", 95.94),
    el(44, "Ru", 101.07),
    el(45, "Rh", 102.906),
    el(46, "Pd", 106.42),
    el(47, "Ag", 107.868),
    el(48, "Cd", 112.411),
    el(50, "Sn", 118.71),
    el(51, "Sb", 121.76),
    el(52, "Te", 127.6),
    el(53, "I", 126.904),
    el(56, "Ba", 137.327),
    el(64, "Gd", 157.25),
    el(74, "W", 183.84),
    el(76, "Os", 190.23),
    el(77, "Ir", 192.217),
    el(78, "Pt", 195.078),
    el(79, "Au", 196.967),
    el(80, "Hg", 200.59),
    el(81, "Tl", 204.383),
    el(82, "Pb", 207.2),
    el(83, "Bi", 208.98),
];

/// Look up an element by symbol (case-sensitive, e.g. `"Cl"`).
pub fn by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by atomic number.
pub fn by_number(number: u8) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.number == number)
}

/// Allowed valences for atoms written without brackets.
///
/// Empty for elements outside the SMILES organic subset.
pub(crate) fn default_valences(number: u8) -> &'static [u8] {
    match number {
        5 => &[3],
        6 => &[4],
        7 => &[3, 5],
        8 => &[2],
        15 => &[3, 5],
        16 => &[2, 4, 6],
        9 | 17 | 35 | 53 => &[1],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_symbol_and_number() {
        let chlorine = by_symbol("Cl").unwrap();
        assert_eq!(chlorine.number, 17);
        assert_eq!(by_number(17).unwrap().symbol, "Cl");
        assert!(by_symbol("CL").is_none());
        assert!(by_number(0).is_none());
    }

    #[test]
    fn organic_subset_valences() {
        assert_eq!(default_valences(6), &[4]);
        assert_eq!(default_valences(16), &[2, 4, 6]);
        assert!(default_valences(26).is_empty());
    }
}
