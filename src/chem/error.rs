use thiserror::Error;

/// Errors raised while parsing a SMILES string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    /// Input is empty or whitespace only
    #[error("empty SMILES string")]
    Empty,

    /// Character that cannot appear at this position
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Byte offset into the input
        position: usize,
    },

    /// Element symbol not in the element table or not allowed outside brackets
    #[error("unknown element '{symbol}' at position {position}")]
    UnknownElement {
        /// Symbol as written
        symbol: String,
        /// Byte offset into the input
        position: usize,
    },

    /// `[` without a matching `]`
    #[error("unclosed bracket atom starting at position {0}")]
    UnclosedBracket(usize),

    /// Ring-closure label opened but never closed
    #[error("ring closure {0} is never closed")]
    UnclosedRing(u16),

    /// `(` and `)` do not pair up
    #[error("unbalanced branch at position {0}")]
    UnbalancedBranch(usize),

    /// Bond symbol not followed by an atom
    #[error("bond symbol at position {0} has no atom to attach to")]
    DanglingBond(usize),

    /// Atom carries more bonds than any allowed valence
    #[error("atom {atom} ({symbol}) exceeds its allowed valence with {bonds} bonds")]
    Valence {
        /// Atom index in parse order
        atom: usize,
        /// Element symbol
        symbol: &'static str,
        /// Total bond order
        bonds: u32,
    },
}
