//! Fingerprint schemes and their configuration table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::DescriptorError;

/// Closed set of fingerprint schemes understood by the descriptor generator
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FingerprintScheme {
    /// Atom-pair presence bits
    #[serde(rename = "AtomPairs2D")]
    AtomPairs2D,
    /// Atom-pair counts
    #[serde(rename = "AtomPairs2DCount")]
    AtomPairs2DCount,
    /// CDK path-based fingerprint
    #[serde(rename = "CDK")]
    Cdk,
    /// CDK extended fingerprint (adds ring features)
    #[serde(rename = "CDKextended")]
    CdkExtended,
    /// CDK fingerprint ignoring bond orders
    #[serde(rename = "CDKgraphonly")]
    CdkGraphOnly,
    /// E-state atom types
    #[serde(rename = "EState")]
    EState,
    /// Klekota-Roth substructure bits
    #[serde(rename = "KlekotaRoth")]
    KlekotaRoth,
    /// Klekota-Roth substructure counts
    #[serde(rename = "KlekotaRothCount")]
    KlekotaRothCount,
    /// MACCS 166 keys
    #[serde(rename = "MACCS")]
    Maccs,
    /// PubChem 881-bit substructure keys
    #[default]
    #[serde(rename = "PubChem")]
    PubChem,
    /// Laggner functional group bits
    #[serde(rename = "Substructure")]
    Substructure,
    /// Laggner functional group counts
    #[serde(rename = "SubstructureCount")]
    SubstructureCount,
}

impl FingerprintScheme {
    /// Every scheme, in registry order.
    pub const ALL: [FingerprintScheme; 12] = [
        FingerprintScheme::AtomPairs2D,
        FingerprintScheme::AtomPairs2DCount,
        FingerprintScheme::Cdk,
        FingerprintScheme::CdkExtended,
        FingerprintScheme::CdkGraphOnly,
        FingerprintScheme::EState,
        FingerprintScheme::KlekotaRoth,
        FingerprintScheme::KlekotaRothCount,
        FingerprintScheme::Maccs,
        FingerprintScheme::PubChem,
        FingerprintScheme::Substructure,
        FingerprintScheme::SubstructureCount,
    ];

    /// Canonical scheme name as used on the command line and in file names
    pub fn name(self) -> &'static str {
        match self {
            FingerprintScheme::AtomPairs2D => "AtomPairs2D",
            FingerprintScheme::AtomPairs2DCount => "AtomPairs2DCount",
            FingerprintScheme::Cdk => "CDK",
            FingerprintScheme::CdkExtended => "CDKextended",
            FingerprintScheme::CdkGraphOnly => "CDKgraphonly",
            FingerprintScheme::EState => "EState",
            FingerprintScheme::KlekotaRoth => "KlekotaRoth",
            FingerprintScheme::KlekotaRothCount => "KlekotaRothCount",
            FingerprintScheme::Maccs => "MACCS",
            FingerprintScheme::PubChem => "PubChem",
            FingerprintScheme::Substructure => "Substructure",
            FingerprintScheme::SubstructureCount => "SubstructureCount",
        }
    }

    /// Descriptor-types file shipped with PaDEL-Descriptor for this scheme
    pub fn config_file(self) -> &'static str {
        match self {
            FingerprintScheme::AtomPairs2D => "AtomPairs2DFingerprinter.xml",
            FingerprintScheme::AtomPairs2DCount => "AtomPairs2DFingerprintCount.xml",
            FingerprintScheme::Cdk => "Fingerprinter.xml",
            FingerprintScheme::CdkExtended => "ExtendedFingerprinter.xml",
            FingerprintScheme::CdkGraphOnly => "GraphOnlyFingerprinter.xml",
            FingerprintScheme::EState => "EStateFingerprinter.xml",
            FingerprintScheme::KlekotaRoth => "KlekotaRothFingerprinter.xml",
            FingerprintScheme::KlekotaRothCount => "KlekotaRothFingerprintCount.xml",
            FingerprintScheme::Maccs => "MACCSFingerprinter.xml",
            FingerprintScheme::PubChem => "PubchemFingerprinter.xml",
            FingerprintScheme::Substructure => "SubstructureFingerprinter.xml",
            FingerprintScheme::SubstructureCount => "SubstructureFingerprintCount.xml",
        }
    }

    /// Prefix of the generator's column names, followed by the bit number
    pub fn column_prefix(self) -> &'static str {
        match self {
            FingerprintScheme::AtomPairs2D => "AD2D",
            FingerprintScheme::AtomPairs2DCount => "APC2D",
            FingerprintScheme::Cdk => "FP",
            FingerprintScheme::CdkExtended => "ExtFP",
            FingerprintScheme::CdkGraphOnly => "GraphFP",
            FingerprintScheme::EState => "EStateFP",
            FingerprintScheme::KlekotaRoth => "KRFP",
            FingerprintScheme::KlekotaRothCount => "KRFPC",
            FingerprintScheme::Maccs => "MACCSFP",
            FingerprintScheme::PubChem => "PubchemFP",
            FingerprintScheme::Substructure => "SubFP",
            FingerprintScheme::SubstructureCount => "SubFPC",
        }
    }

    /// Scheme whose generator emits the column `name`
    pub fn of_column(name: &str) -> Option<Self> {
        FingerprintScheme::ALL.into_iter().find(|scheme| {
            name.strip_prefix(scheme.column_prefix())
                .is_some_and(|bit| !bit.is_empty() && bit.bytes().all(|b| b.is_ascii_digit()))
        })
    }

    /// Scheme shared by every column, if there is one
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Option<Self> {
        let (first, rest) = columns.split_first()?;
        let scheme = Self::of_column(first.as_ref())?;
        rest.iter()
            .all(|column| Self::of_column(column.as_ref()) == Some(scheme))
            .then_some(scheme)
    }
}

impl fmt::Display for FingerprintScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FingerprintScheme {
    type Err = DescriptorError;

    /// Exact names win; otherwise matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FingerprintScheme::ALL
            .iter()
            .find(|scheme| scheme.name() == s)
            .or_else(|| {
                FingerprintScheme::ALL
                    .iter()
                    .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            })
            .copied()
            .ok_or_else(|| DescriptorError::UnknownScheme { name: s.to_string() })
    }
}

/// Explicit scheme → descriptor-types file table handed to the adapter
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    entries: BTreeMap<FingerprintScheme, PathBuf>,
}

impl SchemeRegistry {
    /// Registry with every scheme mapped to its standard file inside `config_dir`
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        let dir = config_dir.as_ref();
        let entries = FingerprintScheme::ALL
            .iter()
            .map(|&scheme| (scheme, dir.join(scheme.config_file())))
            .collect();
        Self { entries }
    }

    /// Registry with no schemes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register (or override) the configuration file of one scheme
    pub fn with_entry(mut self, scheme: FingerprintScheme, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(scheme, path.into());
        self
    }

    /// Resolve a scheme name against the registered schemes
    pub fn resolve(&self, name: &str) -> Result<FingerprintScheme, DescriptorError> {
        let scheme: FingerprintScheme = name.parse()?;
        if self.entries.contains_key(&scheme) {
            Ok(scheme)
        } else {
            Err(DescriptorError::Unregistered(scheme))
        }
    }

    /// Configuration file for a scheme
    pub fn config_path(&self, scheme: FingerprintScheme) -> Result<&Path, DescriptorError> {
        self.entries
            .get(&scheme)
            .map(PathBuf::as_path)
            .ok_or(DescriptorError::Unregistered(scheme))
    }

    /// Registered schemes in registry order
    pub fn schemes(&self) -> impl Iterator<Item = FingerprintScheme> + '_ {
        self.entries.keys().copied()
    }
}
