//! # pic50 - pIC50 regression models from ChEMBL bioactivity data
//!
//! `pic50` turns IC50 measurements for a protein target into a random-forest
//! model that predicts pIC50 for new molecules from their fingerprints.
//!
//! ## Pipeline
//!
//! 1. **Acquire** ([`chembl`]): search targets, download IC50 activities.
//! 2. **Label and normalize** ([`activity`]): active (≤ 1 µM), inactive
//!    (≥ 10 µM) or intermediate; pIC50 = `-log10(min(v, 1e8) · 1e-9)`.
//! 3. **Describe** ([`descriptors`], [`chem`]): MW, LogP, H-bond donors and
//!    acceptors in-process; fingerprints from an external batch generator
//!    (PaDEL-Descriptor) for one of twelve [`descriptors::FingerprintScheme`]s.
//! 4. **Assemble** ([`dataset`]): every intermediate table plus
//!    `training_<Scheme>.csv`.
//! 5. **Select and train** ([`features`], [`model`]): drop near-constant
//!    columns, fit a seeded forest on 80 % of the rows, report held-out R²,
//!    and persist the estimator with its feature schema only on commit.
//! 6. **Predict** ([`inference`]): fingerprint new molecules with the same
//!    scheme and project them strictly onto the stored schema.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pic50::descriptors::FingerprintScheme;
//! use pic50::model::{ModelStore, ModelTrainer, TrainerConfig, TrainingSet};
//!
//! let set = TrainingSet::read_csv("bioactivity_data/training_PubChem.csv", FingerprintScheme::PubChem)?;
//! let proposal = ModelTrainer::new(TrainerConfig::default()).propose(&set)?;
//! println!("{}", proposal.report());
//!
//! if proposal.report().test_r2 > 0.5 {
//!     proposal.commit(&ModelStore::new("models"), "ache_pubchem")?;
//! } else {
//!     proposal.reject();
//! }
//! # Ok::<(), pic50::model::ModelError>(())
//! ```
//!
//! ## Stored model layout
//!
//! ```text
//! models/
//! ├── ache_pubchem.model.json   # forest + scheme + training metadata
//! └── ache_pubchem_schema.txt   # one feature column per line, in order
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod activity;
pub mod chem;
pub mod chembl;
pub mod dataset;
pub mod descriptors;
pub mod features;
pub mod inference;
pub mod model;
pub mod validator;
mod workspace;

pub use workspace::WorkspaceLayout;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::activity::{normalize_potencies, BioactivityClass, BioactivityRecord};
    pub use crate::chem::{parse_smiles, Lipinski, Molecule};
    pub use crate::chembl::{scout_targets, BioactivitySource, ChemblClient, ChemblConfig};
    pub use crate::dataset::{DatasetBuilder, DatasetSummary};
    pub use crate::descriptors::{
        DescriptorAdapter, DescriptorGenerator, FeatureTable, FingerprintScheme, PadelDescriptor,
        SchemeRegistry,
    };
    pub use crate::features::{FeatureSchema, VarianceThreshold};
    pub use crate::inference::{InferencePipeline, PredictionReport};
    pub use crate::model::{ModelStore, ModelTrainer, TrainedModel, TrainingProposal, TrainingSet};
    pub use crate::validator::{validate_model, ValidationReport};
    pub use crate::WorkspaceLayout;
}
