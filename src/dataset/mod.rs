//! # Training dataset assembly
//!
//! [`DatasetBuilder`] runs the whole data preparation for one ChEMBL target
//! and leaves every intermediate table in the data directory:
//!
//! ```text
//! data/
//! ├── raw_bioactivity.csv         # activities as downloaded
//! ├── labelled_bioactivity.csv    # structure + value present, with class
//! ├── processed_bioactivity.csv   # active/inactive, MW, LogP, HBD, HBA, pIC50
//! ├── molecules.smi               # tab-delimited listing for the generator
//! ├── <Scheme>_fingerprints.csv   # generator output
//! └── training_<Scheme>.csv       # fingerprints + pIC50
//! ```

mod builder;
mod error;
mod summary;

#[cfg(test)]
mod tests;

pub use builder::{CleanedActivities, DatasetBuilder, ProcessedActivities, ProcessedRecord};
pub use error::DatasetError;
pub use summary::{training_file_name, DatasetFiles, DatasetSummary};
