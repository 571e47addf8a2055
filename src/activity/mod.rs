//! # Bioactivity records, potency normalization and labelling
//!
//! Raw IC50 measurements arrive in nanomolar units with a long tail of
//! extreme values. Two independent derivations are taken from the same raw
//! value:
//!
//! 1. **Label**: active (≤ 1 µM), inactive (≥ 10 µM) or intermediate. The
//!    label only gates which compounds reach training.
//! 2. **pIC50**: the regression target, `-log10(min(v, 1e8) * 1e-9)`.
//!
//! ```
//! use pic50::activity::{normalize_potencies, BioactivityClass};
//!
//! let scores = normalize_potencies(&[1.0, 1_000.0, 1e12]).unwrap();
//! assert_eq!(scores.len(), 3);
//! assert!((scores[0] - 9.0).abs() < 1e-12);
//! assert!((scores[2] - 1.0).abs() < 1e-12); // clipped to 1e8 nM
//!
//! assert_eq!(BioactivityClass::from_raw_potency(1_000.0), BioactivityClass::Active);
//! ```

mod error;
mod label;
mod normalize;
mod record;


pub use error::ActivityError;
pub use label::{retain_modelled, BioactivityClass, ACTIVE_CEILING_NM, INACTIVE_FLOOR_NM};
pub use normalize::{clip_potency, normalize_potencies, POTENCY_CLIP_NM};
pub use record::BioactivityRecord;
