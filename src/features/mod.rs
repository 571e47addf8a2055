//! # Feature selection and the persisted column schema
//!
//! At training time [`VarianceThreshold`] removes near-constant fingerprint
//! columns; the survivors, in their original relative order, form the
//! [`FeatureSchema`] stored next to the estimator. At inference the schema
//! projects a freshly generated table onto exactly those columns.

mod error;
mod schema;
mod variance;

#[cfg(test)]
mod tests;

pub use error::SchemaError;
pub use schema::FeatureSchema;
pub use variance::{column_variances, VarianceSelection, VarianceThreshold, DEFAULT_BERNOULLI_P};
