use crate::descriptors::FeatureTable;

use super::{FeatureSchema, SchemaError};

/// Fraction of identical values above which a binary column counts as near-constant.
pub const DEFAULT_BERNOULLI_P: f64 = 0.8;

/// Drops columns whose variance does not exceed a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceThreshold {
    threshold: f64,
}

/// Result of a selection pass
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceSelection {
    /// Surviving column names in original order
    pub schema: FeatureSchema,
    /// Indices of the surviving columns in the input table
    pub kept: Vec<usize>,
    /// Names of the removed columns
    pub dropped: Vec<String>,
    /// Population variance of every input column
    pub variances: Vec<f64>,
}

impl VarianceThreshold {
    /// Keep columns with variance strictly above `threshold`
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Threshold `p * (1 - p)`, the variance of a Bernoulli(p) column
    pub fn bernoulli(p: f64) -> Self {
        Self::new(p * (1.0 - p))
    }

    /// Threshold value
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Choose the surviving columns of `table`
    pub fn select(&self, table: &FeatureTable) -> Result<VarianceSelection, SchemaError> {
        if table.is_empty() {
            return Err(SchemaError::EmptyTable);
        }

        let variances = column_variances(table);
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        for (index, (&variance, name)) in variances.iter().zip(table.columns()).enumerate() {
            if variance > self.threshold {
                kept.push(index);
            } else {
                dropped.push(name.clone());
            }
        }

        if kept.is_empty() {
            return Err(SchemaError::NoFeatures);
        }

        log::info!(
            "Variance threshold {:.4}: kept {} of {} columns",
            self.threshold,
            kept.len(),
            table.n_columns()
        );

        let schema = FeatureSchema::new(kept.iter().map(|&i| table.columns()[i].clone()).collect());
        Ok(VarianceSelection {
            schema,
            kept,
            dropped,
            variances,
        })
    }
}

impl Default for VarianceThreshold {
    fn default() -> Self {
        Self::bernoulli(DEFAULT_BERNOULLI_P)
    }
}

/// Population variance of each column (two-pass)
pub fn column_variances(table: &FeatureTable) -> Vec<f64> {
    let n = table.n_rows() as f64;
    let mut means = vec![0.0; table.n_columns()];
    for row in table.rows() {
        for (mean, value) in means.iter_mut().zip(row) {
            *mean += value;
        }
    }
    for mean in &mut means {
        *mean /= n;
    }

    let mut variances = vec![0.0; table.n_columns()];
    for row in table.rows() {
        for ((var, value), mean) in variances.iter_mut().zip(row).zip(&means) {
            let d = value - mean;
            *var += d * d;
        }
    }
    for var in &mut variances {
        *var /= n;
    }
    variances
}
