use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::descriptors::{FeatureTable, FingerprintScheme};
use crate::features::VarianceThreshold;

use super::metrics::{r2_score, rmse};
use super::split::train_test_split;
use super::store::{ModelMetadata, ModelPaths, ModelStore, TrainedModel};
use super::{ForestConfig, ModelError, RandomForestRegressor};

/// Header of the regression target column in training tables.
pub const TARGET_COLUMN: &str = "pIC50";

/// Training settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Fraction of rows held out for R²
    pub test_fraction: f64,
    /// Seed of the train/test shuffle
    pub split_seed: u64,
    /// Bernoulli `p` of the variance threshold
    pub variance_p: f64,
    /// Estimator settings
    pub forest: ForestConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split_seed: 42,
            variance_p: crate::features::DEFAULT_BERNOULLI_P,
            forest: ForestConfig::default(),
        }
    }
}

/// Fingerprint features and their pIC50 targets, row-aligned
#[derive(Debug, Clone)]
pub struct TrainingSet {
    features: FeatureTable,
    targets: Vec<f64>,
    scheme: FingerprintScheme,
}

impl TrainingSet {
    /// Bundle features with one target per row
    pub fn new(
        features: FeatureTable,
        targets: Vec<f64>,
        scheme: FingerprintScheme,
    ) -> Result<Self, ModelError> {
        if features.n_rows() != targets.len() {
            return Err(ModelError::InvalidInput(format!(
                "{} feature rows but {} targets",
                features.n_rows(),
                targets.len()
            )));
        }
        Ok(Self {
            features,
            targets,
            scheme,
        })
    }

    /// Read a training table: label column, features, then `pIC50`
    pub fn read_csv<P: AsRef<Path>>(path: P, scheme: FingerprintScheme) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let mut features = FeatureTable::read_csv(path)?;
        let targets = features.take_column(TARGET_COLUMN).ok_or_else(|| {
            ModelError::InvalidInput(format!(
                "{} has no '{TARGET_COLUMN}' column",
                path.display()
            ))
        })?;
        Self::new(features, targets, scheme)
    }

    /// Write the table read by [`TrainingSet::read_csv`]
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let mut columns = self.features.columns().to_vec();
        columns.push(TARGET_COLUMN.to_string());
        let mut table = FeatureTable::new(columns);
        for ((label, row), target) in self.features.labels().iter().zip(self.features.rows()).zip(&self.targets) {
            let mut values = row.to_vec();
            values.push(*target);
            table.push_row(label.clone(), values)?;
        }
        table.write_csv(path)?;
        Ok(())
    }

    /// Feature table
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// pIC50 targets
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Fingerprint scheme of the features
    pub fn scheme(&self) -> FingerprintScheme {
        self.scheme
    }

    /// Relabel the fingerprint scheme of the features
    pub fn with_scheme(mut self, scheme: FingerprintScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Figures shown to the operator before deciding whether to keep a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Fingerprint scheme
    pub scheme: FingerprintScheme,
    /// Rows in the training set
    pub n_samples: usize,
    /// Rows used for fitting
    pub n_train: usize,
    /// Rows held out
    pub n_test: usize,
    /// Fingerprint columns before selection
    pub n_columns: usize,
    /// Columns kept by the variance threshold
    pub n_features: usize,
    /// R² on the held-out rows
    pub test_r2: f64,
    /// RMSE on the held-out rows
    pub test_rmse: f64,
    /// R² on the fitted rows
    pub train_r2: f64,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scheme:            {}", self.scheme)?;
        writeln!(
            f,
            "Samples:           {} ({} train / {} test)",
            self.n_samples, self.n_train, self.n_test
        )?;
        writeln!(
            f,
            "Features:          {} of {} columns kept",
            self.n_features, self.n_columns
        )?;
        writeln!(f, "Train R²:          {:.4}", self.train_r2)?;
        writeln!(f, "Test R²:           {:.4}", self.test_r2)?;
        write!(f, "Test RMSE:         {:.4}", self.test_rmse)
    }
}

/// Fits pIC50 regressors on fingerprint tables
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    config: TrainerConfig,
}

impl ModelTrainer {
    /// Create a trainer
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Select features, split, fit and score; nothing is written
    ///
    /// The returned proposal must be committed to persist the model.
    pub fn propose(&self, set: &TrainingSet) -> Result<TrainingProposal, ModelError> {
        let selection = VarianceThreshold::bernoulli(self.config.variance_p).select(set.features())?;
        let projected = set.features().select(&selection.kept);
        let split = train_test_split(set.len(), self.config.test_fraction, self.config.split_seed)?;

        let gather = |rows: &[usize]| {
            let mut x = Vec::with_capacity(rows.len() * projected.n_columns());
            let mut y = Vec::with_capacity(rows.len());
            for &i in rows {
                x.extend_from_slice(projected.row(i));
                y.push(set.targets()[i]);
            }
            (x, y)
        };
        let (x_train, y_train) = gather(&split.train);
        let (x_test, y_test) = gather(&split.test);

        log::info!(
            "Fitting {} trees on {} rows x {} features",
            self.config.forest.n_trees,
            split.train.len(),
            projected.n_columns()
        );
        let forest = RandomForestRegressor::fit(&x_train, projected.n_columns(), &y_train, &self.config.forest)?;

        let test_pred = forest.predict(&x_test)?;
        let train_pred = forest.predict(&x_train)?;
        let report = TrainingReport {
            scheme: set.scheme(),
            n_samples: set.len(),
            n_train: split.train.len(),
            n_test: split.test.len(),
            n_columns: set.features().n_columns(),
            n_features: projected.n_columns(),
            test_r2: r2_score(&y_test, &test_pred),
            test_rmse: rmse(&y_test, &test_pred),
            train_r2: r2_score(&y_train, &train_pred),
        };
        log::info!("Held-out R² = {:.4}", report.test_r2);

        let metadata = ModelMetadata {
            scheme: set.scheme(),
            trained_at: chrono::Utc::now().to_rfc3339(),
            test_r2: report.test_r2,
            n_train: report.n_train,
            n_test: report.n_test,
        };
        let model = TrainedModel::new(forest, selection.schema, metadata)?;
        Ok(TrainingProposal { model, report })
    }
}

/// A fitted model awaiting an explicit keep/discard decision
#[must_use = "a proposal is only persisted by commit()"]
#[derive(Debug)]
pub struct TrainingProposal {
    model: TrainedModel,
    report: TrainingReport,
}

impl TrainingProposal {
    /// Quality figures of the fitted model
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// The fitted model
    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    /// Persist the model pair under `name`, consuming the proposal
    pub fn commit(self, store: &ModelStore, name: &str) -> Result<ModelPaths, ModelError> {
        store.save(name, &self.model)
    }

    /// Discard the model without writing anything
    pub fn reject(self) -> TrainingReport {
        log::info!("Model discarded (test R² {:.4})", self.report.test_r2);
        self.report
    }
}
