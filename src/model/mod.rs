//! # pIC50 regression models
//!
//! Training is two-phase: [`ModelTrainer::propose`] selects features, splits
//! the rows (80/20, seed 42), fits a [`RandomForestRegressor`] and reports the
//! held-out R². Nothing touches disk until the caller decides:
//! [`TrainingProposal::commit`] writes the estimator/schema pair through the
//! [`ModelStore`], [`TrainingProposal::reject`] drops it.

mod error;
mod forest;
mod metrics;
mod split;
mod store;
mod trainer;


pub use error::ModelError;
pub use forest::{ForestConfig, RandomForestRegressor};
pub use metrics::{r2_score, rmse};
pub use split::{train_test_split, SplitIndices};
pub use store::{ModelMetadata, ModelPaths, ModelStore, TrainedModel, FORMAT_VERSION};
pub(crate) use store::{read_estimator, StoredEstimator};
pub use trainer::{
    ModelTrainer, TrainerConfig, TrainingProposal, TrainingReport, TrainingSet, TARGET_COLUMN,
};
