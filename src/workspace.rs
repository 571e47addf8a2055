//! Directory layout of a working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::ModelStore;

/// Where each command reads and writes its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceLayout {
    /// Downloaded and processed bioactivity tables
    pub data_dir: PathBuf,
    /// Stored model pairs
    pub model_dir: PathBuf,
    /// `<model>_predictions.csv` files
    pub predictions_dir: PathBuf,
    /// Listings and fingerprint tables of inference runs
    pub work_dir: PathBuf,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("bioactivity_data"),
            model_dir: PathBuf::from("models"),
            predictions_dir: PathBuf::from("predictions"),
            work_dir: PathBuf::from("inference_data"),
        }
    }
}

impl WorkspaceLayout {
    /// Resolve relative directories against `root`
    pub fn rooted(&self, root: &Path) -> Self {
        let under = |dir: &Path| {
            if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                root.join(dir)
            }
        };
        Self {
            data_dir: under(&self.data_dir),
            model_dir: under(&self.model_dir),
            predictions_dir: under(&self.predictions_dir),
            work_dir: under(&self.work_dir),
        }
    }

    /// Model store over `model_dir`
    pub fn model_store(&self) -> ModelStore {
        ModelStore::new(&self.model_dir)
    }
}
