//! Persisted model pairs.
//!
//! A model named `name` lives in the model directory as two files written and
//! read together:
//!
//! - `<name>.model.json`: the estimator plus its training metadata
//! - `<name>_schema.txt`: the feature schema, one column per line
//!
//! The estimator file also records the ordered column list it was trained on.
//! Loading compares that list with the schema file, so a reordered or foreign
//! schema is refused instead of silently permuting the model's inputs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::descriptors::{FeatureTable, FingerprintScheme};
use crate::features::FeatureSchema;

use super::{ModelError, RandomForestRegressor};

/// Version of the estimator file layout
pub const FORMAT_VERSION: u32 = 2;

const ESTIMATOR_SUFFIX: &str = ".model.json";
const SCHEMA_SUFFIX: &str = "_schema.txt";

/// Facts recorded about a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Fingerprint scheme of the training features
    pub scheme: FingerprintScheme,
    /// RFC 3339 training timestamp
    pub trained_at: String,
    /// R² on the held-out rows
    pub test_r2: f64,
    /// Training rows
    pub n_train: usize,
    /// Held-out rows
    pub n_test: usize,
}

/// An estimator bound to the schema it was trained on
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    forest: RandomForestRegressor,
    schema: FeatureSchema,
    metadata: ModelMetadata,
}

impl TrainedModel {
    /// Pair an estimator with its schema
    pub fn new(
        forest: RandomForestRegressor,
        schema: FeatureSchema,
        metadata: ModelMetadata,
    ) -> Result<Self, ModelError> {
        if forest.n_features() != schema.len() {
            return Err(ModelError::Inconsistent {
                name: "<unsaved>".to_string(),
                reason: format!(
                    "estimator expects {} features, schema lists {}",
                    forest.n_features(),
                    schema.len()
                ),
            });
        }
        Ok(Self {
            forest,
            schema,
            metadata,
        })
    }

    /// Column contract
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Underlying estimator
    pub fn forest(&self) -> &RandomForestRegressor {
        &self.forest
    }

    /// Training metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Scheme the model was trained on
    pub fn scheme(&self) -> FingerprintScheme {
        self.metadata.scheme
    }

    /// Project `table` onto the schema and predict every row
    pub fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, ModelError> {
        let projected = self.schema.project(table)?;
        let mut matrix = Vec::with_capacity(projected.n_rows() * projected.n_columns());
        for row in projected.rows() {
            matrix.extend_from_slice(row);
        }
        self.forest.predict(&matrix)
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    format_version: u32,
    #[serde(flatten)]
    metadata: &'a ModelMetadata,
    n_features: usize,
    columns: &'a [String],
    forest: &'a RandomForestRegressor,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    #[serde(flatten)]
    metadata: ModelMetadata,
    n_features: usize,
    columns: Vec<String>,
    forest: RandomForestRegressor,
}

/// Decoded estimator file
#[derive(Debug)]
pub(crate) struct StoredEstimator {
    pub(crate) metadata: ModelMetadata,
    /// Training columns in estimator input order
    pub(crate) columns: Vec<String>,
    pub(crate) forest: RandomForestRegressor,
}

impl StoredEstimator {
    /// Describe how `schema` departs from the recorded columns, if it does
    pub(crate) fn schema_mismatch(&self, schema: &FeatureSchema) -> Option<String> {
        let listed = schema.columns();
        if listed.len() != self.columns.len() {
            return Some(format!(
                "estimator expects {} features, schema lists {}",
                self.columns.len(),
                listed.len()
            ));
        }
        self.columns
            .iter()
            .zip(listed)
            .position(|(recorded, found)| recorded != found)
            .map(|i| {
                format!(
                    "schema column {} is '{}', estimator was trained on '{}'",
                    i + 1,
                    listed[i],
                    self.columns[i]
                )
            })
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    format_version: u32,
}

/// File locations of one model pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    /// Estimator file
    pub estimator: PathBuf,
    /// Schema file
    pub schema: PathBuf,
}

/// Directory of named model pairs
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Store rooted at `dir` (created on first save)
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Model directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of the pair named `name`
    pub fn paths(&self, name: &str) -> Result<ModelPaths, ModelError> {
        validate_name(name)?;
        Ok(ModelPaths {
            estimator: self.dir.join(format!("{name}{ESTIMATOR_SUFFIX}")),
            schema: self.dir.join(format!("{name}{SCHEMA_SUFFIX}")),
        })
    }

    /// True when both files of the pair exist
    pub fn exists(&self, name: &str) -> bool {
        self.paths(name)
            .map(|p| p.estimator.is_file() && p.schema.is_file())
            .unwrap_or(false)
    }

    /// Names of all stored estimators, sorted
    pub fn list(&self) -> Result<Vec<String>, ModelError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let file_name = entry?.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(ESTIMATOR_SUFFIX)) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Write both files of a pair
    ///
    /// Each file is fully written to a temporary file in the model directory
    /// before being renamed into place, so readers never see a partial file.
    /// The estimator is renamed last; if that rename fails, the new schema
    /// no longer matches the columns recorded in the old estimator and
    /// [`ModelStore::load`] refuses the pair.
    pub fn save(&self, name: &str, model: &TrainedModel) -> Result<ModelPaths, ModelError> {
        let paths = self.paths(name)?;
        fs::create_dir_all(&self.dir)?;

        let mut schema_tmp = NamedTempFile::new_in(&self.dir)?;
        model.schema.write_to(&mut schema_tmp)?;

        let mut estimator_tmp = NamedTempFile::new_in(&self.dir)?;
        let envelope = EnvelopeOut {
            format_version: FORMAT_VERSION,
            metadata: &model.metadata,
            n_features: model.forest.n_features(),
            columns: model.schema.columns(),
            forest: &model.forest,
        };
        serde_json::to_writer(&mut estimator_tmp, &envelope)?;
        estimator_tmp.flush()?;

        schema_tmp.persist(&paths.schema).map_err(|e| ModelError::IoError(e.error))?;
        estimator_tmp
            .persist(&paths.estimator)
            .map_err(|e| ModelError::IoError(e.error))?;

        log::info!(
            "Saved model '{}' ({} features) to {}",
            name,
            model.schema.len(),
            self.dir.display()
        );
        Ok(paths)
    }

    /// Load a pair, checking that both halves exist and agree
    pub fn load(&self, name: &str) -> Result<TrainedModel, ModelError> {
        let paths = self.paths(name)?;
        for path in [&paths.estimator, &paths.schema] {
            if !path.is_file() {
                return Err(ModelError::MissingArtifact(path.clone()));
            }
        }

        let stored = read_estimator(&paths.estimator)?;

        let schema = FeatureSchema::read(&paths.schema)?;
        if let Some(reason) = stored.schema_mismatch(&schema) {
            return Err(ModelError::Inconsistent {
                name: name.to_string(),
                reason,
            });
        }

        log::debug!("Loaded model '{}' from {}", name, paths.estimator.display());
        Ok(TrainedModel {
            forest: stored.forest,
            schema,
            metadata: stored.metadata,
        })
    }

    /// Load a pair and, when `requested` is given, require its scheme to match
    pub fn load_for_scheme(
        &self,
        name: &str,
        requested: Option<FingerprintScheme>,
    ) -> Result<TrainedModel, ModelError> {
        let model = self.load(name)?;
        match requested {
            Some(requested) if requested != model.scheme() => Err(ModelError::SchemeMismatch {
                name: name.to_string(),
                trained: model.scheme(),
                requested,
            }),
            _ => Ok(model),
        }
    }
}

/// Decode an estimator file, checking its version and tree structure
pub(crate) fn read_estimator(path: &Path) -> Result<StoredEstimator, ModelError> {
    let text = fs::read_to_string(path)?;
    let header: VersionHeader = serde_json::from_str(&text)?;
    if header.format_version != FORMAT_VERSION {
        return Err(ModelError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.format_version,
            supported: FORMAT_VERSION,
        });
    }
    let envelope: EnvelopeIn = serde_json::from_str(&text)?;
    if envelope.n_features != envelope.forest.n_features() || !envelope.forest.is_well_formed() {
        return Err(ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: "tree structure does not match the recorded feature count".to_string(),
        });
    }
    if envelope.columns.len() != envelope.n_features {
        return Err(ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "{} training columns recorded for {} features",
                envelope.columns.len(),
                envelope.n_features
            ),
        });
    }
    Ok(StoredEstimator {
        metadata: envelope.metadata,
        columns: envelope.columns,
        forest: envelope.forest,
    })
}

pub(crate) fn validate_name(name: &str) -> Result<(), ModelError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}
