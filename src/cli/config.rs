//! TOML configuration file support.
//!
//! Every value is optional; command-line flags win over the file and the
//! file wins over built-in defaults.
//!
//! ```toml
//! # pic50.toml
//! [paths]
//! root = "/srv/ache"            # relative directories below live here
//! data_dir = "bioactivity_data"
//! model_dir = "models"
//!
//! [chembl]
//! page_size = 500
//!
//! [padel]
//! jar = "/opt/padel/PaDEL-Descriptor.jar"
//! scheme_dir = "/opt/padel/fingerprints"
//! threads = 4
//!
//! [training]
//! n_trees = 200
//! split_seed = 7
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pic50::chembl::ChemblConfig;
use pic50::descriptors::PadelConfig;
use pic50::model::TrainerConfig;
use pic50::WorkspaceLayout;

/// Root of a `pic50.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory layout.
    #[serde(default)]
    pub paths: PathsConfig,

    /// ChEMBL connection.
    #[serde(default)]
    pub chembl: ChemblSection,

    /// PaDEL-Descriptor invocation.
    #[serde(default)]
    pub padel: PadelSection,

    /// Feature selection, split and forest settings.
    #[serde(default)]
    pub training: TrainingSection,
}

/// `[paths]`
#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
    pub root: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
    pub predictions_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
}

/// `[chembl]`
#[derive(Debug, Default, Deserialize)]
pub struct ChemblSection {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

/// `[padel]`
#[derive(Debug, Default, Deserialize)]
pub struct PadelSection {
    pub java: Option<PathBuf>,
    pub jar: Option<PathBuf>,
    pub scheme_dir: Option<PathBuf>,
    pub threads: Option<usize>,
    pub max_heap: Option<String>,
}

/// `[training]`
#[derive(Debug, Default, Deserialize)]
pub struct TrainingSection {
    pub test_fraction: Option<f64>,
    pub split_seed: Option<u64>,
    pub variance_p: Option<f64>,
    pub n_trees: Option<usize>,
    pub max_depth: Option<usize>,
    pub min_samples_leaf: Option<usize>,
    pub max_features: Option<usize>,
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Read `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn layout(&self) -> WorkspaceLayout {
        let mut layout = WorkspaceLayout::default();
        let paths = &self.paths;
        if let Some(dir) = &paths.data_dir {
            layout.data_dir = dir.clone();
        }
        if let Some(dir) = &paths.model_dir {
            layout.model_dir = dir.clone();
        }
        if let Some(dir) = &paths.predictions_dir {
            layout.predictions_dir = dir.clone();
        }
        if let Some(dir) = &paths.work_dir {
            layout.work_dir = dir.clone();
        }
        match &paths.root {
            Some(root) => layout.rooted(root),
            None => layout,
        }
    }

    pub fn chembl(&self) -> ChemblConfig {
        let mut config = ChemblConfig::default();
        if let Some(url) = &self.chembl.base_url {
            config.base_url = url.clone();
        }
        if let Some(size) = self.chembl.page_size {
            config.page_size = size;
        }
        if let Some(secs) = self.chembl.timeout_secs {
            config.timeout_secs = secs;
        }
        config
    }

    pub fn padel(&self) -> PadelConfig {
        let mut config = PadelConfig::default();
        let section = &self.padel;
        if let Some(java) = &section.java {
            config.java = java.clone();
        }
        if let Some(jar) = &section.jar {
            config.jar = jar.clone();
        }
        if let Some(dir) = &section.scheme_dir {
            config.scheme_dir = dir.clone();
        }
        if let Some(threads) = section.threads {
            config.threads = threads;
        }
        if section.max_heap.is_some() {
            config.max_heap = section.max_heap.clone();
        }
        config
    }

    pub fn trainer(&self) -> TrainerConfig {
        let mut config = TrainerConfig::default();
        let section = &self.training;
        config.test_fraction = section.test_fraction.unwrap_or(config.test_fraction);
        config.split_seed = section.split_seed.unwrap_or(config.split_seed);
        config.variance_p = section.variance_p.unwrap_or(config.variance_p);
        config.forest.n_trees = section.n_trees.unwrap_or(config.forest.n_trees);
        config.forest.max_depth = section.max_depth.or(config.forest.max_depth);
        config.forest.min_samples_leaf = section
            .min_samples_leaf
            .unwrap_or(config.forest.min_samples_leaf);
        config.forest.max_features = section.max_features.or(config.forest.max_features);
        config.forest.seed = section.seed.unwrap_or(config.forest.seed);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [paths]
            model_dir = "/srv/models"

            [chembl]
            page_size = 250

            [padel]
            jar = "/opt/padel/PaDEL-Descriptor.jar"
            threads = 8

            [training]
            n_trees = 300
            split_seed = 7
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.layout().model_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.layout().data_dir, WorkspaceLayout::default().data_dir);
        assert_eq!(config.chembl().page_size, 250);
        assert_eq!(config.padel().threads, 8);
        assert_eq!(config.padel().jar, PathBuf::from("/opt/padel/PaDEL-Descriptor.jar"));
        assert_eq!(config.trainer().forest.n_trees, 300);
        assert_eq!(config.trainer().split_seed, 7);
        assert_eq!(config.trainer().test_fraction, 0.2);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [padel]
            max_heap = "4G"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.padel().max_heap.as_deref(), Some("4G"));
        assert_eq!(config.padel().threads, 2);
        assert_eq!(config.chembl(), ChemblConfig::default());
    }

    #[test]
    fn test_paths_root() {
        let toml = r#"
            [paths]
            root = "/srv/ache"
            model_dir = "/srv/models"
        "#;

        let layout = Config::from_str(toml).unwrap().layout();
        assert_eq!(layout.data_dir, PathBuf::from("/srv/ache/bioactivity_data"));
        assert_eq!(layout.work_dir, PathBuf::from("/srv/ache/inference_data"));
        assert_eq!(layout.model_dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.trainer(), TrainerConfig::default());
        assert_eq!(config.layout(), WorkspaceLayout::default());
    }

    #[test]
    fn test_unknown_section_value_is_rejected() {
        assert!(Config::from_str("[training]\nn_trees = \"many\"").is_err());
    }
}
