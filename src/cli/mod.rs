use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pic50::chembl::ChemblConfig;
use pic50::descriptors::{
    DescriptorAdapter, FingerprintScheme, PadelConfig, PadelDescriptor, SchemeRegistry,
};
use pic50::model::TrainerConfig;
use pic50::WorkspaceLayout;

mod config;
mod fetch;
mod info;
mod predict;
mod scout;
mod train;
mod validate;

use config::Config;

/// pic50 - IC50 bioactivity to pIC50 regression models
#[derive(Parser)]
#[command(name = "pic50")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory for downloaded and processed tables
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for stored models
    #[arg(long, value_name = "DIR", global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the ChEMBL targets matching a query by IC50 record count
    Scout {
        /// Free-text target query, e.g. "acetylcholinesterase"
        #[arg(value_name = "QUERY")]
        query: String,

        /// Number of targets to show
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },

    /// Download, clean and fingerprint the activities of one target
    Fetch {
        /// Free-text target query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Index of the target in the search results (see `scout`)
        #[arg(short, long)]
        index: usize,

        /// Fingerprint scheme
        #[arg(short, long, default_value = "PubChem")]
        scheme: String,
    },

    /// Train a model on a fingerprint table and ask whether to keep it
    Train {
        /// Name to store the model under
        #[arg(value_name = "NAME")]
        name: String,

        /// Fingerprint scheme of the training table (detected from its columns when omitted)
        #[arg(short, long)]
        scheme: Option<String>,

        /// Training table (defaults to training_<Scheme>.csv in the data directory)
        #[arg(short, long, value_name = "FILE")]
        training: Option<PathBuf>,

        /// Keep the model without asking
        #[arg(long, conflicts_with = "no")]
        yes: bool,

        /// Discard the model without asking
        #[arg(long)]
        no: bool,
    },

    /// Predict pIC50 for the molecules of a .smi file
    Predict {
        /// Whitespace-separated SMILES file, optional name after the structure
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Stored model to use
        #[arg(short, long)]
        model: String,

        /// Fingerprint scheme (defaults to the model's)
        #[arg(short, long)]
        scheme: Option<String>,

        /// Directory for the predictions file
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Display information about a stored model
    Info {
        /// Model name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Check a stored model for integrity
    Validate {
        /// Model name
        #[arg(value_name = "NAME")]
        name: String,

        /// Require this fingerprint scheme
        #[arg(short, long)]
        scheme: Option<String>,
    },
}

/// Settings merged from defaults, the config file and global flags
pub(crate) struct Settings {
    pub layout: WorkspaceLayout,
    pub chembl: ChemblConfig,
    pub padel: PadelConfig,
    pub trainer: TrainerConfig,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let mut layout = config.layout();
        if let Some(dir) = &cli.data_dir {
            layout.data_dir = dir.clone();
        }
        if let Some(dir) = &cli.model_dir {
            layout.model_dir = dir.clone();
        }
        Ok(Self {
            layout,
            chembl: config.chembl(),
            padel: config.padel(),
            trainer: config.trainer(),
        })
    }

    pub fn adapter(&self) -> DescriptorAdapter<PadelDescriptor> {
        DescriptorAdapter::new(
            PadelDescriptor::new(self.padel.clone()),
            SchemeRegistry::new(&self.padel.scheme_dir),
        )
    }
}

pub(crate) fn parse_scheme(name: &str) -> Result<FingerprintScheme> {
    name.parse::<FingerprintScheme>()
        .with_context(|| format!("Unknown fingerprint scheme '{name}'"))
}

pub(crate) fn ensure_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("{what} does not exist: {}", path.display());
    }
    Ok(())
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(&cli)?;
    match cli.command {
        Commands::Scout { query, top } => scout::run(&settings, &query, top),
        Commands::Fetch {
            query,
            index,
            scheme,
        } => fetch::run(&settings, &query, index, parse_scheme(&scheme)?),
        Commands::Train {
            name,
            scheme,
            training,
            yes,
            no,
        } => {
            let decision = match (yes, no) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let scheme = scheme.as_deref().map(parse_scheme).transpose()?;
            train::run(&settings, &name, scheme, training, decision)
        }
        Commands::Predict {
            input,
            model,
            scheme,
            output,
        } => {
            let scheme = scheme.as_deref().map(parse_scheme).transpose()?;
            predict::run(&settings, &input, &model, scheme, output)
        }
        Commands::Info { name } => info::run(&settings, &name),
        Commands::Validate { name, scheme } => {
            let scheme = scheme.as_deref().map(parse_scheme).transpose()?;
            validate::run(&settings, &name, scheme)
        }
    }
}
