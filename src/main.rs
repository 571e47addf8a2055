//! # pic50
//!
//! Command-line front end for building pIC50 regression models from ChEMBL
//! IC50 data and applying them to new molecules.
//!
//! ## Usage
//!
//! ```bash
//! # Which acetylcholinesterase targets have the most IC50 data?
//! pic50 scout acetylcholinesterase --top 10
//!
//! # Download and fingerprint target #1 of that search
//! pic50 fetch acetylcholinesterase --index 1 --scheme PubChem
//!
//! # Train, review the held-out R² and decide whether to keep the model
//! pic50 train ache_pubchem --scheme PubChem
//!
//! # Predict new molecules
//! pic50 predict candidates.smi --model ache_pubchem
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
