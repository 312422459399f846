//! # mzLipid
//!
//! Command-line front end for the lipid class classifier.
//!
//! ## Usage
//!
//! ```bash
//! # Class hypotheses for a feature at m/z 760.585, 390 s
//! mzlipid classify --mz 760.585 --rt 390
//!
//! # Is "TAG 52:2" plausible at 450 s?
//! mzlipid validate-identity --mz 885.55 --rt 450 --name "TAG 52:2"
//!
//! # Show the active rule tables (reference or from --config)
//! mzlipid rules --config mzlipid.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
