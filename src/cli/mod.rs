use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};

use mzlipid::config::{Config, SearchParameters};
use mzlipid::rules::RuleSet;

mod classify;
mod rules;
mod validate;

/// mzLipid - lipid class hypotheses for LC-MS features
#[derive(Parser)]
#[command(name = "mzlipid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propose lipid class queries for one feature
    Classify {
        /// Feature m/z
        #[arg(long)]
        mz: f64,

        /// Feature retention time in seconds
        #[arg(long)]
        rt: f64,

        /// Mass tolerance in ppm (overrides config)
        #[arg(long)]
        ppm: Option<f64>,

        /// Instrument mass resolution (overrides config)
        #[arg(long)]
        resolution: Option<f64>,

        /// Print queries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the classification and validation rule tables
    Rules {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check whether a compound name is plausible at a retention time
    ValidateIdentity {
        /// Feature m/z
        #[arg(long)]
        mz: f64,

        /// Feature retention time in seconds
        #[arg(long)]
        rt: f64,

        /// Compound name as returned by the database
        #[arg(long)]
        name: String,
    },
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

/// Config file contents, or defaults when none was given
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Config::from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn load_rules(config: &Config) -> Result<RuleSet> {
    config.rule_set().context("Failed to load rule set")
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let rule_set = load_rules(&config)?;

    match cli.command {
        Commands::Classify {
            mz,
            rt,
            ppm,
            resolution,
            json,
        } => {
            let parameters = SearchParameters::new(
                ppm.unwrap_or(config.search.ppm_tolerance),
                resolution.unwrap_or(config.search.mass_resolution),
            );
            parameters.validate().context("Invalid search parameters")?;
            classify::run(&rule_set, mz, rt, &parameters, json)
        }
        Commands::Rules { json } => rules::run(&rule_set, json),
        Commands::ValidateIdentity { mz, rt, name } => {
            validate::run(&rule_set, mz, rt, &name, &config.search)
        }
    }
}
