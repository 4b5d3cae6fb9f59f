//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::config::{default_config, load_config, AnonymizerConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};

/// Verbatim Anonymizer - redact sensitive fragments from free-text columns
#[derive(Parser, Debug)]
#[command(name = "verbatim-anonymizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "VERBATIM_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VERBATIM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize text columns of a CSV or Excel file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// List the available anonymization steps
    ListSteps(commands::steps::ListStepsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Load the configuration file if one was given, otherwise the defaults
pub fn load_settings(config_path: Option<&str>) -> Result<AnonymizerConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => default_config(),
    }
}
