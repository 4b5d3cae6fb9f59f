// Verbatim Anonymizer - redaction of sensitive fragments in free-text fields
// Copyright (c) 2025 Verbatim Anonymizer Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use verbatim_anonymizer::cli::{load_settings, Cli, Commands};
use verbatim_anonymizer::config::{AnonymizerConfig, LoggingConfig};
use verbatim_anonymizer::domain::{self, AnonymizerError};
use verbatim_anonymizer::logging::init_logging;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once; commands that need it report a load error themselves
    let settings = load_settings(cli.config.as_deref());
    let (config_level, logging_config) = match &settings {
        Ok(config) => (config.application.log_level.clone(), config.logging.clone()),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "verbatim-anonymizer");

    let exit_code = match execute_command(&cli, settings) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            e.downcast_ref::<AnonymizerError>()
                .map_or(5, AnonymizerError::exit_code)
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, settings: domain::Result<AnonymizerConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => args.execute(settings),
        Commands::ListSteps(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref(), settings),
        Commands::Init(args) => args.execute(),
    }
}
