//! Validate config command implementation
//!
//! Loads the configuration (file, environment overrides, validation) and
//! prints what a run would use. With `--check-ner` the recognizer is also
//! created and the model for the configured language loaded.

use crate::adapters::ner::{create_provider, RecognizerProvider};
use crate::config::{AnonymizerConfig, NerProviderKind};
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also load the NER model for the configured language
    #[arg(long)]
    pub check_ner: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// `settings` is the outcome of loading `config_path` at startup.
    pub fn execute(
        &self,
        config_path: Option<&str>,
        settings: Result<AnonymizerConfig>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = ?config_path, "Validating configuration");

        match config_path {
            Some(path) => println!("🔍 Validating configuration file: {path}"),
            None => println!("🔍 No configuration file given, validating built-in defaults"),
        }
        println!();

        let config = match settings {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!();
        print!("{}", render_summary(&config));
        println!();

        if self.check_ner && config.pipeline.needs_recognizer() {
            let language = config.pipeline.language;
            let loaded = create_provider(&config.ner)
                .and_then(|provider| provider.load(language).map_err(Into::into));

            match loaded {
                Ok(_) => println!("✅ NER model {} is available", language.model_name()),
                Err(e) => {
                    println!("❌ NER model {} is unavailable", language.model_name());
                    println!("   Error: {e}");
                    return Ok(e.exit_code());
                }
            }
        }

        Ok(0)
    }
}

fn render_summary(config: &AnonymizerConfig) -> String {
    let steps: Vec<&str> = config.pipeline.steps.iter().map(|s| s.as_str()).collect();

    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Steps: {}", steps.join(", ")),
        format!("  Language: {}", config.pipeline.language),
        format!("  Blacklist Terms: {}", config.pipeline.blacklist.len()),
        format!("  Workers: {}", config.pipeline.workers),
        format!("  Delimiter: {:?}", config.input.delimiter),
    ];

    if config.pipeline.needs_recognizer() {
        match config.ner.provider {
            NerProviderKind::Http => {
                lines.push(format!("  NER Service: {}", config.ner.endpoint));
                lines.push(format!(
                    "  NER Token: {}",
                    if config.ner.api_token.is_some() { "set" } else { "not set" }
                ));
            }
            NerProviderKind::Gazetteer => lines.push(format!(
                "  NER Gazetteer: {}",
                config.ner.gazetteer_path.as_deref().unwrap_or("-")
            )),
        }
    }

    if config.logging.local_enabled {
        lines.push(format!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
