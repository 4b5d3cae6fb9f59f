//! Anonymize command implementation

use super::report_failure;
use crate::anonymization::StepName;
use crate::config::{loader, AnonymizerConfig};
use crate::core::run::{RunCoordinator, RunRequest};
use crate::domain::Language;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Path to a .csv, .xls or .xlsx file
    pub in_path: PathBuf,

    /// Path to write the anonymized file to (.csv or .xlsx)
    pub out_path: PathBuf,

    /// Columns with verbatims to anonymize, e.g. `Text_1 Text_2`
    pub text_columns: Vec<String>,

    /// Anonymization steps to carry out in sequence
    #[arg(long, value_enum, num_args = 1..)]
    pub steps: Option<Vec<StepName>>,

    /// Language of the verbatims (used by person, organization and location)
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Field delimiter of CSV input and output, ignored for workbooks
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Worker threads per column
    #[arg(long)]
    pub workers: Option<usize>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command with the settings loaded at startup
    pub fn execute(&self, settings: crate::domain::Result<AnonymizerConfig>) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        let mut config = match settings {
            Ok(config) => config,
            Err(e) => return Ok(report_failure(&e, "Failed to load configuration")),
        };

        self.apply_overrides(&mut config);

        if let Err(e) = loader::validate(&config) {
            return Ok(report_failure(&e, "Invalid configuration"));
        }

        let coordinator = match RunCoordinator::from_config(&config) {
            Ok(coordinator) => coordinator,
            Err(e) => return Ok(report_failure(&e, "Failed to build anonymization pipeline")),
        };

        let request = RunRequest::new(&self.in_path, &self.out_path, self.text_columns.clone())
            .with_delimiter(config.input.delimiter);

        match coordinator.execute(&request) {
            Ok(summary) => {
                println!(
                    "Successfully anonymized file, wrote output to {}",
                    summary.output_path.display()
                );
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e, "Anonymization failed")),
        }
    }

    fn apply_overrides(&self, config: &mut AnonymizerConfig) {
        if let Some(steps) = &self.steps {
            tracing::info!(steps = ?steps, "Overriding steps from CLI");
            config.pipeline.steps = steps.clone();
        }
        if let Some(language) = self.language {
            tracing::info!(language = %language, "Overriding language from CLI");
            config.pipeline.language = language;
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter;
        }
        if let Some(workers) = self.workers {
            config.pipeline.workers = workers;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnonymizerError;
    use tempfile::TempDir;

    fn args() -> AnonymizeArgs {
        AnonymizeArgs {
            in_path: PathBuf::from("in.csv"),
            out_path: PathBuf::from("out.csv"),
            text_columns: vec!["Text_1".to_string()],
            steps: None,
            language: None,
            delimiter: None,
            workers: None,
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = AnonymizerConfig::default();
        args().apply_overrides(&mut config);

        assert_eq!(config.pipeline.steps.len(), 7);
        assert_eq!(config.pipeline.language, Language::En);
        assert_eq!(config.input.delimiter, ',');
    }

    #[test]
    fn test_overrides_win_over_config() {
        let mut config = AnonymizerConfig::default();
        let args = AnonymizeArgs {
            steps: Some(vec![StepName::Email]),
            language: Some(Language::De),
            delimiter: Some(';'),
            workers: Some(3),
            ..args()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.pipeline.steps, vec![StepName::Email]);
        assert_eq!(config.pipeline.language, Language::De);
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.pipeline.workers, 3);
    }

    #[test]
    fn test_settings_error_exits_with_configuration_code() {
        let settings = Err(AnonymizerError::Configuration("bad file".to_string()));
        assert_eq!(args().execute(settings).unwrap(), 2);
    }

    #[test]
    fn test_execute_uses_supplied_settings() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id;Text_1\n1;mail test@gmail.com\n").unwrap();

        let mut config = AnonymizerConfig::default();
        config.pipeline.steps = vec![StepName::Email];
        config.input.delimiter = ';';
        let args = AnonymizeArgs {
            in_path: input,
            out_path: output.clone(),
            ..args()
        };

        assert_eq!(args.execute(Ok(config)).unwrap(), 0);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "id;Text_1\n1;mail abc@xyz.de\n"
        );
    }
}
