//! Run coordinator - reads a table, anonymizes its text columns, writes it back

use crate::adapters::ner::{create_provider, RecognizerCache};
use crate::adapters::tabular::{delimiter_byte, TabularFormat, Table};
use crate::anonymization::{Pipeline, StepOptions, StepRegistry};
use crate::config::AnonymizerConfig;
use crate::core::run::summary::RunSummary;
use crate::domain::Result;
use std::path::PathBuf;
use std::time::Instant;

/// One file to anonymize
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub text_columns: Vec<String>,
    pub delimiter: char,
}

impl RunRequest {
    /// Create a request using the `,` delimiter
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        text_columns: Vec<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            text_columns,
            delimiter: ',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Owns the pipeline of a run
pub struct RunCoordinator {
    pipeline: Pipeline,
    workers: usize,
}

impl RunCoordinator {
    /// Create a coordinator around an already built pipeline
    pub fn new(pipeline: Pipeline, workers: usize) -> Self {
        Self {
            pipeline,
            workers: workers.max(1),
        }
    }

    /// Build the configured steps and assemble the pipeline
    ///
    /// The recognizer is only created and its model only loaded when an
    /// entity step is selected.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model for the selected language
    /// is unavailable or the recognizer cannot be created.
    pub fn from_config(config: &AnonymizerConfig) -> Result<Self> {
        let names = &config.pipeline.steps;
        let options = StepOptions::from(&config.pipeline);

        let registry = if config.pipeline.needs_recognizer() {
            let provider = create_provider(&config.ner)?;
            let cache = RecognizerCache::new(provider.as_ref());
            StepRegistry::build(names, &options, Some(&cache))?
        } else {
            StepRegistry::build(names, &options, None)?
        };

        let pipeline = registry.pipeline(names)?;
        tracing::info!(
            steps = ?pipeline.step_names(),
            language = %registry.language(),
            workers = config.pipeline.workers,
            "Pipeline ready"
        );

        Ok(Self::new(pipeline, config.pipeline.workers))
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Execute a run
    ///
    /// Every input check happens before the first cell is transformed, and
    /// the output is only written once every column succeeded.
    ///
    /// # Errors
    ///
    /// Returns an input format error for unsupported file types, unreadable
    /// input or missing columns; any step error aborts the run.
    pub fn execute(&self, request: &RunRequest) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(&request.input_path, &request.output_path);

        let input_format = TabularFormat::from_path(&request.input_path)?;
        let output_format = TabularFormat::for_output(&request.output_path)?;
        let delimiter = delimiter_byte(request.delimiter)?;

        crate::log_run_start!(request.input_path.display(), &request.text_columns);

        let mut table = Table::read(&request.input_path, input_format, delimiter)?;
        table.require_columns(&request.text_columns)?;
        summary.rows = table.row_count();

        if request.text_columns.is_empty() {
            tracing::warn!("No text columns supplied, output is a copy of the input");
        }

        for column in &request.text_columns {
            let column_start = Instant::now();
            let values = table.column(column)?;
            let anonymized = self.pipeline.apply_all(&values, self.workers)?;

            summary.record_column(column, &values, &anonymized);
            table.set_column(column, anonymized)?;

            tracing::info!(
                column = %column,
                rows = values.len(),
                duration_ms = column_start.elapsed().as_millis() as u64,
                "Column anonymized"
            );
        }

        table.write(&request.output_path, output_format, delimiter)?;

        let summary = summary.finish(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::{RegexAnonymizationStep, StepName};
    use crate::domain::AnonymizerError;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn digits_pipeline() -> Pipeline {
        Pipeline::new().with_step(
            "digits",
            Arc::new(RegexAnonymizationStep::new("[0-9]+", "#").unwrap()),
        )
    }

    #[test]
    fn test_execute_rewrites_requested_columns_only() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,Text_1\n1,call 555\n2,\n").unwrap();

        let coordinator = RunCoordinator::new(digits_pipeline(), 1);
        let request = RunRequest::new(&input, &output, vec!["Text_1".to_string()]);
        let summary = coordinator.execute(&request).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.cells_processed, 1);
        assert_eq!(summary.cells_changed, 1);
        assert_eq!(summary.output_path, output);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "id,Text_1\n1,call #\n2,\n"
        );
    }

    #[test]
    fn test_missing_column_aborts_before_writing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "id,Text_1\n1,a\n").unwrap();

        let coordinator = RunCoordinator::new(digits_pipeline(), 1);
        let request = RunRequest::new(
            &input,
            &output,
            vec!["Text_1".to_string(), "Text_2".to_string()],
        );

        let err = coordinator.execute(&request).unwrap_err();
        assert!(matches!(err, AnonymizerError::InputFormat(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let coordinator = RunCoordinator::new(digits_pipeline(), 1);
        let request = RunRequest::new("in.txt", "out.csv", vec![]);
        assert!(matches!(
            coordinator.execute(&request),
            Err(AnonymizerError::InputFormat(_))
        ));
    }

    #[test]
    fn test_workbook_in_workbook_out() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xlsx");
        let output = dir.path().join("out.xlsx");
        let table = Table::new(
            vec!["id".to_string(), "Text_1".to_string()],
            vec![vec!["1".to_string(), "call 555".to_string()]],
        );
        crate::adapters::tabular::excel::write_workbook(&table, &input).unwrap();

        let coordinator = RunCoordinator::new(digits_pipeline(), 1);
        let summary = coordinator
            .execute(&RunRequest::new(&input, &output, vec!["Text_1".to_string()]))
            .unwrap();

        assert_eq!(summary.cells_changed, 1);
        let written = crate::adapters::tabular::excel::read_workbook(&output).unwrap();
        assert_eq!(written.column("Text_1").unwrap(), vec!["call #".to_string()]);
    }

    #[test]
    fn test_from_config_without_entity_steps() {
        let mut config = AnonymizerConfig::default();
        config.pipeline.steps = vec![StepName::SpacesCleaner, StepName::Email];

        let coordinator = RunCoordinator::from_config(&config).unwrap();
        assert_eq!(
            coordinator.pipeline().step_names(),
            ["spaces_cleaner", "email"]
        );
    }
}
