//! Run summary and reporting

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one anonymization run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Source file
    pub input_path: PathBuf,

    /// Destination the anonymized table was written to
    pub output_path: PathBuf,

    /// Columns that were anonymized
    pub columns: Vec<String>,

    /// Data rows in the table
    pub rows: usize,

    /// Non-empty cells passed through the pipeline
    pub cells_processed: usize,

    /// Cells whose text was changed
    pub cells_changed: usize,

    pub started_at: DateTime<Utc>,

    pub finished_at: Option<DateTime<Utc>>,

    pub duration: Duration,
}

impl RunSummary {
    /// Start a summary for a run beginning now
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            columns: Vec::new(),
            rows: 0,
            cells_processed: 0,
            cells_changed: 0,
            started_at: Utc::now(),
            finished_at: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Account for one processed column
    pub fn record_column(&mut self, name: &str, before: &[String], after: &[String]) {
        self.columns.push(name.to_string());
        self.cells_processed += before.iter().filter(|v| !v.is_empty()).count();
        self.cells_changed += before.iter().zip(after).filter(|(b, a)| b != a).count();
    }

    /// Stamp the finish time
    pub fn finish(mut self, duration: Duration) -> Self {
        self.finished_at = Some(Utc::now());
        self.duration = duration;
        self
    }

    /// Share of processed cells that changed, in percent
    pub fn change_rate(&self) -> f64 {
        if self.cells_processed == 0 {
            return 0.0;
        }
        (self.cells_changed as f64 / self.cells_processed as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_run_complete!(self.rows, self.cells_changed, self.duration);
        tracing::debug!(
            input = %self.input_path.display(),
            output = %self.output_path.display(),
            columns = ?self.columns,
            cells_processed = self.cells_processed,
            change_rate = format!("{:.2}%", self.change_rate()),
            "Run summary"
        );
    }
}
