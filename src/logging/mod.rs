//! Logging and observability
//!
//! Structured logging via `tracing`, with an optional JSON file layer. Cell
//! contents are never logged; events carry counts, lengths, column names and
//! step names only.
//!
//! # Example
//!
//! ```no_run
//! use verbatim_anonymizer::logging::init_logging;
//! use verbatim_anonymizer::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(rows = 120, "Column processed");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an anonymization run
///
/// # Example
///
/// ```no_run
/// use verbatim_anonymizer::log_run_start;
///
/// let columns = vec!["Text_1".to_string()];
/// log_run_start!("survey.csv", &columns);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($input:expr, $columns:expr) => {
        tracing::info!(
            input = %$input,
            columns = ?$columns,
            "Starting anonymization run"
        );
    };
}

/// Log the completion of an anonymization run
///
/// # Example
///
/// ```no_run
/// use verbatim_anonymizer::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(1200, 37, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($rows:expr, $cells_changed:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            cells_changed = $cells_changed,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization run completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use verbatim_anonymizer::log_error_with_context;
/// use verbatim_anonymizer::domain::AnonymizerError;
///
/// let error = AnonymizerError::Configuration("Unknown step".to_string());
/// log_error_with_context!(&error, "Failed to build pipeline");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
