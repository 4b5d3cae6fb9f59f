//! CLI command implementations
//!
//! Commands return the process exit code; errors that reach `main` are
//! mapped through [`AnonymizerError::exit_code`].

pub mod anonymize;
pub mod init;
pub mod steps;
pub mod validate;

use crate::domain::AnonymizerError;

/// Log and print a fatal error, returning its exit code
pub(crate) fn report_failure(error: &AnonymizerError, context: &str) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    error.exit_code()
}
