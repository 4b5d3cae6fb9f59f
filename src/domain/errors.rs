//! Domain error types
//!
//! This module defines the error hierarchy for the anonymizer. Every fatal
//! condition aborts the whole run; nothing here is retried, because the
//! pipeline is deterministic and a retry would produce the same outcome.

use crate::domain::language::Language;
use thiserror::Error;

/// Main anonymizer error type
#[derive(Debug, Error)]
pub enum AnonymizerError {
    /// Invalid step name, unsupported language, unavailable NER model or
    /// an invalid configuration file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing text column, unparseable tabular source or unsupported file type
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// The named-entity recognizer failed while tagging
    #[error("NER provider fault: {0}")]
    Provider(#[source] NerError),

    /// The pattern engine gave up on an input (e.g. backtrack limit exceeded)
    #[error("Pattern error in step '{step}': {message}")]
    Pattern { step: String, message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl AnonymizerError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::InputFormat(_) => 3,
            Self::Provider(_) => 4,
            _ => 5,
        }
    }
}

/// Named-entity recognizer errors
///
/// These never expose the HTTP client's own error types.
#[derive(Debug, Error)]
pub enum NerError {
    /// The model for the requested language cannot be loaded
    #[error("NER model '{model}' for language '{language}' is unavailable: {reason}")]
    ModelUnavailable {
        language: Language,
        model: String,
        reason: String,
    },

    /// Failed to reach the tagging service
    #[error("Failed to connect to NER service: {0}")]
    ConnectionFailed(String),

    /// Tagging service answered with a non-success status
    #[error("NER service error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response could not be decoded
    #[error("Invalid response from NER service: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("NER request timeout: {0}")]
    Timeout(String),

    /// Gazetteer file could not be read or parsed
    #[error("Gazetteer error: {0}")]
    Gazetteer(String),
}

impl From<NerError> for AnonymizerError {
    fn from(err: NerError) -> Self {
        match err {
            // Model availability is decided at construction time, before any row
            NerError::ModelUnavailable { .. } | NerError::Gazetteer(_) => {
                AnonymizerError::Configuration(err.to_string())
            }
            other => AnonymizerError::Provider(other),
        }
    }
}

impl From<std::io::Error> for AnonymizerError {
    fn from(err: std::io::Error) -> Self {
        AnonymizerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnonymizerError {
    fn from(err: serde_json::Error) -> Self {
        AnonymizerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AnonymizerError {
    fn from(err: toml::de::Error) -> Self {
        AnonymizerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for AnonymizerError {
    fn from(err: csv::Error) -> Self {
        AnonymizerError::InputFormat(format!("CSV error: {err}"))
    }
}
