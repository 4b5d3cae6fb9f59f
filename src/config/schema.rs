//! Configuration schema types
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields a runnable configuration.

use crate::anonymization::{StepName, DEFAULT_PIPELINE};
use crate::config::SecretString;
use crate::domain::Language;
use serde::{Deserialize, Serialize};

/// Main anonymizer configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Step selection and step parameters
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Named-entity recognizer
    #[serde(default)]
    pub ner: NerConfig,

    /// Tabular input settings
    #[serde(default)]
    pub input: InputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnonymizerConfig {
    /// Validates the configuration
    ///
    /// The NER section is only checked when an entity step is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.pipeline.validate()?;
        if self.pipeline.needs_recognizer() {
            self.ner.validate()?;
        }
        self.input.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Steps in execution order
    #[serde(default = "default_steps")]
    pub steps: Vec<StepName>,

    /// Language of the verbatims, used by the entity steps
    #[serde(default)]
    pub language: Language,

    /// Literal terms redacted by the `blacklist` step, in order
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Words that keep a tagged entity unredacted
    #[serde(default)]
    pub exclusions: ExclusionConfig,

    /// Worker threads per column
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            language: Language::default(),
            blacklist: Vec::new(),
            exclusions: ExclusionConfig::default(),
            workers: default_workers(),
        }
    }
}

impl PipelineConfig {
    /// Whether any selected step needs a named-entity recognizer
    pub fn needs_recognizer(&self) -> bool {
        self.steps.iter().any(StepName::needs_recognizer)
    }

    fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err("pipeline.steps must contain at least one step".to_string());
        }

        if self.workers == 0 || self.workers > 64 {
            return Err(format!(
                "pipeline.workers must be between 1 and 64, got {}",
                self.workers
            ));
        }

        Ok(())
    }
}

/// Per entity class exclusion words
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclusionConfig {
    #[serde(default)]
    pub person: Vec<String>,

    #[serde(default)]
    pub organization: Vec<String>,

    #[serde(default)]
    pub location: Vec<String>,
}

/// Named-entity recognizer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NerProviderKind {
    /// External tagging service
    #[default]
    Http,
    /// Offline phrase list
    Gazetteer,
}

/// Named-entity recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    /// Backend selection
    #[serde(default)]
    pub provider: NerProviderKind,

    /// Base URL of the tagging service
    #[serde(default = "default_ner_endpoint")]
    pub endpoint: String,

    /// Bearer token for the tagging service
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Gazetteer TOML file (required for the gazetteer provider)
    #[serde(default)]
    pub gazetteer_path: Option<String>,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            provider: NerProviderKind::default(),
            endpoint: default_ner_endpoint(),
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            gazetteer_path: None,
        }
    }
}

impl NerConfig {
    fn validate(&self) -> Result<(), String> {
        match self.provider {
            NerProviderKind::Http => {
                if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://")
                {
                    return Err(format!(
                        "ner.endpoint must start with http:// or https://, got '{}'",
                        self.endpoint
                    ));
                }
            }
            NerProviderKind::Gazetteer => {
                if self
                    .gazetteer_path
                    .as_deref()
                    .map_or(true, |p| p.trim().is_empty())
                {
                    return Err(
                        "ner.gazetteer_path is required when ner.provider = 'gazetteer'"
                            .to_string(),
                    );
                }
            }
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 3600 {
            return Err(format!(
                "ner.timeout_seconds must be between 1 and 3600, got {}",
                self.timeout_seconds
            ));
        }

        Ok(())
    }
}

/// Tabular input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter for CSV input and output, unused for Excel workbooks
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        crate::adapters::tabular::delimiter_byte(self.delimiter)
            .map(|_| ())
            .map_err(|e| format!("input.delimiter: {e}"))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_steps() -> Vec<StepName> {
    DEFAULT_PIPELINE.to_vec()
}

fn default_workers() -> usize {
    1
}

fn default_ner_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_delimiter() -> char {
    ','
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
