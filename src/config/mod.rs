//! Configuration management for the anonymizer.
//!
//! Configuration is optional: without a file the built-in defaults run the
//! canonical pipeline in English against a tagging service on
//! `http://localhost:8000`.
//!
//! Loading order:
//! 1. TOML file with `${VAR_NAME}` substitution (comment lines are skipped)
//! 2. `VERBATIM_<SECTION>_<KEY>` environment overrides
//! 3. Validation
//! 4. Command-line flags, applied by the CLI
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`PipelineConfig`] - steps, language, blacklist, exclusions, workers
//! - [`NerConfig`] - recognizer backend and its connection settings
//! - [`InputConfig`] - CSV delimiter
//! - [`LoggingConfig`] - optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [pipeline]
//! steps = ["spaces_cleaner", "person", "contract_number", "phone_number",
//!          "email", "duplicate_replace_value_cleaner", "blacklist"]
//! language = "de"
//! blacklist = ["Projekt Alpha"]
//!
//! [pipeline.exclusions]
//! person = ["team", "support"]
//!
//! [ner]
//! provider = "http"
//! endpoint = "http://ner.internal:8000"
//! api_token = "${VERBATIM_NER_TOKEN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{default_config, load_config};
pub use schema::{
    AnonymizerConfig, ApplicationConfig, ExclusionConfig, InputConfig, LoggingConfig, NerConfig,
    NerProviderKind, PipelineConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
