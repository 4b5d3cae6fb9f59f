//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AnonymizerConfig, NerProviderKind};
use super::secret::secret_string;
use crate::anonymization::StepName;
use crate::domain::errors::AnonymizerError;
use crate::domain::result::Result;
use crate::domain::Language;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AnonymizerConfig
/// 4. Applies environment variable overrides (VERBATIM_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use verbatim_anonymizer::config::load_config;
///
/// let config = load_config("verbatim-anonymizer.toml")?;
/// println!("Steps: {:?}", config.pipeline.steps);
/// # Ok::<(), verbatim_anonymizer::domain::AnonymizerError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonymizerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonymizerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonymizerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AnonymizerConfig = toml::from_str(&contents)
        .map_err(|e| AnonymizerError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Built-in defaults with environment overrides applied, for runs without a
/// configuration file
pub fn default_config() -> Result<AnonymizerConfig> {
    let mut config = AnonymizerConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Run schema validation, wrapping failures as configuration errors
pub fn validate(config: &AnonymizerConfig) -> Result<()> {
    config.validate().map_err(|e| {
        AnonymizerError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AnonymizerError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        if idx > 0 {
            result.push('\n');
        }

        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(AnonymizerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid_override(var: &str, val: &str) -> AnonymizerError {
    AnonymizerError::Configuration(format!("Invalid value '{val}' for {var}"))
}

/// Applies environment variable overrides using VERBATIM_* prefix
///
/// Environment variables follow the pattern: VERBATIM_<SECTION>_<KEY>,
/// e.g. VERBATIM_PIPELINE_LANGUAGE or VERBATIM_NER_ENDPOINT. List values are
/// comma separated.
fn apply_env_overrides(config: &mut AnonymizerConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VERBATIM_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Pipeline overrides
    if let Ok(val) = std::env::var("VERBATIM_PIPELINE_STEPS") {
        config.pipeline.steps = parse_list(&val)
            .iter()
            .map(|s| s.parse::<StepName>())
            .collect::<Result<Vec<_>>>()?;
    }
    if let Ok(val) = std::env::var("VERBATIM_PIPELINE_LANGUAGE") {
        config.pipeline.language = val.parse::<Language>()?;
    }
    if let Ok(val) = std::env::var("VERBATIM_PIPELINE_BLACKLIST") {
        config.pipeline.blacklist = parse_list(&val);
    }
    if let Ok(val) = std::env::var("VERBATIM_PIPELINE_WORKERS") {
        config.pipeline.workers = val
            .trim()
            .parse()
            .map_err(|_| invalid_override("VERBATIM_PIPELINE_WORKERS", &val))?;
    }

    // NER overrides
    if let Ok(val) = std::env::var("VERBATIM_NER_PROVIDER") {
        config.ner.provider = match val.trim().to_lowercase().as_str() {
            "http" => NerProviderKind::Http,
            "gazetteer" => NerProviderKind::Gazetteer,
            _ => return Err(invalid_override("VERBATIM_NER_PROVIDER", &val)),
        };
    }
    if let Ok(val) = std::env::var("VERBATIM_NER_ENDPOINT") {
        config.ner.endpoint = val;
    }
    if let Ok(val) = std::env::var("VERBATIM_NER_API_TOKEN") {
        config.ner.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("VERBATIM_NER_TIMEOUT_SECONDS") {
        config.ner.timeout_seconds = val
            .trim()
            .parse()
            .map_err(|_| invalid_override("VERBATIM_NER_TIMEOUT_SECONDS", &val))?;
    }
    if let Ok(val) = std::env::var("VERBATIM_NER_GAZETTEER_PATH") {
        config.ner.gazetteer_path = Some(val);
    }

    // Input overrides
    if let Ok(val) = std::env::var("VERBATIM_INPUT_DELIMITER") {
        let mut chars = val.chars();
        config.input.delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid_override("VERBATIM_INPUT_DELIMITER", &val)),
        };
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VERBATIM_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VERBATIM_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("VERBATIM_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
