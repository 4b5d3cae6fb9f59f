//! Named-entity recognition adapters
//!
//! - [`traits`] - the recognizer contract used by the entity step
//! - [`http`] - client for an external tagging service
//! - [`gazetteer`] - offline phrase-list recognizer

pub mod gazetteer;
pub mod http;
pub mod models;
pub mod traits;

pub use gazetteer::{GazetteerEntry, GazetteerProvider, GazetteerRecognizer};
pub use http::{HttpEntityRecognizer, HttpRecognizerProvider};
pub use traits::{EntityRecognizer, RecognizerCache, RecognizerProvider};

use crate::config::{NerConfig, NerProviderKind};
use crate::domain::{AnonymizerError, Result};

/// Create the provider selected in configuration
///
/// # Errors
///
/// Returns a configuration error if the gazetteer file is missing or
/// invalid, or if the HTTP client cannot be built.
pub fn create_provider(config: &NerConfig) -> Result<Box<dyn RecognizerProvider>> {
    match config.provider {
        NerProviderKind::Http => {
            let provider = HttpRecognizerProvider::new(config)
                .map_err(|e| AnonymizerError::Configuration(e.to_string()))?;
            Ok(Box::new(provider))
        }
        NerProviderKind::Gazetteer => {
            let path = config.gazetteer_path.as_deref().ok_or_else(|| {
                AnonymizerError::Configuration(
                    "ner.gazetteer_path is required when ner.provider = 'gazetteer'".to_string(),
                )
            })?;
            Ok(Box::new(GazetteerProvider::from_file(path)?))
        }
    }
}
