//! Named-entity recognizer contract
//!
//! The anonymization core only needs "give me the tagged sentences of this
//! text". Model weights, tokenizers and transport live behind these traits so
//! the entity step can be exercised against fakes.

use crate::domain::{Language, NerError, Sentence};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A loaded model for one language
///
/// Implementations are shared read-only between the entity steps and worker
/// threads of a run, so `tag` takes `&self`.
pub trait EntityRecognizer: Send + Sync {
    /// Language this model was loaded for
    fn language(&self) -> Language;

    /// Split `text` into sentences of tagged tokens
    ///
    /// Multi-token entities must be merged into a single token, and
    /// concatenating every token's text and trailing whitespace must give
    /// back `text`.
    fn tag(&self, text: &str) -> Result<Vec<Sentence>, NerError>;
}

/// Loads recognizers by language
pub trait RecognizerProvider: Send + Sync {
    /// Load the model for `language`
    ///
    /// # Errors
    ///
    /// Returns [`NerError::ModelUnavailable`] when the model cannot be loaded.
    fn load(&self, language: Language) -> Result<Arc<dyn EntityRecognizer>, NerError>;
}

/// Loads each language at most once and hands out shared references
pub struct RecognizerCache<'a> {
    provider: &'a dyn RecognizerProvider,
    loaded: Mutex<HashMap<Language, Arc<dyn EntityRecognizer>>>,
}

impl<'a> RecognizerCache<'a> {
    /// Wrap a provider
    pub fn new(provider: &'a dyn RecognizerProvider) -> Self {
        Self {
            provider,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Return the recognizer for `language`, loading it on first use
    pub fn get(&self, language: Language) -> Result<Arc<dyn EntityRecognizer>, NerError> {
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(recognizer) = loaded.get(&language) {
            return Ok(Arc::clone(recognizer));
        }

        tracing::info!(
            language = %language,
            model = language.model_name(),
            "Loading NER model"
        );
        let recognizer = self.provider.load(language)?;
        loaded.insert(language, Arc::clone(&recognizer));
        Ok(recognizer)
    }

    /// Number of models loaded so far
    pub fn loaded_count(&self) -> usize {
        self.loaded.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
