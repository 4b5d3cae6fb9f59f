//! Wire types of the NER tagging service

use crate::domain::Sentence;
use serde::{Deserialize, Serialize};

/// Body of `POST /tag`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest<'a> {
    /// Model identifier, e.g. `en_core_web_lg`
    pub model: &'a str,

    /// Raw text to tag
    pub text: &'a str,
}

/// Response of `POST /tag`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagResponse {
    /// Sentences in document order
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

/// Response of `GET /models`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Identifiers of the models the service has loaded
    #[serde(default)]
    pub models: Vec<String>,
}

impl ModelsResponse {
    /// Whether `model` is among the loaded models
    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }
}
