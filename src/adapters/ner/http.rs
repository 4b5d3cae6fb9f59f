//! HTTP client for an external NER tagging service
//!
//! The service exposes two endpoints:
//! - `GET {endpoint}/models` listing the loaded model identifiers
//! - `POST {endpoint}/tag` taking `{"model", "text"}` and returning tagged
//!   sentences with multi-token entities already merged
//!
//! Loading a language checks `/models` once, so a missing model is reported
//! as a configuration problem before any row is processed.

use super::models::{ModelsResponse, TagRequest, TagResponse};
use super::traits::{EntityRecognizer, RecognizerProvider};
use crate::config::{NerConfig, SecretString};
use crate::domain::{Language, NerError, Sentence};
use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;

/// Provider backed by the tagging service
pub struct HttpRecognizerProvider {
    endpoint: String,
    client: Client,
    api_token: Option<SecretString>,
}

impl HttpRecognizerProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &NerConfig) -> Result<Self, NerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NerError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
            api_token: config.api_token.clone(),
        })
    }

    /// Base URL of the tagging service
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn available_models(&self) -> Result<ModelsResponse, NerError> {
        let url = format!("{}/models", self.endpoint);
        let request = with_token(self.client.get(&url), self.api_token.as_ref());
        let response = check_status(request.send().map_err(map_transport_error)?)?;

        response
            .json::<ModelsResponse>()
            .map_err(|e| NerError::InvalidResponse(format!("Failed to decode model list: {e}")))
    }
}

impl RecognizerProvider for HttpRecognizerProvider {
    fn load(&self, language: Language) -> Result<Arc<dyn EntityRecognizer>, NerError> {
        let model = language.model_name();

        let models = self
            .available_models()
            .map_err(|e| NerError::ModelUnavailable {
                language,
                model: model.to_string(),
                reason: e.to_string(),
            })?;

        if !models.contains(model) {
            return Err(NerError::ModelUnavailable {
                language,
                model: model.to_string(),
                reason: format!(
                    "service at {} only provides: {}",
                    self.endpoint,
                    models.models.join(", ")
                ),
            });
        }

        tracing::info!(
            endpoint = %self.endpoint,
            model = model,
            "NER model available"
        );

        Ok(Arc::new(HttpEntityRecognizer {
            language,
            tag_url: format!("{}/tag", self.endpoint),
            client: self.client.clone(),
            api_token: self.api_token.clone(),
        }))
    }
}

/// Recognizer bound to one model of the tagging service
pub struct HttpEntityRecognizer {
    language: Language,
    tag_url: String,
    client: Client,
    api_token: Option<SecretString>,
}

impl EntityRecognizer for HttpEntityRecognizer {
    fn language(&self) -> Language {
        self.language
    }

    fn tag(&self, text: &str) -> Result<Vec<Sentence>, NerError> {
        let body = TagRequest {
            model: self.language.model_name(),
            text,
        };

        let request = with_token(self.client.post(&self.tag_url), self.api_token.as_ref()).json(&body);
        let response = check_status(request.send().map_err(map_transport_error)?)?;

        let tagged = response
            .json::<TagResponse>()
            .map_err(|e| NerError::InvalidResponse(format!("Failed to decode tagged text: {e}")))?;

        Ok(tagged.sentences)
    }
}

fn with_token(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose_secret()),
        None => request,
    }
}

fn check_status(response: Response) -> Result<Response, NerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(NerError::ServerError {
        status: status.as_u16(),
        message,
    })
}

fn map_transport_error(err: reqwest::Error) -> NerError {
    if err.is_timeout() {
        NerError::Timeout(err.to_string())
    } else {
        NerError::ConnectionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = NerConfig {
            endpoint: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let provider = HttpRecognizerProvider::new(&config).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_unreachable_service_reports_model_unavailable() {
        let config = NerConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
            ..Default::default()
        };
        let provider = HttpRecognizerProvider::new(&config).unwrap();

        let result = provider.load(Language::En);
        assert!(matches!(result, Err(NerError::ModelUnavailable { .. })));
    }
}
