//! Tests of the HTTP recognizer against a mocked tagging service

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use verbatim_anonymizer::adapters::ner::{
    EntityRecognizer, HttpRecognizerProvider, RecognizerProvider,
};
use verbatim_anonymizer::anonymization::{AnonymizationStep, EntityAnonymizerStep};
use verbatim_anonymizer::config::{secret_string, NerConfig};
use verbatim_anonymizer::domain::{AnonymizerError, Language, NamedEntityTag, NerError};

fn provider_for(server: &Server) -> HttpRecognizerProvider {
    let config = NerConfig {
        endpoint: server.url(),
        timeout_seconds: 5,
        ..Default::default()
    };
    HttpRecognizerProvider::new(&config).unwrap()
}

fn tagged_name_body() -> String {
    json!({
        "sentences": [[
            {"text": "my", "whitespace": " "},
            {"text": "name", "whitespace": " "},
            {"text": "is", "whitespace": " "},
            {"text": "Peter Parker", "whitespace": "", "entity": "PERSON"}
        ]]
    })
    .to_string()
}

#[test]
fn test_load_and_tag() {
    let mut server = Server::new();
    let models = server
        .mock("GET", "/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"models":["en_core_web_lg"]}"#)
        .expect(1)
        .create();
    let tag = server
        .mock("POST", "/tag")
        .match_body(Matcher::PartialJson(json!({
            "model": "en_core_web_lg",
            "text": "my name is Peter Parker"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(tagged_name_body())
        .create();

    let recognizer = provider_for(&server).load(Language::En).unwrap();
    assert_eq!(recognizer.language(), Language::En);

    let sentences = recognizer.tag("my name is Peter Parker").unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0][3].entity, Some(NamedEntityTag::Person));

    models.assert();
    tag.assert();
}

#[test]
fn test_entity_step_over_http() {
    let mut server = Server::new();
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"models":["en_core_web_lg","de_core_news_lg"]}"#)
        .create();
    server
        .mock("POST", "/tag")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(tagged_name_body())
        .create();

    let recognizer = provider_for(&server).load(Language::En).unwrap();
    let step = EntityAnonymizerStep::new(
        Arc::clone(&recognizer),
        vec![NamedEntityTag::Per, NamedEntityTag::Person],
        "(...)",
    );

    assert_eq!(step.apply("my name is Peter Parker").unwrap(), "my name is (...)");
}

#[test]
fn test_missing_model_is_unavailable() {
    let mut server = Server::new();
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"models":["en_core_web_lg"]}"#)
        .create();

    let result = provider_for(&server).load(Language::De);
    let err = match result {
        Err(e) => e,
        Ok(_) => panic!("German model should be unavailable"),
    };

    assert!(matches!(err, NerError::ModelUnavailable { language: Language::De, .. }));
    assert!(err.to_string().contains("de_core_news_lg"));

    let err: AnonymizerError = err.into();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_tagging_failure_is_provider_fault() {
    let mut server = Server::new();
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"models":["en_core_web_lg"]}"#)
        .create();
    server
        .mock("POST", "/tag")
        .with_status(500)
        .with_body("model crashed")
        .create();

    let recognizer = provider_for(&server).load(Language::En).unwrap();
    let step = EntityAnonymizerStep::new(recognizer, vec![NamedEntityTag::Person], "(...)");

    let err = step.apply("my name is Peter Parker").unwrap_err();
    match err {
        AnonymizerError::Provider(NerError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model crashed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_response_is_rejected() {
    let mut server = Server::new();
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"models":["en_core_web_lg"]}"#)
        .create();
    server
        .mock("POST", "/tag")
        .with_status(200)
        .with_body("not json")
        .create();

    let recognizer = provider_for(&server).load(Language::En).unwrap();
    let err = recognizer.tag("hello").unwrap_err();
    assert!(matches!(err, NerError::InvalidResponse(_)));
}

#[test]
fn test_token_is_sent_as_bearer() {
    let mut server = Server::new();
    let models = server
        .mock("GET", "/models")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(r#"{"models":["en_core_web_lg"]}"#)
        .create();

    let config = NerConfig {
        endpoint: server.url(),
        api_token: Some(secret_string("secret-token".to_string())),
        ..Default::default()
    };
    let provider = HttpRecognizerProvider::new(&config).unwrap();

    assert!(provider.load(Language::En).is_ok());
    models.assert();
}
