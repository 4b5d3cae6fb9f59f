//! End-to-end runs over CSV files

use std::fs;
use tempfile::TempDir;
use verbatim_anonymizer::anonymization::StepName;
use verbatim_anonymizer::config::{AnonymizerConfig, NerProviderKind};
use verbatim_anonymizer::core::run::{RunCoordinator, RunRequest};
use verbatim_anonymizer::domain::AnonymizerError;

fn pattern_config() -> AnonymizerConfig {
    let mut config = AnonymizerConfig::default();
    config.pipeline.steps = vec![
        StepName::SpacesCleaner,
        StepName::ContractNumber,
        StepName::PhoneNumber,
        StepName::Email,
        StepName::DuplicateReplaceValueCleaner,
    ];
    config
}

#[test]
fn test_semicolon_file_with_two_text_columns() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("verbatims.csv");
    let output = dir.path().join("verbatims_anonymized.csv");
    fs::write(
        &input,
        "id;Text_1;Text_2;score\n\
         1;Mail test@gmail.com please;Call 079-123-45-67.;5\n\
         2;;Auftrag A4312-1234 offen;3\n",
    )
    .unwrap();

    let coordinator = RunCoordinator::from_config(&pattern_config()).unwrap();
    let request = RunRequest::new(
        &input,
        &output,
        vec!["Text_1".to_string(), "Text_2".to_string()],
    )
    .with_delimiter(';');
    let summary = coordinator.execute(&request).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "id;Text_1;Text_2;score\n\
         1;Mail abc@xyz.de please;Call (...).;5\n\
         2;;Auftrag xxxxxxxxxx offen;3\n"
    );
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.cells_processed, 3);
    assert_eq!(summary.cells_changed, 3);
    assert!(summary.finished_at.is_some());
}

#[test]
fn test_gazetteer_backed_person_step() {
    let dir = TempDir::new().unwrap();
    let gazetteer = dir.path().join("gazetteer.toml");
    fs::write(
        &gazetteer,
        "[[entries]]\nlabel = \"PERSON\"\nphrase = \"Peter Parker\"\n",
    )
    .unwrap();

    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "id,Text_1\n1,my name is Peter Parker\n2,no names here\n").unwrap();

    let mut config = AnonymizerConfig::default();
    config.pipeline.steps = vec![StepName::Person, StepName::DuplicateReplaceValueCleaner];
    config.ner.provider = NerProviderKind::Gazetteer;
    config.ner.gazetteer_path = Some(gazetteer.to_string_lossy().to_string());

    let coordinator = RunCoordinator::from_config(&config).unwrap();
    let summary = coordinator
        .execute(&RunRequest::new(&input, &output, vec!["Text_1".to_string()]))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "id,Text_1\n1,my name is (...)\n2,no names here\n"
    );
    assert_eq!(summary.cells_changed, 1);
}

#[test]
fn test_missing_column_is_input_format_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "id,Text_1\n1,hello\n").unwrap();

    let coordinator = RunCoordinator::from_config(&pattern_config()).unwrap();
    let err = coordinator
        .execute(&RunRequest::new(&input, &output, vec!["Comment".to_string()]))
        .unwrap_err();

    assert!(matches!(err, AnonymizerError::InputFormat(_)));
    assert!(err.to_string().contains("Comment"));
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[test]
fn test_wrong_delimiter_reports_missing_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "id;Text_1\n1;hello\n").unwrap();

    let coordinator = RunCoordinator::from_config(&pattern_config()).unwrap();
    let err = coordinator
        .execute(&RunRequest::new(&input, &output, vec!["Text_1".to_string()]))
        .unwrap_err();

    assert!(matches!(err, AnonymizerError::InputFormat(_)));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.ods");
    let output = dir.path().join("out.csv");
    fs::write(&input, "not a table").unwrap();

    let coordinator = RunCoordinator::from_config(&pattern_config()).unwrap();
    let err = coordinator
        .execute(&RunRequest::new(&input, &output, vec!["Text_1".to_string()]))
        .unwrap_err();

    assert!(matches!(err, AnonymizerError::InputFormat(_)));
    assert!(err.to_string().contains(".csv"));
    assert!(err.to_string().contains(".xlsx"));
}

#[test]
fn test_missing_gazetteer_is_configuration_error() {
    let mut config = AnonymizerConfig::default();
    config.ner.provider = NerProviderKind::Gazetteer;
    config.ner.gazetteer_path = Some("/nonexistent/gazetteer.toml".to_string());

    match RunCoordinator::from_config(&config) {
        Err(e) => assert_eq!(e.exit_code(), 2),
        Ok(_) => panic!("coordinator built without a gazetteer"),
    }
}
