//! Step catalogue and the default pipeline order

use super::blacklist::BlacklistAnonymizationStep;
use super::entity::EntityAnonymizerStep;
use super::pipeline::Pipeline;
use super::presets;
use super::step::{AnonymizationStep, DEFAULT_REPLACE_VALUE};
use crate::adapters::ner::RecognizerCache;
use crate::config::PipelineConfig;
use crate::domain::{AnonymizerError, Language, NamedEntityTag, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Name of a selectable step
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum StepName {
    Person,
    Organization,
    Location,
    Email,
    PhoneNumber,
    ContractNumber,
    SpacesCleaner,
    DuplicateReplaceValueCleaner,
    Blacklist,
}

/// Recommended production order
///
/// Whitespace is normalized first, names go before the numeric patterns, and
/// duplicate sentinels are merged after every redaction but before the
/// blacklist.
pub const DEFAULT_PIPELINE: [StepName; 7] = [
    StepName::SpacesCleaner,
    StepName::Person,
    StepName::ContractNumber,
    StepName::PhoneNumber,
    StepName::Email,
    StepName::DuplicateReplaceValueCleaner,
    StepName::Blacklist,
];

impl StepName {
    /// Every step, in catalogue order
    pub const ALL: [StepName; 9] = [
        StepName::Person,
        StepName::Organization,
        StepName::Location,
        StepName::Email,
        StepName::PhoneNumber,
        StepName::ContractNumber,
        StepName::SpacesCleaner,
        StepName::DuplicateReplaceValueCleaner,
        StepName::Blacklist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Location => "location",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::ContractNumber => "contract_number",
            Self::SpacesCleaner => "spaces_cleaner",
            Self::DuplicateReplaceValueCleaner => "duplicate_replace_value_cleaner",
            Self::Blacklist => "blacklist",
        }
    }

    /// One-line description for `list-steps`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Person => "Redact person names (NER)",
            Self::Organization => "Redact organization names (NER)",
            Self::Location => "Redact locations (NER)",
            Self::Email => "Replace email addresses with a decoy address",
            Self::PhoneNumber => "Redact phone numbers, keeping trailing punctuation",
            Self::ContractNumber => "Mask contract and order numbers character by character",
            Self::SpacesCleaner => "Collapse runs of whitespace to a single space",
            Self::DuplicateReplaceValueCleaner => "Merge adjacent redaction markers",
            Self::Blacklist => "Redact configured literal terms",
        }
    }

    /// Entity classes redacted by an NER-backed step, `None` for the others
    pub fn entity_targets(&self) -> Option<Vec<NamedEntityTag>> {
        match self {
            Self::Person => Some(vec![NamedEntityTag::Per, NamedEntityTag::Person]),
            Self::Organization => Some(vec![NamedEntityTag::Org]),
            Self::Location => Some(vec![NamedEntityTag::Loc]),
            _ => None,
        }
    }

    pub fn needs_recognizer(&self) -> bool {
        self.entity_targets().is_some()
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepName {
    type Err = AnonymizerError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(StepName::as_str).collect();
                AnonymizerError::Configuration(format!(
                    "Unknown step '{name}'. Must be one of: {}",
                    known.join(", ")
                ))
            })
    }
}

/// Run-wide settings the steps are built from
#[derive(Debug, Clone, Default)]
pub struct StepOptions {
    pub language: Language,
    pub blacklist: Vec<String>,
    pub exclusions: BTreeMap<StepName, Vec<String>>,
}

impl From<&PipelineConfig> for StepOptions {
    fn from(config: &PipelineConfig) -> Self {
        let mut exclusions = BTreeMap::new();
        exclusions.insert(StepName::Person, config.exclusions.person.clone());
        exclusions.insert(StepName::Organization, config.exclusions.organization.clone());
        exclusions.insert(StepName::Location, config.exclusions.location.clone());

        Self {
            language: config.language,
            blacklist: config.blacklist.clone(),
            exclusions,
        }
    }
}

/// Constructed step instances, keyed by name
///
/// Only requested steps are built, so a run without entity steps never loads
/// a model. Each entity step shares the one recognizer of the run language.
pub struct StepRegistry {
    steps: BTreeMap<StepName, Arc<dyn AnonymizationStep>>,
    language: Language,
}

impl StepRegistry {
    /// Build the steps named in `names`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an entity step is requested without a
    /// recognizer, or if the model for the language cannot be loaded.
    pub fn build(
        names: &[StepName],
        options: &StepOptions,
        recognizers: Option<&RecognizerCache<'_>>,
    ) -> Result<Self> {
        let mut steps: BTreeMap<StepName, Arc<dyn AnonymizationStep>> = BTreeMap::new();

        for &name in names {
            if steps.contains_key(&name) {
                continue;
            }
            let step = Self::build_step(name, options, recognizers)?;
            tracing::debug!(step = %name, "Built step");
            steps.insert(name, step);
        }

        Ok(Self {
            steps,
            language: options.language,
        })
    }

    fn build_step(
        name: StepName,
        options: &StepOptions,
        recognizers: Option<&RecognizerCache<'_>>,
    ) -> Result<Arc<dyn AnonymizationStep>> {
        let step: Arc<dyn AnonymizationStep> = match name {
            StepName::Person | StepName::Organization | StepName::Location => {
                Arc::new(Self::entity_step(name, options, recognizers)?)
            }
            StepName::Email => Arc::new(presets::email()?),
            StepName::PhoneNumber => Arc::new(presets::phone_number()?),
            StepName::ContractNumber => Arc::new(presets::contract_number()?),
            StepName::SpacesCleaner => Arc::new(presets::spaces_cleaner()?),
            StepName::DuplicateReplaceValueCleaner => {
                Arc::new(presets::duplicate_replace_value_cleaner()?)
            }
            StepName::Blacklist => Arc::new(BlacklistAnonymizationStep::new(
                options.blacklist.iter().cloned(),
                DEFAULT_REPLACE_VALUE,
            )),
        };
        Ok(step)
    }

    fn entity_step(
        name: StepName,
        options: &StepOptions,
        recognizers: Option<&RecognizerCache<'_>>,
    ) -> Result<EntityAnonymizerStep> {
        let cache = recognizers.ok_or_else(|| {
            AnonymizerError::Configuration(format!(
                "Step '{name}' needs a named-entity recognizer but none is configured"
            ))
        })?;
        let recognizer = cache.get(options.language)?;
        let exclusions = options.exclusions.get(&name).cloned().unwrap_or_default();

        Ok(EntityAnonymizerStep::new(
            recognizer,
            name.entity_targets().unwrap_or_default(),
            DEFAULT_REPLACE_VALUE,
        )
        .with_exclusions(exclusions))
    }

    /// Language the entity steps were built for
    pub fn language(&self) -> Language {
        self.language
    }

    /// Step instance by name, if it was built
    pub fn get(&self, name: StepName) -> Option<Arc<dyn AnonymizationStep>> {
        self.steps.get(&name).cloned()
    }

    /// Assemble a pipeline in the given order
    ///
    /// A name may appear more than once; every occurrence reuses the same
    /// instance.
    pub fn pipeline(&self, names: &[StepName]) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new();
        for &name in names {
            let step = self.get(name).ok_or_else(|| {
                AnonymizerError::Configuration(format!("Step '{name}' was not built"))
            })?;
            pipeline.push(name.as_str(), step);
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ner::{GazetteerEntry, GazetteerProvider};

    #[test]
    fn test_step_name_round_trip() {
        for step in StepName::ALL {
            assert_eq!(step.as_str().parse::<StepName>().unwrap(), step);
        }
    }

    #[test]
    fn test_unknown_step_name() {
        let err = "phone".parse::<StepName>().unwrap_err();
        assert!(matches!(err, AnonymizerError::Configuration(_)));
        assert!(err.to_string().contains("phone_number"));
    }

    #[test]
    fn test_clap_names_match_catalogue() {
        for step in StepName::ALL {
            let value = step.to_possible_value().unwrap();
            assert_eq!(value.get_name(), step.as_str());
        }
    }

    #[test]
    fn test_default_pipeline_order() {
        let names: Vec<&str> = DEFAULT_PIPELINE.iter().map(StepName::as_str).collect();
        assert_eq!(
            names,
            [
                "spaces_cleaner",
                "person",
                "contract_number",
                "phone_number",
                "email",
                "duplicate_replace_value_cleaner",
                "blacklist"
            ]
        );
    }

    #[test]
    fn test_pattern_steps_build_without_recognizer() {
        let names = [StepName::Email, StepName::Blacklist];
        let options = StepOptions {
            blacklist: vec!["asd".to_string()],
            ..StepOptions::default()
        };
        let registry = StepRegistry::build(&names, &options, None).unwrap();
        let pipeline = registry.pipeline(&names).unwrap();

        assert_eq!(pipeline.apply("asd wrote a@b.ch").unwrap(), "(...) wrote abc@xyz.de");
        assert!(registry.get(StepName::Person).is_none());
    }

    #[test]
    fn test_entity_step_requires_recognizer() {
        let result = StepRegistry::build(&[StepName::Person], &StepOptions::default(), None);
        assert!(matches!(result, Err(AnonymizerError::Configuration(_))));
    }

    #[test]
    fn test_entity_steps_share_one_model() {
        let provider = GazetteerProvider::new(vec![GazetteerEntry {
            label: "ORG".to_string(),
            phrase: "Acme".to_string(),
            languages: vec![],
        }]);
        let cache = RecognizerCache::new(&provider);

        let names = [StepName::Person, StepName::Organization, StepName::Location];
        let registry = StepRegistry::build(&names, &StepOptions::default(), Some(&cache)).unwrap();

        assert_eq!(cache.loaded_count(), 1);
        let pipeline = registry.pipeline(&names).unwrap();
        assert_eq!(pipeline.apply("wrote to Acme today").unwrap(), "wrote to (...) today");
    }

    #[test]
    fn test_pipeline_rejects_unbuilt_step() {
        let registry =
            StepRegistry::build(&[StepName::Email], &StepOptions::default(), None).unwrap();
        assert!(registry.pipeline(&[StepName::PhoneNumber]).is_err());
    }
}
