//! Language selector for named-entity recognition

use crate::domain::errors::AnonymizerError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the verbatims
///
/// Fixed at step construction time; each language maps to exactly one
/// pretrained NER model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German
    De,
    /// English
    #[default]
    En,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    /// Identifier of the pretrained model used for this language
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::De => "de_core_news_lg",
            Self::En => "en_core_web_lg",
        }
    }

    /// Short language code
    pub fn code(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AnonymizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "de" => Ok(Self::De),
            "en" => Ok(Self::En),
            other => Err(AnonymizerError::Configuration(format!(
                "Unsupported language '{other}'. Must be one of: de, en"
            ))),
        }
    }
}
