//! Tagged tokens produced by a named-entity recognizer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity category predicted for a token
///
/// `Per` comes from models trained on WikiNER-style labels (the German
/// model), `Person` from OntoNotes-style labels (the English model). Labels
/// outside this set are kept verbatim in [`NamedEntityTag::Other`] and never
/// match a redaction target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NamedEntityTag {
    /// `PER`
    Per,
    /// `PERSON`
    Person,
    /// `LOC`
    Loc,
    /// `ORG`
    Org,
    /// `MISC`
    Misc,
    /// Any other label emitted by the model
    Other(String),
}

impl NamedEntityTag {
    /// The label as emitted by the model
    pub fn label(&self) -> &str {
        match self {
            Self::Per => "PER",
            Self::Person => "PERSON",
            Self::Loc => "LOC",
            Self::Org => "ORG",
            Self::Misc => "MISC",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for NamedEntityTag {
    fn from(label: &str) -> Self {
        match label {
            "PER" => Self::Per,
            "PERSON" => Self::Person,
            "LOC" => Self::Loc,
            "ORG" => Self::Org,
            "MISC" => Self::Misc,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for NamedEntityTag {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<NamedEntityTag> for String {
    fn from(tag: NamedEntityTag) -> Self {
        tag.label().to_string()
    }
}

impl fmt::Display for NamedEntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One token of a tagged sentence
///
/// Multi-word entities arrive already merged into a single token, so `text`
/// may contain inner spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,

    /// Whitespace that followed the token in the source text
    #[serde(default)]
    pub whitespace: String,

    /// Predicted entity tag, if any
    #[serde(default)]
    pub entity: Option<NamedEntityTag>,
}

impl Token {
    /// Create an untagged token
    pub fn new(text: impl Into<String>, whitespace: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace: whitespace.into(),
            entity: None,
        }
    }

    /// Attach an entity tag
    pub fn with_entity(mut self, entity: NamedEntityTag) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Whether whitespace followed the token
    pub fn has_trailing_whitespace(&self) -> bool {
        !self.whitespace.is_empty()
    }

    /// Surface text followed by its original whitespace
    pub fn text_with_ws(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + self.whitespace.len());
        out.push_str(&self.text);
        out.push_str(&self.whitespace);
        out
    }
}

/// A sentence is an ordered run of tokens
pub type Sentence = Vec<Token>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(NamedEntityTag::from("PER"), NamedEntityTag::Per);
        assert_eq!(NamedEntityTag::from("PERSON"), NamedEntityTag::Person);
        assert_eq!(
            NamedEntityTag::from("GPE"),
            NamedEntityTag::Other("GPE".to_string())
        );
        assert_eq!(NamedEntityTag::from("GPE").label(), "GPE");
    }

    #[test]
    fn test_token_deserialize() {
        let token: Token =
            serde_json::from_str(r#"{"text":"Peter Parker","whitespace":" ","entity":"PERSON"}"#)
                .unwrap();
        assert_eq!(token.entity, Some(NamedEntityTag::Person));
        assert!(token.has_trailing_whitespace());
        assert_eq!(token.text_with_ws(), "Peter Parker ");

        let bare: Token = serde_json::from_str(r#"{"text":"."}"#).unwrap();
        assert_eq!(bare.entity, None);
        assert_eq!(bare.text_with_ws(), ".");
    }
}
