//! Named-entity redaction step

use super::step::AnonymizationStep;
use crate::adapters::ner::EntityRecognizer;
use crate::domain::{Language, NamedEntityTag, Result, Sentence, Token};
use std::collections::HashSet;
use std::sync::Arc;

/// Redacts tokens the recognizer tags with one of the target entity classes
///
/// The recognizer is bound at construction, so the language of a step never
/// changes after it has been built.
pub struct EntityAnonymizerStep {
    recognizer: Arc<dyn EntityRecognizer>,
    entities: Vec<NamedEntityTag>,
    replace_value: String,
    exclude: HashSet<String>,
}

impl EntityAnonymizerStep {
    /// Create a step redacting `entities` with `replace_value`
    pub fn new(
        recognizer: Arc<dyn EntityRecognizer>,
        entities: Vec<NamedEntityTag>,
        replace_value: impl Into<String>,
    ) -> Self {
        Self {
            recognizer,
            entities,
            replace_value: replace_value.into(),
            exclude: HashSet::new(),
        }
    }

    /// Words that keep a tagged token unredacted when they appear as one of
    /// its space-separated parts (compared lowercase)
    pub fn with_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    /// Language of the bound recognizer
    pub fn language(&self) -> Language {
        self.recognizer.language()
    }

    /// Target entity classes
    pub fn entities(&self) -> &[NamedEntityTag] {
        &self.entities
    }

    fn is_excluded(&self, token: &Token) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        token
            .text
            .to_lowercase()
            .split(' ')
            .any(|part| self.exclude.contains(part))
    }

    fn is_target(&self, token: &Token) -> bool {
        token
            .entity
            .as_ref()
            .is_some_and(|tag| self.entities.contains(tag))
    }

    fn redact_sentence(&self, sentence: &Sentence, out: &mut String) {
        for (i, token) in sentence.iter().enumerate() {
            if !self.is_target(token) || self.is_excluded(token) {
                out.push_str(&token.text_with_ws());
                continue;
            }

            // A lone capitalized word opening a sentence is usually a misread
            // common word ("Fantastic job")
            let single_leading_capital = i == 0
                && token.text.chars().next().is_some_and(char::is_uppercase)
                && !token.text.contains(' ');

            if single_leading_capital {
                out.push_str(&token.text_with_ws());
            } else {
                out.push_str(&self.replace_value);
                if token.has_trailing_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
}

impl AnonymizationStep for EntityAnonymizerStep {
    fn apply(&self, text: &str) -> Result<String> {
        let sentences = self.recognizer.tag(text)?;

        let mut out = String::with_capacity(text.len());
        for sentence in &sentences {
            self.redact_sentence(sentence, &mut out);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for EntityAnonymizerStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityAnonymizerStep")
            .field("language", &self.language())
            .field("entities", &self.entities)
            .field("replace_value", &self.replace_value)
            .field("exclude", &self.exclude)
            .finish()
    }
}
