//! Offline recognizer driven by a phrase list
//!
//! Useful when no tagging service is reachable, or to pin down names that a
//! statistical model keeps missing. The gazetteer is a TOML file:
//!
//! ```toml
//! [[entries]]
//! label = "PERSON"
//! phrase = "Peter Parker"
//!
//! [[entries]]
//! label = "ORG"
//! phrase = "Stadtwerke Bern"
//! languages = ["de"]
//! ```
//!
//! Text is split on whitespace, leading and trailing punctuation become
//! tokens of their own, a sentence ends after a `.`, `!` or `?` token, and the
//! longest phrase matching at a position (case-insensitively) is merged into a
//! single tagged token.

use super::traits::{EntityRecognizer, RecognizerProvider};
use crate::domain::{Language, NamedEntityTag, NerError, Sentence, Token};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// One phrase of the gazetteer file
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerEntry {
    /// Entity label, e.g. `PERSON`, `PER`, `ORG`, `LOC`
    pub label: String,

    /// Phrase as it appears in text
    pub phrase: String,

    /// Languages the phrase applies to (empty = all)
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    #[serde(default)]
    entries: Vec<GazetteerEntry>,
}

/// Provider building one [`GazetteerRecognizer`] per language
#[derive(Debug, Clone)]
pub struct GazetteerProvider {
    entries: Vec<GazetteerEntry>,
}

impl GazetteerProvider {
    /// Create a provider from in-memory entries
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        Self { entries }
    }

    /// Parse a gazetteer from TOML content
    pub fn from_toml(content: &str) -> Result<Self, NerError> {
        let file: GazetteerFile = toml::from_str(content)
            .map_err(|e| NerError::Gazetteer(format!("Failed to parse gazetteer TOML: {e}")))?;
        Ok(Self::new(file.entries))
    }

    /// Read a gazetteer file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NerError::Gazetteer(format!(
                "Failed to read gazetteer {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }
}

impl RecognizerProvider for GazetteerProvider {
    fn load(&self, language: Language) -> Result<Arc<dyn EntityRecognizer>, NerError> {
        let entries = self
            .entries
            .iter()
            .filter(|e| e.languages.is_empty() || e.languages.contains(&language))
            .cloned();
        Ok(Arc::new(GazetteerRecognizer::new(language, entries)))
    }
}

#[derive(Debug, Clone)]
struct Phrase {
    words: Vec<String>,
    tag: NamedEntityTag,
}

/// Phrase-matching recognizer for one language
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    language: Language,
    phrases: Vec<Phrase>,
}

impl GazetteerRecognizer {
    /// Build a recognizer; longer phrases win over shorter ones
    pub fn new(language: Language, entries: impl IntoIterator<Item = GazetteerEntry>) -> Self {
        let mut phrases: Vec<Phrase> = entries
            .into_iter()
            .map(|entry| Phrase {
                words: tokenize(&entry.phrase)
                    .into_iter()
                    .map(|t| t.text.to_lowercase())
                    .filter(|w| !w.trim().is_empty())
                    .collect(),
                tag: NamedEntityTag::from(entry.label.as_str()),
            })
            .filter(|p| !p.words.is_empty())
            .collect();
        phrases.sort_by(|a, b| b.words.len().cmp(&a.words.len()));

        Self { language, phrases }
    }

    fn longest_match(&self, tokens: &[Token]) -> Option<&Phrase> {
        self.phrases.iter().find(|phrase| {
            phrase.words.len() <= tokens.len()
                && phrase
                    .words
                    .iter()
                    .zip(tokens)
                    .all(|(word, token)| token.text.to_lowercase() == *word)
        })
    }

    fn merge_entities(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut merged = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            match self.longest_match(&tokens[i..]) {
                Some(phrase) => {
                    let end = i + phrase.words.len();
                    let last = &tokens[end - 1];
                    let mut text: String =
                        tokens[i..end - 1].iter().map(Token::text_with_ws).collect();
                    text.push_str(&last.text);

                    merged.push(
                        Token::new(text, last.whitespace.clone()).with_entity(phrase.tag.clone()),
                    );
                    i = end;
                }
                None => {
                    merged.push(tokens[i].clone());
                    i += 1;
                }
            }
        }

        merged
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn language(&self) -> Language {
        self.language
    }

    fn tag(&self, text: &str) -> Result<Vec<Sentence>, NerError> {
        Ok(split_sentences(tokenize(text))
            .into_iter()
            .map(|sentence| self.merge_entities(sentence))
            .collect())
    }
}

/// Split text into tokens whose `text_with_ws` concatenation equals `text`
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = text;

    let leading = rest.len() - rest.trim_start().len();
    if leading > 0 {
        tokens.push(Token::new(&rest[..leading], ""));
        rest = &rest[leading..];
    }

    while !rest.is_empty() {
        let chunk_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (chunk, after) = rest.split_at(chunk_end);
        let ws_end = after.len() - after.trim_start().len();
        let (whitespace, remaining) = after.split_at(ws_end);

        push_chunk(&mut tokens, chunk, whitespace);
        rest = remaining;
    }

    tokens
}

fn push_chunk(tokens: &mut Vec<Token>, chunk: &str, whitespace: &str) {
    let core_start = chunk
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i);

    let Some(core_start) = core_start else {
        tokens.push(Token::new(chunk, whitespace));
        return;
    };
    let core_end = chunk
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(chunk.len());

    let mut pieces: Vec<&str> = Vec::new();
    pieces.extend(split_chars(&chunk[..core_start]));
    pieces.push(&chunk[core_start..core_end]);
    pieces.extend(split_chars(&chunk[core_end..]));

    let last = pieces.len() - 1;
    for (idx, piece) in pieces.into_iter().enumerate() {
        let ws = if idx == last { whitespace } else { "" };
        tokens.push(Token::new(piece, ws));
    }
}

fn split_chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices().map(move |(i, c)| &s[i..i + c.len_utf8()])
}

fn is_sentence_end(token: &Token) -> bool {
    !token.text.is_empty() && token.text.chars().all(|c| matches!(c, '.' | '!' | '?'))
}

fn split_sentences(tokens: Vec<Token>) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        let ends = is_sentence_end(&token);
        current.push(token);
        if ends {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}
