//! Pattern-driven anonymization step
//!
//! Patterns are compiled with `fancy-regex`, which hands plain patterns to the
//! `regex` engine and falls back to backtracking only for lookaround (needed by
//! the contract-number pattern).

use super::step::AnonymizationStep;
use crate::domain::{AnonymizerError, Result};
use fancy_regex::Regex;
use std::borrow::Cow;

/// How a match is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Replace the whole match with the replacement value; `${n}` expands
    /// capture groups
    #[default]
    Substitute,
    /// Replace every character of the match with the replacement value
    Translate,
}

/// Redacts or masks every non-overlapping match of a pattern
#[derive(Debug, Clone)]
pub struct RegexAnonymizationStep {
    label: String,
    pattern: String,
    regex: Regex,
    replace_value: String,
    mode: ReplaceMode,
}

impl RegexAnonymizationStep {
    /// Case-insensitive substitution step
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pattern does not compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use verbatim_anonymizer::anonymization::{AnonymizationStep, RegexAnonymizationStep};
    ///
    /// let step = RegexAnonymizationStep::new(r"\s{2,}", " ")?;
    /// assert_eq!(step.apply("too   many  spaces")?, "too many spaces");
    /// # Ok::<(), verbatim_anonymizer::domain::AnonymizerError>(())
    /// ```
    pub fn new(pattern: &str, replace_value: impl Into<String>) -> Result<Self> {
        Self::builder(pattern, replace_value).build()
    }

    /// Start building a step with non-default options
    pub fn builder(pattern: &str, replace_value: impl Into<String>) -> RegexStepBuilder {
        RegexStepBuilder {
            label: None,
            pattern: pattern.to_string(),
            replace_value: replace_value.into(),
            ignore_case: true,
            mode: ReplaceMode::Substitute,
        }
    }

    /// Pattern as written, without the case flag
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replacement value
    pub fn replace_value(&self) -> &str {
        &self.replace_value
    }

    /// Replacement mode
    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    fn substitute(&self, text: &str) -> Result<String> {
        self.regex
            .try_replacen(text, 0, self.replace_value.as_str())
            .map(Cow::into_owned)
            .map_err(|e| self.pattern_error(e))
    }

    fn translate(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for found in self.regex.find_iter(text) {
            let found = found.map_err(|e| self.pattern_error(e))?;
            out.push_str(&text[last..found.start()]);
            out.push_str(&self.replace_value.repeat(found.as_str().chars().count()));
            last = found.end();
        }

        out.push_str(&text[last..]);
        Ok(out)
    }

    fn pattern_error(&self, err: fancy_regex::Error) -> AnonymizerError {
        AnonymizerError::Pattern {
            step: self.label.clone(),
            message: err.to_string(),
        }
    }
}

impl AnonymizationStep for RegexAnonymizationStep {
    fn apply(&self, text: &str) -> Result<String> {
        match self.mode {
            ReplaceMode::Substitute => self.substitute(text),
            ReplaceMode::Translate => self.translate(text),
        }
    }
}

/// Builder for [`RegexAnonymizationStep`]
#[derive(Debug, Clone)]
pub struct RegexStepBuilder {
    label: Option<String>,
    pattern: String,
    replace_value: String,
    ignore_case: bool,
    mode: ReplaceMode,
}

impl RegexStepBuilder {
    /// Name used in error messages (defaults to the pattern)
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Match case-insensitively (default `true`)
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Mask per character instead of replacing the whole match
    pub fn translate(mut self, translate: bool) -> Self {
        self.mode = if translate {
            ReplaceMode::Translate
        } else {
            ReplaceMode::Substitute
        };
        self
    }

    /// Compile the pattern
    pub fn build(self) -> Result<RegexAnonymizationStep> {
        let source = if self.ignore_case {
            format!("(?i){}", self.pattern)
        } else {
            self.pattern.clone()
        };

        let regex = Regex::new(&source).map_err(|e| {
            AnonymizerError::Configuration(format!("Invalid pattern '{}': {e}", self.pattern))
        })?;

        Ok(RegexAnonymizationStep {
            label: self.label.unwrap_or_else(|| self.pattern.clone()),
            pattern: self.pattern,
            regex,
            replace_value: self.replace_value,
            mode: self.mode,
        })
    }
}
