//! Literal-string redaction

use super::step::AnonymizationStep;
use crate::domain::Result;

/// Replaces every literal occurrence of each blacklisted term
///
/// Terms are applied in list order, so later terms see the output of
/// earlier replacements.
#[derive(Debug, Clone)]
pub struct BlacklistAnonymizationStep {
    blacklist: Vec<String>,
    replace_value: String,
}

impl BlacklistAnonymizationStep {
    /// Create a step from an ordered list of terms
    ///
    /// Empty terms are dropped.
    pub fn new<I, S>(blacklist: I, replace_value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blacklist: blacklist
                .into_iter()
                .map(Into::into)
                .filter(|term: &String| !term.is_empty())
                .collect(),
            replace_value: replace_value.into(),
        }
    }

    /// Terms in application order
    pub fn terms(&self) -> &[String] {
        &self.blacklist
    }
}

impl AnonymizationStep for BlacklistAnonymizationStep {
    fn apply(&self, text: &str) -> Result<String> {
        Ok(self
            .blacklist
            .iter()
            .fold(text.to_string(), |acc, term| {
                acc.replace(term.as_str(), &self.replace_value)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_replaces_term() {
        let step = BlacklistAnonymizationStep::new(["asd"], "...");
        let out = step.apply("dies ist asd").unwrap();
        assert!(!out.contains("asd"));
        assert_eq!(out, "dies ist ...");
    }

    #[test]
    fn test_blacklist_is_literal() {
        let step = BlacklistAnonymizationStep::new(["a.c"], "X");
        assert_eq!(step.apply("abc a.c").unwrap(), "abc X");
    }

    #[test]
    fn test_later_terms_see_earlier_output() {
        let step = BlacklistAnonymizationStep::new(["Zurich", "ch (...)"], "(...)");
        assert_eq!(step.apply("Branch Zurich").unwrap(), "Bran(...)");
    }

    #[test]
    fn test_empty_terms_are_dropped() {
        let step = BlacklistAnonymizationStep::new(["", "x"], "-");
        assert_eq!(step.terms(), ["x".to_string()]);
        assert_eq!(step.apply("axb").unwrap(), "a-b");
    }

    #[test]
    fn test_empty_blacklist_is_noop() {
        let step = BlacklistAnonymizationStep::new(Vec::<String>::new(), "(...)");
        assert_eq!(step.apply("nothing to do").unwrap(), "nothing to do");
    }
}
