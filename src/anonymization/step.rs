//! The step contract shared by every anonymization strategy

use crate::domain::Result;

/// Sentinel substituted for detected sensitive spans
pub const DEFAULT_REPLACE_VALUE: &str = "(...)";

/// A single text transformation of the anonymization pipeline
///
/// Implementations are immutable once constructed and may be shared across
/// threads; `apply` must not mutate any shared state and must return the same
/// output for the same input.
pub trait AnonymizationStep: Send + Sync {
    /// Transform one text value
    fn apply(&self, text: &str) -> Result<String>;
}

/// Step that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStep;

impl AnonymizationStep for IdentityStep {
    fn apply(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_returns_input() {
        let step = IdentityStep;
        assert_eq!(step.apply("Peter Parker, +41 79 123 34 56").unwrap(), "Peter Parker, +41 79 123 34 56");
        assert_eq!(step.apply("").unwrap(), "");
    }
}
