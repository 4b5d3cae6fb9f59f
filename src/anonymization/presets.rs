//! Preconfigured pattern steps
//!
//! The patterns are part of the output contract: changing one changes which
//! substrings of existing verbatims get redacted.

use super::pattern::RegexAnonymizationStep;
use super::step::DEFAULT_REPLACE_VALUE;
use crate::domain::Result;

/// `local@domain`, tolerating one stray space around `@` or the final dot
pub const EMAIL_PATTERN: &str = r"(\S+|\S+\s)@(\s\S+|\S+)(\.|\s\.)(\S+|\s\S+)";

/// Decoy address written in place of an email
pub const EMAIL_DECOY: &str = "abc@xyz.de";

/// Optional `+` and bracketed prefix, then at least two digit groups; the
/// character right after the number is captured in group 2
pub const PHONE_NUMBER_PATTERN: &str =
    r"[+]*[(]{0,1}[0-9]{1,4}[)]{0,1}([\s-]{0,1}[0-9]{2,}){2,}($|[\s,.])";

/// Five or more of `[A-ZÄÖÜ0-9-]`, gated on a digit and an uppercase letter
/// further along the line
pub const CONTRACT_NUMBER_PATTERN: &str = r"(?=.*[0-9])(?=.*[A-Z])([A-ZÄÖÜ0-9-]{5,})";

/// Character repeated over a masked contract number
pub const MASK_CHAR: &str = "x";

/// Runs of two or more whitespace characters
pub const SPACES_PATTERN: &str = r"\s{2,}";

/// Redacted email addresses
pub fn email() -> Result<RegexAnonymizationStep> {
    RegexAnonymizationStep::builder(EMAIL_PATTERN, EMAIL_DECOY)
        .label("email")
        .ignore_case(true)
        .build()
}

/// Redacted phone numbers, keeping the character that followed the number
pub fn phone_number() -> Result<RegexAnonymizationStep> {
    RegexAnonymizationStep::builder(PHONE_NUMBER_PATTERN, format!("{DEFAULT_REPLACE_VALUE}${{2}}"))
        .label("phone_number")
        .ignore_case(false)
        .build()
}

/// Contract and order numbers masked character by character
pub fn contract_number() -> Result<RegexAnonymizationStep> {
    RegexAnonymizationStep::builder(CONTRACT_NUMBER_PATTERN, MASK_CHAR)
        .label("contract_number")
        .ignore_case(false)
        .translate(true)
        .build()
}

/// Collapses whitespace runs to a single space
pub fn spaces_cleaner() -> Result<RegexAnonymizationStep> {
    RegexAnonymizationStep::builder(SPACES_PATTERN, " ")
        .label("spaces_cleaner")
        .build()
}

/// Merges sentinels separated by single non-word characters into one
///
/// A whole chain such as `(...) (...),(...)` is consumed in one match, so a
/// second pass finds nothing left to merge. A pattern that only took one
/// separator and the sentinels up to the next separator per match,
/// `sentinel\W(sentinel)+`, would leave `(...) (...) (...)` as two markers
/// after a single pass.
pub fn duplicate_replace_value_cleaner() -> Result<RegexAnonymizationStep> {
    let sentinel = regex::escape(DEFAULT_REPLACE_VALUE);
    let pattern = format!(r"{sentinel}(?:\W(?:{sentinel})+)+");

    RegexAnonymizationStep::builder(&pattern, DEFAULT_REPLACE_VALUE)
        .label("duplicate_replace_value_cleaner")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::step::AnonymizationStep;

    #[test]
    fn test_presets_compile() {
        assert!(email().is_ok());
        assert!(phone_number().is_ok());
        assert!(contract_number().is_ok());
        assert!(spaces_cleaner().is_ok());
        assert!(duplicate_replace_value_cleaner().is_ok());
    }

    #[test]
    fn test_phone_keeps_trailing_period() {
        let step = phone_number().unwrap();
        assert_eq!(step.apply("Call 079-123-45-67.").unwrap(), "Call (...).");
    }

    #[test]
    fn test_phone_at_end_of_text() {
        let step = phone_number().unwrap();
        assert_eq!(step.apply("Call +41 79 123 34 56").unwrap(), "Call (...)");
    }

    #[test]
    fn test_email_only_text() {
        let step = email().unwrap();
        assert_eq!(step.apply("test@gmail.com").unwrap(), EMAIL_DECOY);
    }

    #[test]
    fn test_contract_number_masked() {
        let step = contract_number().unwrap();
        assert_eq!(
            step.apply("Auftrag A4312-1234 offen").unwrap(),
            "Auftrag xxxxxxxxxx offen"
        );
    }

    #[test]
    fn test_duplicate_chain_collapses() {
        let step = duplicate_replace_value_cleaner().unwrap();
        assert_eq!(step.apply("(...) (...),(...) ok").unwrap(), "(...) ok");
    }

    #[test]
    fn test_three_space_separated_sentinels_merge_in_one_pass() {
        let step = duplicate_replace_value_cleaner().unwrap();
        assert_eq!(step.apply("(...) (...) (...)").unwrap(), DEFAULT_REPLACE_VALUE);
        assert_eq!(
            step.apply("best, (...) (...) (...) and (...)").unwrap(),
            "best, (...) and (...)"
        );
    }

    #[test]
    fn test_contract_number_on_long_cell_without_digits() {
        let step = contract_number().unwrap();
        let cell = "sehr zufrieden mit dem Service ".repeat(70);
        assert_eq!(step.apply(&cell).unwrap(), cell);
    }

    #[test]
    fn test_duplicate_cleaner_leaves_single_sentinel() {
        let step = duplicate_replace_value_cleaner().unwrap();
        assert_eq!(step.apply("a (...) b (...)").unwrap(), "a (...) b (...)");
    }
}
