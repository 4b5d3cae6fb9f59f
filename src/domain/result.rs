//! Result type alias for the anonymizer

use super::errors::AnonymizerError;

/// Result type alias using [`AnonymizerError`]
///
/// # Examples
///
/// ```
/// use verbatim_anonymizer::domain::result::Result;
/// use verbatim_anonymizer::domain::errors::AnonymizerError;
///
/// fn missing_column() -> Result<()> {
///     Err(AnonymizerError::InputFormat("column 'Text_1' not found".to_string()))
/// }
///
/// assert!(missing_column().is_err());
/// ```
pub type Result<T> = std::result::Result<T, AnonymizerError>;
