//! Domain types shared across the anonymizer.
//!
//! - **Error types** ([`AnonymizerError`], [`NerError`]) and the [`Result`] alias
//! - **Language selector** ([`Language`]) mapping to a pretrained NER model
//! - **Tagged tokens** ([`Token`], [`Sentence`], [`NamedEntityTag`]) exchanged
//!   with named-entity recognizers
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T>`]:
//!
//! ```rust
//! use verbatim_anonymizer::domain::{Language, Result};
//!
//! fn example() -> Result<Language> {
//!     let language: Language = "de".parse()?;
//!     Ok(language)
//! }
//! # assert!(example().is_ok());
//! ```

pub mod entity;
pub mod errors;
pub mod language;
pub mod result;

pub use entity::{NamedEntityTag, Sentence, Token};
pub use errors::{AnonymizerError, NerError};
pub use language::Language;
pub use result::Result;
