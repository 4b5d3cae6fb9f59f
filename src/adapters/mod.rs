//! External integrations
//!
//! - [`ner`] - named-entity recognizers (tagging service, gazetteer)
//! - [`tabular`] - CSV source and sink for verbatim columns

pub mod ner;
pub mod tabular;
