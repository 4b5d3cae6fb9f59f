//! Anonymization steps and the pipeline that chains them
//!
//! Every strategy implements [`AnonymizationStep`], a pure text-to-text
//! transformation, so steps can be freely ordered:
//!
//! - **Pattern steps** ([`RegexAnonymizationStep`]): substitution or
//!   per-character masking of pattern matches, with the preconfigured
//!   instances in [`presets`]
//! - **Blacklist** ([`BlacklistAnonymizationStep`]): literal term replacement
//! - **Entity steps** ([`EntityAnonymizerStep`]): redaction of names,
//!   organizations and locations found by a named-entity recognizer
//!
//! [`StepRegistry`] builds the selected steps once per run and assembles
//! them into a [`Pipeline`].
//!
//! # Usage
//!
//! ```rust
//! use verbatim_anonymizer::anonymization::{StepName, StepOptions, StepRegistry};
//!
//! let names = [StepName::SpacesCleaner, StepName::PhoneNumber, StepName::Email];
//! let registry = StepRegistry::build(&names, &StepOptions::default(), None)?;
//! let pipeline = registry.pipeline(&names)?;
//!
//! let out = pipeline.apply("Call  079-123-45-67.")?;
//! assert_eq!(out, "Call (...).");
//! # Ok::<(), verbatim_anonymizer::domain::AnonymizerError>(())
//! ```

pub mod blacklist;
pub mod entity;
pub mod pattern;
pub mod pipeline;
pub mod presets;
pub mod registry;
pub mod step;

pub use blacklist::BlacklistAnonymizationStep;
pub use entity::EntityAnonymizerStep;
pub use pattern::{RegexAnonymizationStep, RegexStepBuilder, ReplaceMode};
pub use pipeline::{NamedStep, Pipeline};
pub use registry::{StepName, StepOptions, StepRegistry, DEFAULT_PIPELINE};
pub use step::{AnonymizationStep, IdentityStep, DEFAULT_REPLACE_VALUE};
