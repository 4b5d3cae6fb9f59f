// Verbatim Anonymizer - redaction of sensitive fragments in free-text fields
// Copyright (c) 2025 Verbatim Anonymizer Contributors
// Licensed under the MIT License

//! # Verbatim Anonymizer
//!
//! Redacts personally identifiable and sensitive fragments (names,
//! organizations, locations, phone numbers, emails, contract numbers) from
//! free-text "verbatim" columns before the data is shared.
//!
//! ## Overview
//!
//! The core is a deterministic, order-sensitive pipeline of independent text
//! transformations:
//!
//! - **Pattern steps** replace or mask pattern matches
//! - **Blacklist** replaces literal terms
//! - **Entity steps** redact tokens tagged by a named-entity recognizer
//! - **Cleaners** collapse whitespace and merge adjacent redaction markers
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Run orchestration (read, transform, write, report)
//! - [`anonymization`] - Steps, step registry and pipeline executor
//! - [`adapters`] - Named-entity recognizers and the CSV/Excel table
//! - [`domain`] - Error types, language selector, tagged tokens
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use verbatim_anonymizer::anonymization::{StepName, StepOptions, StepRegistry};
//!
//! let names = [
//!     StepName::SpacesCleaner,
//!     StepName::ContractNumber,
//!     StepName::PhoneNumber,
//!     StepName::Email,
//!     StepName::DuplicateReplaceValueCleaner,
//! ];
//! let registry = StepRegistry::build(&names, &StepOptions::default(), None)?;
//! let pipeline = registry.pipeline(&names)?;
//!
//! let out = pipeline.apply("Mail test@gmail.com or call +41 79 123 34 56")?;
//! assert!(!out.contains("test@gmail.com"));
//! assert!(!out.contains("+41 79 123 34 56"));
//! # Ok::<(), verbatim_anonymizer::domain::AnonymizerError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`]. Every error is fatal for the
//! run; a partially anonymized output file is never written.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
