//! Core orchestration for anonymization runs.
//!
//! # Run Workflow
//!
//! 1. **Build**: construct the selected steps once, loading the NER model for
//!    the run language only if an entity step is selected
//! 2. **Read**: load the whole CSV or Excel table and verify every requested column
//! 3. **Transform**: run the pipeline over each column, row order preserved
//! 4. **Write**: write the table in the format of the output extension
//! 5. **Report**: return a [`run::RunSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use verbatim_anonymizer::config::AnonymizerConfig;
//! use verbatim_anonymizer::core::run::{RunCoordinator, RunRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnonymizerConfig::default();
//! let coordinator = RunCoordinator::from_config(&config)?;
//!
//! let request = RunRequest::new("survey.csv", "survey_anon.csv", vec!["Text_1".to_string()]);
//! let summary = coordinator.execute(&request)?;
//! println!("Wrote {}", summary.output_path.display());
//! # Ok(())
//! # }
//! ```

pub mod run;
