//! Anonymization run orchestration
//!
//! - [`coordinator`] - read, verify, transform and write one table
//! - [`summary`] - counts and timings reported after a run

pub mod coordinator;
pub mod summary;

pub use coordinator::{RunCoordinator, RunRequest};
pub use summary::RunSummary;
