//! Ordered execution of anonymization steps

use super::step::AnonymizationStep;
use crate::domain::{AnonymizerError, Result};
use std::sync::Arc;
use std::time::Instant;

/// A step together with the name it was selected by
#[derive(Clone)]
pub struct NamedStep {
    pub name: String,
    pub step: Arc<dyn AnonymizationStep>,
}

/// Steps applied in sequence, each to the output of the previous one
///
/// Built once per run and never modified while rows are processed.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<NamedStep>,
}

impl Pipeline {
    /// Create an empty pipeline, which returns its input unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, name: impl Into<String>, step: Arc<dyn AnonymizationStep>) {
        self.steps.push(NamedStep {
            name: name.into(),
            step,
        });
    }

    /// Builder-style [`Pipeline::push`]
    pub fn with_step(mut self, name: impl Into<String>, step: Arc<dyn AnonymizationStep>) -> Self {
        self.push(name, step);
        self
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step over one text value
    pub fn apply(&self, text: &str) -> Result<String> {
        let mut current = text.to_string();

        for named in &self.steps {
            let start = Instant::now();
            current = named.step.apply(&current)?;
            tracing::trace!(
                step = %named.name,
                output_len = current.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "Applied step"
            );
        }

        Ok(current)
    }

    /// Run the pipeline over a column of values, preserving order
    ///
    /// Empty cells are passed through. With more than one worker the column
    /// is split into contiguous chunks processed on scoped threads that share
    /// the same step instances; the first error aborts the whole column.
    pub fn apply_all(&self, values: &[String], workers: usize) -> Result<Vec<String>> {
        if workers <= 1 || values.len() < 2 {
            return self.apply_chunk(values);
        }

        let chunk_size = values.len().div_ceil(workers);
        tracing::debug!(
            values = values.len(),
            workers,
            chunk_size,
            "Processing column in parallel"
        );

        std::thread::scope(|scope| {
            let handles: Vec<_> = values
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.apply_chunk(chunk)))
                .collect();

            let mut out = Vec::with_capacity(values.len());
            for handle in handles {
                let part = handle.join().map_err(|_| {
                    AnonymizerError::Other("Anonymization worker panicked".to_string())
                })??;
                out.extend(part);
            }
            Ok(out)
        })
    }

    fn apply_chunk(&self, values: &[String]) -> Result<Vec<String>> {
        values
            .iter()
            .map(|value| {
                if value.is_empty() {
                    Ok(String::new())
                } else {
                    self.apply(value)
                }
            })
            .collect()
    }
}

impl AnonymizationStep for Pipeline {
    fn apply(&self, text: &str) -> Result<String> {
        Pipeline::apply(self, text)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.step_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::blacklist::BlacklistAnonymizationStep;
    use crate::anonymization::pattern::RegexAnonymizationStep;

    struct Suffix(&'static str);

    impl AnonymizationStep for Suffix {
        fn apply(&self, text: &str) -> Result<String> {
            Ok(format!("{text}{}", self.0))
        }
    }

    struct Failing;

    impl AnonymizationStep for Failing {
        fn apply(&self, _text: &str) -> Result<String> {
            Err(AnonymizerError::Other("boom".to_string()))
        }
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply("unchanged").unwrap(), "unchanged");
    }

    #[test]
    fn test_steps_run_in_order() {
        let pipeline = Pipeline::new()
            .with_step("a", Arc::new(Suffix("-a")))
            .with_step("b", Arc::new(Suffix("-b")));

        assert_eq!(pipeline.step_names(), ["a", "b"]);
        assert_eq!(pipeline.apply("x").unwrap(), "x-a-b");
    }

    #[test]
    fn test_later_steps_see_earlier_output() {
        let pipeline = Pipeline::new()
            .with_step(
                "spaces",
                Arc::new(RegexAnonymizationStep::new(r"\s{2,}", " ").unwrap()),
            )
            .with_step(
                "blacklist",
                Arc::new(BlacklistAnonymizationStep::new(["foo bar"], "(...)")),
            );

        assert_eq!(pipeline.apply("say foo   bar").unwrap(), "say (...)");
    }

    #[test]
    fn test_error_aborts() {
        let pipeline = Pipeline::new()
            .with_step("ok", Arc::new(Suffix("!")))
            .with_step("fail", Arc::new(Failing));
        assert!(pipeline.apply("x").is_err());
    }

    #[test]
    fn test_apply_all_preserves_order_across_workers() {
        let pipeline = Pipeline::new().with_step("a", Arc::new(Suffix("-a")));
        let values: Vec<String> = (0..25).map(|i| format!("row{i}")).collect();

        let sequential = pipeline.apply_all(&values, 1).unwrap();
        let parallel = pipeline.apply_all(&values, 4).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel[0], "row0-a");
        assert_eq!(parallel[24], "row24-a");
    }

    #[test]
    fn test_apply_all_skips_empty_cells() {
        let pipeline = Pipeline::new().with_step("a", Arc::new(Suffix("-a")));
        let values = vec![String::new(), "x".to_string()];
        assert_eq!(pipeline.apply_all(&values, 2).unwrap(), ["", "x-a"]);
    }

    #[test]
    fn test_apply_all_propagates_error() {
        let pipeline = Pipeline::new().with_step("fail", Arc::new(Failing));
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(pipeline.apply_all(&values, 3).is_err());
    }
}
