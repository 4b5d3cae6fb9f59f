//! List-steps command implementation

use crate::anonymization::{StepName, DEFAULT_PIPELINE};
use clap::Args;

/// Arguments for the list-steps command
#[derive(Args, Debug)]
pub struct ListStepsArgs {}

impl ListStepsArgs {
    /// Execute the list-steps command
    pub fn execute(&self) -> anyhow::Result<i32> {
        print!("{}", render_catalogue());
        Ok(0)
    }
}

fn render_catalogue() -> String {
    let width = StepName::ALL
        .iter()
        .map(|s| s.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Available anonymization steps:\n");
    for step in StepName::ALL {
        let marker = if DEFAULT_PIPELINE.contains(&step) { "*" } else { " " };
        out.push_str(&format!(
            "  {marker} {:<width$}  {}\n",
            step.as_str(),
            step.description()
        ));
    }

    let order: Vec<&str> = DEFAULT_PIPELINE.iter().map(StepName::as_str).collect();
    out.push('\n');
    out.push_str(&format!("Default pipeline (*): {}\n", order.join(" -> ")));
    out
}
