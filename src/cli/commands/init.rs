//! Init command implementation
//!
//! Writes a commented sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "verbatim-anonymizer.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing verbatim-anonymizer configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [ner] at your tagging service, or use a gazetteer file");
                println!(
                    "  3. Validate configuration: verbatim-anonymizer --config {} validate-config",
                    self.output
                );
                println!(
                    "  4. Run: verbatim-anonymizer --config {} anonymize in.csv out.csv Text_1",
                    self.output
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}

/// Sample configuration with every option and its default
pub(crate) fn sample_config() -> &'static str {
    r#"# verbatim-anonymizer configuration
#
# Every value below is the built-in default unless noted otherwise.
# ${VAR} references are replaced with environment variables, and any key can
# be overridden with VERBATIM_<SECTION>_<KEY> (e.g. VERBATIM_PIPELINE_LANGUAGE).

[application]
# trace | debug | info | warn | error
log_level = "info"

[pipeline]
# Steps in execution order. Available: person, organization, location, email,
# phone_number, contract_number, spaces_cleaner,
# duplicate_replace_value_cleaner, blacklist
steps = [
    "spaces_cleaner",
    "person",
    "contract_number",
    "phone_number",
    "email",
    "duplicate_replace_value_cleaner",
    "blacklist",
]

# Language of the verbatims: en | de
language = "en"

# Literal terms redacted by the blacklist step, applied in order
blacklist = []

# Worker threads per column
workers = 1

[pipeline.exclusions]
# Tagged entities containing one of these words are kept
person = []
organization = []
location = []

[ner]
# http: external tagging service | gazetteer: offline phrase list
provider = "http"
endpoint = "http://localhost:8000"
# api_token = "${VERBATIM_NER_TOKEN}"
timeout_seconds = 30
# gazetteer_path = "gazetteer.toml"

[input]
# CSV field delimiter, used for reading and writing (ignored for .xls/.xlsx)
delimiter = ","

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly
local_rotation = "daily"
"#
}
