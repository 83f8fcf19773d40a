//! Crawl command implementation
//!
//! Anonymizes a JSON document using a schema document whose leaves name
//! field types, e.g. `{"patients":[{"name":"<PERSON>"}]}`.

use super::{
    load_config_or_default, read_input, resolve_template, write_output, EXIT_ANONYMIZE,
    EXIT_CONFIG,
};
use crate::anonymization::AnonymizationEngine;
use anyhow::Context;
use clap::Args;
use serde_json::Value;

/// Arguments for the crawl command
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Schema document (JSON)
    #[arg(short, long)]
    pub schema: String,

    /// Values document (JSON); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub values: String,

    /// Template file
    #[arg(short, long)]
    pub template: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl CrawlArgs {
    /// Execute the crawl command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(schema = %self.schema, "Starting crawl command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let template = match resolve_template(self.template.as_deref(), &config) {
            Ok(Some(t)) => t,
            Ok(None) => {
                eprintln!("❌ No template; pass --template or set template.path");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let schema: Value = serde_json::from_str(&read_input(&self.schema)?)
            .context("Failed to parse schema document")?;
        let values: Value = serde_json::from_str(&read_input(&self.values)?)
            .context("Failed to parse values document")?;

        let engine = match AnonymizationEngine::new(config.anonymization) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        match engine.anonymize_json(&schema, &values, &template) {
            Ok((output, report)) => {
                write_output(
                    self.output.as_deref(),
                    &serde_json::to_string_pretty(&output)
                        .context("Failed to serialize document")?,
                )?;
                tracing::info!(
                    transformed = report.transformed,
                    untouched = report.untouched,
                    "Crawl completed"
                );
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Anonymization failed: {e}");
                Ok(EXIT_ANONYMIZE)
            }
        }
    }
}
