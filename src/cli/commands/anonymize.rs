//! Anonymize command implementation
//!
//! Reads one request (`{"text", "analyzeResults", "template"?}`) and writes
//! the anonymized response.

use super::{
    load_config_or_default, read_input, resolve_template, write_output, EXIT_ANONYMIZE,
    EXIT_CONFIG,
};
use crate::anonymization::{AnonymizationEngine, AnonymizeRequest, AnonymizeResponse};
use crate::domain::AnonymizerError;
use anyhow::Context;
use clap::Args;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Request file (JSON); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Template file used when the request has none
    #[arg(short, long)]
    pub template: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include the report in the response and print a summary to stderr
    #[arg(long)]
    pub report: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting anonymize command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let template = match resolve_template(self.template.as_deref(), &config) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let request: AnonymizeRequest = serde_json::from_str(&read_input(&self.input)?)
            .context("Failed to parse anonymize request")?;

        let engine = match AnonymizationEngine::new(config.anonymization) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let outcome = match template {
            Some(ref template) => engine.anonymize_with_template(&request, template),
            None => engine.anonymize(&request),
        };

        let mut response = match outcome {
            Ok(response) => response,
            Err(AnonymizerError::Validation(msg)) => {
                eprintln!("❌ {msg}; pass --template or set template.path");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => {
                eprintln!("❌ Anonymization failed: {e}");
                return Ok(EXIT_ANONYMIZE);
            }
        };

        if self.report {
            if let Some(ref report) = response.report {
                eprint!("{}", report.format_console());
            }
        } else {
            response.report = None;
        }

        write_output(self.output.as_deref(), &render(&response)?)?;
        Ok(0)
    }
}

fn render(response: &AnonymizeResponse) -> anyhow::Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[tokio::test]
    async fn test_execute_writes_response() {
        let dir = tempdir().unwrap();
        let mut input = NamedTempFile::new().unwrap();
        input
            .write_all(
                br#"{
                    "text": "My phone number is 058-5559943",
                    "analyzeResults": [{"field":{"name":"PHONE_NUMBER"},"score":1,"location":{"start":19,"end":30}}],
                    "template": {"fieldTypeTransformations":[{"fields":[{"name":"PHONE_NUMBER"}],"transformation":{"replaceValue":{"newValue":"<phone-number>"}}}]}
                }"#,
            )
            .unwrap();
        input.flush().unwrap();
        let output = dir.path().join("out.json");

        let args = AnonymizeArgs {
            input: input.path().to_string_lossy().to_string(),
            template: None,
            output: Some(output.to_string_lossy().to_string()),
            report: false,
        };
        let code = args.execute("/no/such/config.toml").await.unwrap();
        assert_eq!(code, 0);

        let response: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(response["text"], "My phone number is <phone-number>");
        assert!(response.get("report").is_none());
    }

    #[tokio::test]
    async fn test_execute_missing_template() {
        let mut input = NamedTempFile::new().unwrap();
        input.write_all(br#"{"text":"hello","analyzeResults":[]}"#).unwrap();
        input.flush().unwrap();

        let args = AnonymizeArgs {
            input: input.path().to_string_lossy().to_string(),
            template: None,
            output: None,
            report: false,
        };
        assert_eq!(
            args.execute("/no/such/config.toml").await.unwrap(),
            EXIT_CONFIG
        );
    }

    #[tokio::test]
    async fn test_execute_anonymization_failure() {
        let mut input = NamedTempFile::new().unwrap();
        input
            .write_all(
                br#"{
                    "text": "short",
                    "analyzeResults": [{"field":{"name":"PERSON"},"score":1,"location":{"start":0,"end":50}}],
                    "template": {"fieldTypeTransformations":[{"transformation":{"redactValue":{}}}]}
                }"#,
            )
            .unwrap();
        input.flush().unwrap();

        let args = AnonymizeArgs {
            input: input.path().to_string_lossy().to_string(),
            template: None,
            output: None,
            report: false,
        };
        assert_eq!(
            args.execute("/no/such/config.toml").await.unwrap(),
            EXIT_ANONYMIZE
        );
    }
}
