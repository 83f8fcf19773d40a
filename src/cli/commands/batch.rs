//! Batch command implementation
//!
//! Anonymizes many independent requests concurrently. Input is a JSON array
//! of requests or one request per line. A failing request is reported with
//! its error and no text; the rest of the batch still runs.

use super::{
    load_config_or_default, read_input, resolve_template, write_output, EXIT_ANONYMIZE,
    EXIT_CONFIG,
};
use crate::anonymization::{
    AnonymizationEngine, AnonymizeReport, AnonymizeRequest, AnonymizeTemplate, BatchItem,
};
use crate::log_batch_processing;
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Requests file (JSON array or JSON lines); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Template file used for requests without one
    #[arg(short, long)]
    pub template: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override application.batch_concurrency
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Result line for one request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutput {
    fn from_item(item: BatchItem, total: &mut AnonymizeReport) -> Self {
        match item.outcome {
            Ok(response) => {
                if let Some(ref report) = response.report {
                    total.merge(report);
                }
                Self {
                    index: item.index,
                    text: Some(response.text),
                    error: None,
                }
            }
            Err(e) => Self {
                index: item.index,
                text: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting batch command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let template = match resolve_template(self.template.as_deref(), &config) {
            Ok(t) => t.map(Arc::new),
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let concurrency = self
            .concurrency
            .unwrap_or(config.application.batch_concurrency)
            .max(1);

        let requests = parse_requests(&read_input(&self.input)?)?;

        let engine = match AnonymizationEngine::new(config.anonymization) {
            Ok(e) => Arc::new(e),
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let start = Instant::now();
        let total_requests = requests.len();
        let items = run_batch(engine, requests, template, concurrency).await?;

        let mut total = AnonymizeReport::default();
        let outputs: Vec<BatchOutput> = items
            .into_iter()
            .map(|item| BatchOutput::from_item(item, &mut total))
            .collect();
        let failed = outputs.iter().filter(|o| o.error.is_some()).count();

        tracing::info!(
            requests = total_requests,
            failed,
            transformed = total.transformed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch completed"
        );

        write_output(
            self.output.as_deref(),
            &serde_json::to_string_pretty(&outputs).context("Failed to serialize batch output")?,
        )?;

        eprintln!(
            "Processed {} request(s): {} succeeded, {} failed",
            total_requests,
            total_requests - failed,
            failed
        );
        eprint!("{}", total.format_console());

        Ok(if failed == 0 { 0 } else { EXIT_ANONYMIZE })
    }
}

/// Parse a JSON array of requests, or JSON lines
pub fn parse_requests(content: &str) -> anyhow::Result<Vec<AnonymizeRequest>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Failed to parse request array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid request on line {}", n + 1))
        })
        .collect()
}

/// Anonymize requests on the blocking pool, at most `concurrency` at a time
///
/// Items are returned in input order.
pub async fn run_batch(
    engine: Arc<AnonymizationEngine>,
    requests: Vec<AnonymizeRequest>,
    template: Option<Arc<AnonymizeTemplate>>,
    concurrency: usize,
) -> anyhow::Result<Vec<BatchItem>> {
    let total = requests.len();
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, request) in requests.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("Batch semaphore closed")?;
        let engine = Arc::clone(&engine);
        let template = template.clone();

        log_batch_processing!(index + 1, total);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let outcome = match template {
                Some(ref template) => engine.anonymize_with_template(&request, template),
                None => engine.anonymize(&request),
            };
            if let Err(ref e) = outcome {
                tracing::warn!(index, error = %e, "Request in batch failed");
            }
            BatchItem { index, outcome }
        });
    }

    let mut items = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        items.push(joined.context("Batch task failed to complete")?);
    }
    items.sort_by_key(|item| item.index);

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::{
        AnonymizationConfig, DetectionResult, FieldTypeTransformation, TransformSpec,
    };

    fn request(text: &str, start: i32, end: i32) -> AnonymizeRequest {
        AnonymizeRequest {
            text: text.to_string(),
            analyze_results: vec![DetectionResult::new("PERSON", start, end, 1.0)],
            template: None,
        }
    }

    #[test]
    fn test_parse_requests_array_and_lines() {
        let array = r#"[{"text":"a"},{"text":"b"}]"#;
        assert_eq!(parse_requests(array).unwrap().len(), 2);

        let lines = "{\"text\":\"a\"}\n\n{\"text\":\"b\"}\n";
        assert_eq!(parse_requests(lines).unwrap().len(), 2);

        assert!(parse_requests("{\"text\":\"a\"}\nnot json").is_err());
    }

    #[tokio::test]
    async fn test_run_batch_keeps_order_and_isolates_failures() {
        let engine = Arc::new(AnonymizationEngine::new(AnonymizationConfig::default()).unwrap());
        let template = Arc::new(AnonymizeTemplate::new(vec![
            FieldTypeTransformation::wildcard(TransformSpec::replace("<PERSON>")),
        ]));
        let requests = vec![
            request("Jane went home", 0, 4),
            request("Bob", 0, 40),
            request("Hi Alice", 3, 8),
        ];

        let items = run_batch(engine, requests, Some(template), 2).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].outcome.as_ref().unwrap().text, "<PERSON> went home");
        assert!(items[1].outcome.is_err());
        assert_eq!(items[2].outcome.as_ref().unwrap().text, "Hi <PERSON>");
    }

    #[test]
    fn test_batch_output_for_failure_has_no_text() {
        let mut total = AnonymizeReport::default();
        let item = BatchItem {
            index: 4,
            outcome: Err(crate::domain::AnonymizerError::Validation("no template".into())),
        };
        let output = BatchOutput::from_item(item, &mut total);
        assert!(output.text.is_none());
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("\"text\""));
    }
}
