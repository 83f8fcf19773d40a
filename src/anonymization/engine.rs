//! Main anonymization engine
//!
//! The core is [`anonymize`]: it orders and deduplicates the detections,
//! then rewrites the text from the rightmost span to the leftmost so that
//! length-changing edits never move a span that is still to be processed.
//! Any failing transformation aborts the call and no text is returned.
//!
//! [`AnonymizationEngine`] wraps the core with configuration, audit logging
//! and batch helpers.
//!
//! # Examples
//!
//! ```
//! use pii_anonymizer::anonymization::engine::anonymize;
//! use pii_anonymizer::anonymization::models::{
//!     AnonymizeTemplate, DetectionResult, FieldTypeTransformation, TransformSpec,
//! };
//!
//! let template = AnonymizeTemplate::new(vec![FieldTypeTransformation::for_fields(
//!     ["PHONE_NUMBER"],
//!     TransformSpec::replace("<phone-number>"),
//! )]);
//! let results = vec![DetectionResult::new("PHONE_NUMBER", 19, 30, 1.0)];
//!
//! let text = anonymize("My phone number is 058-5559943", &results, &template).unwrap();
//! assert_eq!(text, "My phone number is <phone-number>");
//! ```

use crate::anonymization::{
    anonymizer::{TransformContext, Transformer},
    audit::AuditLogger,
    config::AnonymizationConfig,
    crawler::crawl_json,
    dispatcher::select,
    models::{AnonymizeRequest, AnonymizeResponse, AnonymizeTemplate, DetectionResult},
    preprocess::preprocess_counted,
    report::AnonymizeReport,
};
use crate::domain::{AnonymizeError, AnonymizerError, Result};
use crate::{log_anonymize_complete, log_anonymize_start, log_error_with_context};
use serde_json::Value;
use std::time::Instant;

/// Anonymize `text` with the default transform context
///
/// # Errors
///
/// Returns the first [`AnonymizeError`] raised by a transformation. No text
/// is returned in that case, not even a partial one.
pub fn anonymize(
    text: &str,
    results: &[DetectionResult],
    template: &AnonymizeTemplate,
) -> std::result::Result<String, AnonymizeError> {
    anonymize_with_report(text, results, template, &TransformContext::default())
        .map(|(text, _)| text)
}

/// Anonymize `text` and report what happened to each detection
pub fn anonymize_with_report(
    text: &str,
    results: &[DetectionResult],
    template: &AnonymizeTemplate,
    context: &TransformContext,
) -> std::result::Result<(String, AnonymizeReport), AnonymizeError> {
    let (ordered, duplicates) = preprocess_counted(results);
    let mut report = AnonymizeReport::new(results.len(), duplicates);
    let mut text = text.to_string();

    for result in ordered.iter().rev() {
        match select(result, template) {
            Some(spec) => {
                text = spec.transform(&text, &result.location, context)?;
                report.record_transformed(result.field_name(), spec.kind());
            }
            None => report.record_untouched(),
        }
    }

    Ok((text, report))
}

/// Outcome of one request in a batch
#[derive(Debug)]
pub struct BatchItem {
    /// Position of the request in the batch
    pub index: usize,
    /// Response, or the error that stopped this request
    pub outcome: Result<AnonymizeResponse>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Anonymization engine
///
/// Holds the configuration and the optional audit logger. The engine is
/// `Send + Sync` and can be shared across tasks using `Arc`.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    context: TransformContext,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the audit log
    /// directory cannot be created.
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config.validate()?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        Ok(Self {
            context: TransformContext::new(config.cipher_profile),
            config,
            audit_logger,
        })
    }

    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Anonymize a single request
    ///
    /// The request must carry its template. The response includes the
    /// report for the call.
    pub fn anonymize(&self, request: &AnonymizeRequest) -> Result<AnonymizeResponse> {
        let template = request.template.as_ref().ok_or_else(|| {
            AnonymizerError::Validation("Request has no anonymization template".to_string())
        })?;
        self.anonymize_with_template(request, template)
    }

    /// Anonymize a request with a template supplied out of band
    ///
    /// A template carried by the request takes precedence.
    pub fn anonymize_with_template(
        &self,
        request: &AnonymizeRequest,
        fallback: &AnonymizeTemplate,
    ) -> Result<AnonymizeResponse> {
        let template = request.template.as_ref().unwrap_or(fallback);
        let start = Instant::now();
        log_anonymize_start!(request.analyze_results.len(), template_label(template));

        let (text, report) = anonymize_with_report(
            &request.text,
            &request.analyze_results,
            template,
            &self.context,
        )
        .inspect_err(|e| {
            log_error_with_context!(e, "Anonymization failed");
        })?;

        if let Some(ref logger) = self.audit_logger {
            let request_id = logger.log_anonymization(
                &request.text,
                &request.analyze_results,
                template,
                &report,
            )?;
            tracing::debug!(request_id = %request_id, "Audit entry written");
        }

        log_anonymize_complete!(report.transformed, start.elapsed());

        Ok(AnonymizeResponse {
            text,
            report: Some(report),
        })
    }

    /// Anonymize independent requests
    ///
    /// A failing request yields an error item and never partial text; the
    /// remaining requests are still processed.
    pub fn anonymize_batch(
        &self,
        requests: &[AnonymizeRequest],
        fallback: Option<&AnonymizeTemplate>,
    ) -> Vec<BatchItem> {
        requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                let outcome = match fallback {
                    Some(template) => self.anonymize_with_template(request, template),
                    None => self.anonymize(request),
                };
                if let Err(ref e) = outcome {
                    tracing::warn!(index, error = %e, "Request in batch failed");
                }
                BatchItem { index, outcome }
            })
            .collect()
    }

    /// Anonymize a JSON document described by a schema document
    pub fn anonymize_json(
        &self,
        schema: &Value,
        values: &Value,
        template: &AnonymizeTemplate,
    ) -> Result<(Value, AnonymizeReport)> {
        let start = Instant::now();
        let (output, report) = crawl_json(schema, values, template, self.context)
            .inspect_err(|e| {
                log_error_with_context!(e, "JSON anonymization failed");
            })?;

        log_anonymize_complete!(report.transformed, start.elapsed());
        Ok((output, report))
    }

    /// Whether audit logging is active
    pub fn is_audit_enabled(&self) -> bool {
        self.audit_logger.is_some()
    }
}

fn template_label(template: &AnonymizeTemplate) -> &str {
    template.name.as_deref().unwrap_or("unnamed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::cipher::CipherProfile;
    use crate::anonymization::models::{FieldTypeTransformation, TransformSpec};
    use tempfile::tempdir;

    fn phone_template() -> AnonymizeTemplate {
        AnonymizeTemplate::new(vec![FieldTypeTransformation::for_fields(
            ["PHONE_NUMBER"],
            TransformSpec::replace("<phone-number>"),
        )])
    }

    #[test]
    fn test_engine_creation() {
        let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
        assert!(!engine.is_audit_enabled());
    }

    #[test]
    fn test_right_to_left_with_length_changes() {
        let template = AnonymizeTemplate::new(vec![
            FieldTypeTransformation::for_fields(["A"], TransformSpec::replace("<a long value>")),
            FieldTypeTransformation::for_fields(["B"], TransformSpec::replace("")),
        ]);
        let results = vec![
            DetectionResult::new("A", 0, 1, 1.0),
            DetectionResult::new("B", 4, 9, 1.0),
        ];
        let text = anonymize("x - hello - y", &results, &template).unwrap();
        assert_eq!(text, "<a long value> -  - y");
    }

    #[test]
    fn test_error_returns_no_text() {
        let template = AnonymizeTemplate::new(vec![FieldTypeTransformation::wildcard(
            TransformSpec::Redact,
        )]);
        let results = vec![
            DetectionResult::new("A", 0, 2, 1.0),
            DetectionResult::new("B", 40, 45, 1.0),
        ];
        assert!(matches!(
            anonymize("short text", &results, &template),
            Err(AnonymizeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_unmatched_out_of_bounds_result_is_ignored() {
        let results = vec![
            DetectionResult::new("PHONE_NUMBER", 19, 30, 1.0),
            DetectionResult::new("PERSON", 100, 200, 1.0),
        ];
        let text = anonymize("My phone number is 058-5559943", &results, &phone_template())
            .unwrap();
        assert_eq!(text, "My phone number is <phone-number>");
    }

    #[test]
    fn test_report_counts() {
        let results = vec![
            DetectionResult::new("PHONE_NUMBER", 19, 30, 0.5),
            DetectionResult::new("PHONE_NUMBER", 19, 30, 0.9),
            DetectionResult::new("PERSON", 0, 2, 0.9),
        ];
        let (_, report) = anonymize_with_report(
            "My phone number is 058-5559943",
            &results,
            &phone_template(),
            &TransformContext::default(),
        )
        .unwrap();
        assert_eq!(report.total_results, 3);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.transformed, 1);
        assert_eq!(report.untouched, 1);
        assert_eq!(report.by_transform.get("replace"), Some(&1));
    }

    #[test]
    fn test_request_without_template_is_rejected() {
        let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
        let request: AnonymizeRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert!(matches!(
            engine.anonymize(&request),
            Err(AnonymizerError::Validation(_))
        ));
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
        let good = AnonymizeRequest::new(
            "My phone number is 058-5559943",
            vec![DetectionResult::new("PHONE_NUMBER", 19, 30, 1.0)],
            phone_template(),
        );
        let bad = AnonymizeRequest::new(
            "tiny",
            vec![DetectionResult::new("PHONE_NUMBER", 0, 30, 1.0)],
            phone_template(),
        );

        let items = engine.anonymize_batch(&[bad, good], None);
        assert_eq!(items.len(), 2);
        assert!(!items[0].is_ok());
        assert_eq!(
            items[1].outcome.as_ref().unwrap().text,
            "My phone number is <phone-number>"
        );
    }

    #[test]
    fn test_cipher_profile_from_config() {
        let config = AnonymizationConfig {
            cipher_profile: CipherProfile::Numeric,
            ..Default::default()
        };
        let engine = AnonymizationEngine::new(config).unwrap();
        let template = AnonymizeTemplate::new(vec![FieldTypeTransformation::wildcard(
            TransformSpec::fpe("AAECAwQFBgcICQoLDA0ODw==", "", false),
        )]);
        let request = AnonymizeRequest::new(
            "id AB-1234",
            vec![DetectionResult::new("ID", 3, 10, 1.0)],
            template,
        );
        let response = engine.anonymize(&request).unwrap();
        assert!(response.text.starts_with("id AB-"));
        assert_ne!(response.text, "id AB-1234");
    }

    #[test]
    fn test_audit_entry_written() {
        let dir = tempdir().unwrap();
        let mut config = AnonymizationConfig::default();
        config.audit.enabled = true;
        config.audit.log_path = dir.path().join("audit.log");

        let engine = AnonymizationEngine::new(config).unwrap();
        let request = AnonymizeRequest::new(
            "My phone number is 058-5559943",
            vec![DetectionResult::new("PHONE_NUMBER", 19, 30, 1.0)],
            phone_template(),
        );
        engine.anonymize(&request).unwrap();

        let content = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
        assert!(content.contains("PHONE_NUMBER"));
        assert!(!content.contains("058-5559943"));
    }
}
