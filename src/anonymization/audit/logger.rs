//! Audit logger for anonymization requests

use crate::anonymization::anonymizer::hash::sha256_hex;
use crate::anonymization::anonymizer::span::SplitText;
use crate::anonymization::models::{AnonymizeTemplate, DetectionResult};
use crate::anonymization::report::AnonymizeReport;
use crate::domain::{AnonymizerError, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    request_id: String,
    template: String,
    results_count: usize,
    transformed_count: usize,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    field_type: String,
    score: f32,
    start: i32,
    end: i32,
    /// SHA-256 hash of the original span (never log plaintext PII)
    #[serde(skip_serializing_if = "Option::is_none")]
    value_hash: Option<String>,
}

/// Append-only audit log of anonymization requests
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AnonymizerError::Io(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the audit log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log one anonymization call and return its request id
    ///
    /// `text` is the original text; only hashes of its spans are written.
    pub fn log_anonymization(
        &self,
        text: &str,
        results: &[DetectionResult],
        template: &AnonymizeTemplate,
        report: &AnonymizeReport,
    ) -> Result<Uuid> {
        let request_id = Uuid::new_v4();

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            request_id: request_id.to_string(),
            template: template
                .name
                .clone()
                .unwrap_or_else(|| "unnamed".to_string()),
            results_count: report.total_results,
            transformed_count: report.transformed,
            detections: results
                .iter()
                .map(|r| Self::audit_detection(text, r))
                .collect(),
        };

        self.write_entry(&entry)?;
        Ok(request_id)
    }

    fn audit_detection(text: &str, result: &DetectionResult) -> AuditDetection {
        AuditDetection {
            field_type: result.field_name().to_string(),
            score: result.score,
            start: result.location.start,
            end: result.location.end,
            value_hash: SplitText::new(text, &result.location)
                .ok()
                .map(|split| sha256_hex(split.span)),
        }
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            format!(
                "[{}] Request: {} | Template: {} | Results: {} | Transformed: {}",
                entry.timestamp,
                entry.request_id,
                entry.template,
                entry.results_count,
                entry.transformed_count
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AnonymizerError::Other("Audit log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                AnonymizerError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        writeln!(file, "{line}")
            .map_err(|e| AnonymizerError::Io(format!("Failed to write audit entry: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::{FieldTypeTransformation, TransformSpec};
    use tempfile::tempdir;

    fn template() -> AnonymizeTemplate {
        let mut template = AnonymizeTemplate::new(vec![FieldTypeTransformation::wildcard(
            TransformSpec::Redact,
        )]);
        template.name = Some("redact-all".to_string());
        template
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();
        assert!(log_path.parent().unwrap().exists());
        assert_eq!(logger.log_path(), log_path.as_path());
    }

    #[test]
    fn test_log_anonymization_hashes_values() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        let text = "mail test@example.com";
        let results = vec![DetectionResult::new("EMAIL_ADDRESS", 5, 21, 0.9)];
        let mut report = AnonymizeReport::new(1, 0);
        report.record_transformed("EMAIL_ADDRESS", "redact");

        let id = logger
            .log_anonymization(text, &results, &template(), &report)
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains(&id.to_string()));
        assert!(content.contains("redact-all"));
        assert!(content.contains(&sha256_hex("test@example.com")));
        assert!(!content.contains("test@example.com"));

        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["results_count"], 1);
        assert_eq!(entry["detections"][0]["field_type"], "EMAIL_ADDRESS");
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();

        logger
            .log_anonymization("x", &[], &template(), &AnonymizeReport::default())
            .unwrap();
        logger
            .log_anonymization("y", &[], &template(), &AnonymizeReport::default())
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Template: redact-all"));
    }
}
