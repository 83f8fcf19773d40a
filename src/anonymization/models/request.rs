//! Request and response envelopes

use super::detection::DetectionResult;
use super::template::AnonymizeTemplate;
use crate::anonymization::report::AnonymizeReport;
use serde::{Deserialize, Serialize};

/// Anonymization request as sent by existing clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeRequest {
    /// Original text
    pub text: String,
    /// Detections for `text`
    #[serde(default)]
    pub analyze_results: Vec<DetectionResult>,
    /// Template to apply; may be supplied out of band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<AnonymizeTemplate>,
}

impl AnonymizeRequest {
    /// Create a request
    pub fn new(
        text: impl Into<String>,
        analyze_results: Vec<DetectionResult>,
        template: AnonymizeTemplate,
    ) -> Self {
        Self {
            text: text.into(),
            analyze_results,
            template: Some(template),
        }
    }
}

/// Anonymization response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeResponse {
    /// Anonymized text
    pub text: String,
    /// Statistics for the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AnonymizeReport>,
}
