//! Per-call anonymization statistics
//!
//! A report counts what happened to the detections of one call. It never
//! holds span values, so it is safe to log or return to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics for one anonymization call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeReport {
    /// Results supplied by the caller
    pub total_results: usize,

    /// Results dropped as exact-span duplicates
    pub duplicates_removed: usize,

    /// Results whose span was transformed
    pub transformed: usize,

    /// Results no rule matched
    pub untouched: usize,

    /// Transformed results by field type
    pub by_field_type: BTreeMap<String, usize>,

    /// Transformed results by transformation kind
    pub by_transform: BTreeMap<String, usize>,
}

impl AnonymizeReport {
    /// Start a report for `total_results` results
    pub fn new(total_results: usize, duplicates_removed: usize) -> Self {
        Self {
            total_results,
            duplicates_removed,
            ..Default::default()
        }
    }

    /// Record a transformed result
    pub fn record_transformed(&mut self, field_type: &str, kind: &str) {
        self.transformed += 1;
        *self.by_field_type.entry(field_type.to_string()).or_insert(0) += 1;
        *self.by_transform.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Record a result left as is
    pub fn record_untouched(&mut self) {
        self.untouched += 1;
    }

    /// Add the counts of another report
    pub fn merge(&mut self, other: &AnonymizeReport) {
        self.total_results += other.total_results;
        self.duplicates_removed += other.duplicates_removed;
        self.transformed += other.transformed;
        self.untouched += other.untouched;
        for (field, count) in &other.by_field_type {
            *self.by_field_type.entry(field.clone()).or_insert(0) += count;
        }
        for (kind, count) in &other.by_transform {
            *self.by_transform.entry(kind.clone()).or_insert(0) += count;
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("Anonymization summary\n");
        output.push_str("─────────────────────────────────────────\n");
        output.push_str(&format!("  Results received:     {}\n", self.total_results));
        output.push_str(&format!("  Duplicates removed:   {}\n", self.duplicates_removed));
        output.push_str(&format!("  Transformed:          {}\n", self.transformed));
        output.push_str(&format!("  Untouched:            {}\n", self.untouched));

        if !self.by_field_type.is_empty() {
            output.push_str("\n  By field type\n");
            for (field, count) in &self.by_field_type {
                output.push_str(&format!("    {field:28} {count:>5}\n"));
            }
        }

        if !self.by_transform.is_empty() {
            output.push_str("\n  By transformation\n");
            for (kind, count) in &self.by_transform {
                output.push_str(&format!("    {kind:28} {count:>5}\n"));
            }
        }

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
