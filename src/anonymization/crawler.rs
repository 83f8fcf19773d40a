//! JSON document crawler
//!
//! Walks a schema document and a values document together. A schema leaf
//! holding a field placeholder such as `"<PERSON>"` marks the matching value
//! as a single detection of that field type covering the whole value, which
//! is then anonymized with the template. Arrays apply each schema element to
//! every value element.

use crate::anonymization::anonymizer::TransformContext;
use crate::anonymization::engine::anonymize_with_report;
use crate::anonymization::models::{AnonymizeTemplate, DetectionResult};
use crate::anonymization::report::AnonymizeReport;
use crate::domain::AnonymizeError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^<([A-Z]+(?:_*[A-Z]*)*)>$").expect("static pattern"))
}

/// Field type named by a schema placeholder, if the leaf is one
pub fn placeholder_field(schema_leaf: &str) -> Option<&str> {
    placeholder_pattern()
        .captures(schema_leaf)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Anonymizes JSON values described by a schema document
pub struct JsonCrawler<'a> {
    template: &'a AnonymizeTemplate,
    context: TransformContext,
    report: AnonymizeReport,
}

impl<'a> JsonCrawler<'a> {
    pub fn new(template: &'a AnonymizeTemplate, context: TransformContext) -> Self {
        Self {
            template,
            context,
            report: AnonymizeReport::default(),
        }
    }

    /// Counts accumulated over every anonymized leaf so far
    pub fn report(&self) -> &AnonymizeReport {
        &self.report
    }

    /// Anonymize `values` in place according to `schema`
    ///
    /// On error `values` may be partially rewritten and must be discarded.
    pub fn crawl(&mut self, schema: &Value, values: &mut Value) -> Result<(), AnonymizeError> {
        match (schema, values) {
            (Value::Object(schema_map), Value::Object(value_map)) => {
                for (key, schema_child) in schema_map {
                    if let Some(value_child) = value_map.get_mut(key) {
                        self.crawl(schema_child, value_child)?;
                    }
                }
            }
            (Value::Array(schema_items), Value::Array(value_items)) => {
                for schema_item in schema_items {
                    for value_item in value_items.iter_mut() {
                        self.crawl(schema_item, value_item)?;
                    }
                }
            }
            (Value::String(leaf), value) if is_scalar(value) => {
                if let Some(field) = placeholder_field(leaf) {
                    let text = stringify(value);
                    let anonymized = self.anonymize_leaf(&text, field)?;
                    *value = Value::String(anonymized);
                }
            }
            // Shape mismatch or non-placeholder leaf
            _ => {}
        }
        Ok(())
    }

    fn anonymize_leaf(&mut self, text: &str, field: &str) -> Result<String, AnonymizeError> {
        let end = i32::try_from(text.chars().count()).map_err(|_| {
            AnonymizeError::InvalidCipherInput("JSON value too long".to_string())
        })?;
        let results = [DetectionResult::new(field, 0, end, 1.0)];

        let (anonymized, report) =
            anonymize_with_report(text, &results, self.template, &self.context)?;
        self.report.merge(&report);
        Ok(anonymized)
    }
}

/// Anonymize a copy of `values`; the input is never returned on failure
pub fn crawl_json(
    schema: &Value,
    values: &Value,
    template: &AnonymizeTemplate,
    context: TransformContext,
) -> Result<(Value, AnonymizeReport), AnonymizeError> {
    let mut crawler = JsonCrawler::new(template, context);
    let mut output = values.clone();
    crawler.crawl(schema, &mut output)?;
    Ok((output, crawler.report))
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
