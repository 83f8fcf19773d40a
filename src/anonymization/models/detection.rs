//! Detection result data models
//!
//! Results are produced by an upstream PII detector and consumed read-only
//! by the engine. Offsets count Unicode scalar values (runes), never bytes.

use crate::domain::AnonymizeError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Position of a detected value inside the text
///
/// `end` is exclusive. `length` is informational on the wire: the engine
/// always works with `end - start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// First rune of the span
    #[serde(default)]
    pub start: i32,
    /// Rune after the last rune of the span
    #[serde(default)]
    pub end: i32,
    /// Number of runes in the span
    #[serde(default)]
    pub length: i32,
}

impl Location {
    /// Create a location covering `[start, end)`
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end,
            length: end.saturating_sub(start),
        }
    }

    /// Span length derived from the bounds
    pub fn span_length(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// Resolve the location to a rune range inside a text of `text_len` runes
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizeError::OutOfBounds`] when the start is negative,
    /// the span is inverted, or the span reaches past the end of the text.
    pub fn rune_range(&self, text_len: usize) -> Result<Range<usize>, AnonymizeError> {
        let start = i64::from(self.start);
        let length = self.span_length();
        let out_of_bounds = AnonymizeError::OutOfBounds {
            start,
            length,
            text_len,
        };

        if start < 0 || length < 0 {
            return Err(out_of_bounds);
        }
        let (start, length) = (start as usize, length as usize);
        if start + length > text_len {
            return Err(out_of_bounds);
        }

        Ok(start..start + length)
    }
}

/// Category label of a detection (e.g. `PHONE_NUMBER`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldType {
    /// Field type name
    #[serde(default)]
    pub name: String,
}

impl FieldType {
    /// Create a field type
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A detected PII span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Detected value as reported by the detector (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Field type of the detection
    pub field: FieldType,
    /// Detector confidence (0.0 - 1.0)
    #[serde(default)]
    pub score: f32,
    /// Span of the detection in the original text
    pub location: Location,
}

impl DetectionResult {
    /// Create a detection covering `[start, end)`
    pub fn new(field_name: impl Into<String>, start: i32, end: i32, score: f32) -> Self {
        Self {
            text: None,
            field: FieldType::new(field_name),
            score,
            location: Location::new(start, end),
        }
    }

    /// Field type name
    pub fn field_name(&self) -> &str {
        &self.field.name
    }

    /// Whether two detections cover exactly the same bounds
    pub fn same_span(&self, other: &DetectionResult) -> bool {
        self.location.start == other.location.start && self.location.end == other.location.end
    }
}
