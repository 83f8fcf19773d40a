//! Replace and redact primitives

use super::span::SplitText;
use crate::anonymization::models::Location;
use crate::domain::AnonymizeError;

/// Replacement used by redaction
pub const REDACTION: &str = " ";

/// Substitute the span with `new_value`
pub fn replace_value(
    text: &str,
    location: &Location,
    new_value: &str,
) -> Result<String, AnonymizeError> {
    Ok(SplitText::new(text, location)?.splice(new_value))
}

/// Substitute the span with a single space
pub fn redact_value(text: &str, location: &Location) -> Result<String, AnonymizeError> {
    replace_value(text, location, REDACTION)
}
