//! Hash primitive

use super::span::SplitText;
use crate::anonymization::models::Location;
use crate::domain::AnonymizeError;
use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of `value`
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Replace the span with its SHA-256 digest
pub fn hash_value(text: &str, location: &Location) -> Result<String, AnonymizeError> {
    let split = SplitText::new(text, location)?;
    Ok(split.splice(&sha256_hex(split.span)))
}
