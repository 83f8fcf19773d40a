//! Format-preserving encryption primitive

use super::span::SplitText;
use crate::anonymization::cipher::{self, CipherProfile};
use crate::anonymization::models::Location;
use crate::domain::AnonymizeError;

/// Encrypt or decrypt the span in place
pub fn fpe_value(
    text: &str,
    location: &Location,
    key: &str,
    tweak: &str,
    decrypt: bool,
    profile: CipherProfile,
) -> Result<String, AnonymizeError> {
    let split = SplitText::new(text, location)?;
    let transformed = cipher::fpe_cipher(split.span, key, tweak, decrypt, profile)?;
    Ok(split.splice(&transformed))
}
