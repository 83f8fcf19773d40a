//! Domain error types
//!
//! This module defines the error hierarchy for the anonymizer. Engine
//! failures are modelled by [`AnonymizeError`]; everything that happens
//! around the engine (configuration, templates, I/O) is an
//! [`AnonymizerError`]. Neither type exposes third-party error types.

use thiserror::Error;

/// Errors raised by the anonymization engine itself
///
/// Every variant is a local validation failure. None of them is transient,
/// so callers must not retry: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnonymizeError {
    /// A span reaches past the end of the text (offsets are in runes)
    #[error("Location out of bounds: start {start}, length {length}, text length {text_len}")]
    OutOfBounds {
        start: i64,
        length: i64,
        text_len: usize,
    },

    /// Mask character is not exactly one code point
    #[error("Invalid masking character {0:?}: expected exactly one character")]
    InvalidMaskChar(String),

    /// Cipher key failed base64 decoding or has an unsupported size
    #[error("Invalid FPE key: {0}")]
    InvalidKey(String),

    /// Cipher tweak failed base64 decoding or is too long
    #[error("Invalid FPE tweak: {0}")]
    InvalidTweak(String),

    /// A value run cannot be enciphered (outside the FF1 domain)
    #[error("Invalid cipher input: {0}")]
    InvalidCipherInput(String),

    /// A transformation object carries none of the known variants
    #[error("Transformation not found")]
    UnknownTransformation,
}

/// Main anonymizer error type
#[derive(Debug, Error)]
pub enum AnonymizerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Template loading or validation errors
    #[error("Template error: {0}")]
    Template(String),

    /// Engine failures
    #[error("Anonymization error: {0}")]
    Anonymize(#[from] AnonymizeError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for AnonymizerError {
    fn from(err: std::io::Error) -> Self {
        AnonymizerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnonymizerError {
    fn from(err: serde_json::Error) -> Self {
        AnonymizerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AnonymizerError {
    fn from(err: toml::de::Error) -> Self {
        AnonymizerError::Configuration(format!("TOML parse error: {err}"))
    }
}
