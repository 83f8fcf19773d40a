//! Text transform primitives
//!
//! Every primitive rewrites exactly one span of a string and returns the new
//! string. Offsets are rune offsets; bounds are checked before anything else.

pub mod fpe;
pub mod hash;
pub mod mask;
pub mod replace;
pub mod span;

use crate::anonymization::cipher::CipherProfile;
use crate::anonymization::models::{FpeValue, Location, MaskValue, ReplaceValue, TransformSpec};
use crate::domain::AnonymizeError;

/// Settings shared by all transformations in one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformContext {
    /// Character domain used for format-preserving encryption
    pub cipher_profile: CipherProfile,
}

impl TransformContext {
    pub fn new(cipher_profile: CipherProfile) -> Self {
        Self { cipher_profile }
    }
}

/// Trait for anything that can rewrite one span of a text
pub trait Transformer: Send + Sync {
    /// Return `text` with the span at `location` rewritten
    fn transform(
        &self,
        text: &str,
        location: &Location,
        context: &TransformContext,
    ) -> Result<String, AnonymizeError>;
}

impl Transformer for ReplaceValue {
    fn transform(
        &self,
        text: &str,
        location: &Location,
        _context: &TransformContext,
    ) -> Result<String, AnonymizeError> {
        replace::replace_value(text, location, &self.new_value)
    }
}

impl Transformer for MaskValue {
    fn transform(
        &self,
        text: &str,
        location: &Location,
        _context: &TransformContext,
    ) -> Result<String, AnonymizeError> {
        mask::mask_value(
            text,
            location,
            &self.masking_character,
            self.chars_to_mask,
            self.from_end,
        )
    }
}

impl Transformer for FpeValue {
    fn transform(
        &self,
        text: &str,
        location: &Location,
        context: &TransformContext,
    ) -> Result<String, AnonymizeError> {
        fpe::fpe_value(
            text,
            location,
            &self.key,
            &self.tweak,
            self.decrypt,
            context.cipher_profile,
        )
    }
}

impl Transformer for TransformSpec {
    fn transform(
        &self,
        text: &str,
        location: &Location,
        context: &TransformContext,
    ) -> Result<String, AnonymizeError> {
        match self {
            Self::Replace(value) => value.transform(text, location, context),
            Self::Redact => replace::redact_value(text, location),
            Self::Mask(value) => value.transform(text, location, context),
            Self::Hash => hash::hash_value(text, location),
            Self::Fpe(value) => value.transform(text, location, context),
        }
    }
}
