//! Anonymization template data models
//!
//! A template is an ordered list of rules mapping field types to a
//! transformation. Rules are evaluated top to bottom and the first match
//! wins; see [`crate::anonymization::dispatcher`].
//!
//! On the wire a transformation is an object with one optional member per
//! variant (`replaceValue`, `redactValue`, `hashValue`, `maskValue`,
//! `fpeValue`). In Rust it is the [`TransformSpec`] enum; the conversion
//! happens during (de)serialization.

use super::detection::FieldType;
use crate::anonymization::cipher;
use crate::anonymization::anonymizer::mask;
use crate::domain::{AnonymizeError, AnonymizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Replace the span with a fixed value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceValue {
    /// Replacement text, inserted verbatim
    #[serde(default)]
    pub new_value: String,
}

/// Mask part of the span with a single character
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskValue {
    /// Mask character; must be exactly one character
    #[serde(default)]
    pub masking_character: String,
    /// Number of characters to mask (clamped to the span length)
    #[serde(default)]
    pub chars_to_mask: i32,
    /// Mask from the end of the span instead of the start
    #[serde(default)]
    pub from_end: bool,
}

/// Format-preserving encryption parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FpeValue {
    /// Base64 AES key (16, 24 or 32 bytes once decoded)
    #[serde(default)]
    pub key: String,
    /// Base64 tweak (at most 8 bytes once decoded)
    #[serde(default)]
    pub tweak: String,
    /// Decrypt instead of encrypt
    #[serde(default)]
    pub decrypt: bool,
}

/// Parameterless wire member (`"redactValue": {}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyValue {}

/// Transformation applied to a matched span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Transformation", into = "Transformation")]
pub enum TransformSpec {
    /// Substitute the span with a fixed value
    Replace(ReplaceValue),
    /// Substitute the span with a single space
    Redact,
    /// Overwrite some characters of the span
    Mask(MaskValue),
    /// Substitute the span with its SHA-256 hex digest
    Hash,
    /// Encrypt or decrypt alphabet runs inside the span with FF1
    Fpe(FpeValue),
}

impl TransformSpec {
    /// Replace transformation
    pub fn replace(new_value: impl Into<String>) -> Self {
        Self::Replace(ReplaceValue {
            new_value: new_value.into(),
        })
    }

    /// Mask transformation
    pub fn mask(masking_character: impl Into<String>, chars_to_mask: i32, from_end: bool) -> Self {
        Self::Mask(MaskValue {
            masking_character: masking_character.into(),
            chars_to_mask,
            from_end,
        })
    }

    /// FPE encrypt (or decrypt) transformation
    pub fn fpe(key: impl Into<String>, tweak: impl Into<String>, decrypt: bool) -> Self {
        Self::Fpe(FpeValue {
            key: key.into(),
            tweak: tweak.into(),
            decrypt,
        })
    }

    /// Short label used in reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace(_) => "replace",
            Self::Redact => "redact",
            Self::Mask(_) => "mask",
            Self::Hash => "hash",
            Self::Fpe(fpe) if fpe.decrypt => "fpe_decrypt",
            Self::Fpe(_) => "fpe_encrypt",
        }
    }

    /// Check the parameters that can be checked without any text
    pub fn validate(&self) -> std::result::Result<(), AnonymizeError> {
        match self {
            Self::Mask(value) => mask::parse_mask_char(&value.masking_character).map(|_| ()),
            Self::Fpe(value) => {
                cipher::decode_key(&value.key)?;
                cipher::decode_tweak(&value.tweak)?;
                Ok(())
            }
            Self::Replace(_) | Self::Redact | Self::Hash => Ok(()),
        }
    }
}

/// Wire representation of a transformation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_value: Option<ReplaceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redact_value: Option<EmptyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_value: Option<EmptyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_value: Option<MaskValue>,
    #[serde(
        default,
        rename = "fpeValue",
        alias = "fPEValue",
        alias = "FPEValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub fpe_value: Option<FpeValue>,
}

impl TryFrom<Transformation> for TransformSpec {
    type Error = AnonymizeError;

    // Several members set: the first in this order wins.
    fn try_from(wire: Transformation) -> std::result::Result<Self, Self::Error> {
        if let Some(replace) = wire.replace_value {
            return Ok(Self::Replace(replace));
        }
        if wire.redact_value.is_some() {
            return Ok(Self::Redact);
        }
        if wire.hash_value.is_some() {
            return Ok(Self::Hash);
        }
        if let Some(mask) = wire.mask_value {
            return Ok(Self::Mask(mask));
        }
        if let Some(fpe) = wire.fpe_value {
            return Ok(Self::Fpe(fpe));
        }
        Err(AnonymizeError::UnknownTransformation)
    }
}

impl From<TransformSpec> for Transformation {
    fn from(spec: TransformSpec) -> Self {
        let mut wire = Transformation::default();
        match spec {
            TransformSpec::Replace(value) => wire.replace_value = Some(value),
            TransformSpec::Redact => wire.redact_value = Some(EmptyValue {}),
            TransformSpec::Mask(value) => wire.mask_value = Some(value),
            TransformSpec::Hash => wire.hash_value = Some(EmptyValue {}),
            TransformSpec::Fpe(value) => wire.fpe_value = Some(value),
        }
        wire
    }
}

/// One template rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeTransformation {
    /// Field types this rule applies to; empty means any field type
    #[serde(default)]
    pub fields: Vec<FieldType>,
    /// Transformation to apply
    pub transformation: TransformSpec,
}

impl FieldTypeTransformation {
    /// Rule for the given field types
    pub fn for_fields<I, S>(fields: I, transformation: TransformSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(FieldType::new).collect(),
            transformation,
        }
    }

    /// Rule matching every field type
    pub fn wildcard(transformation: TransformSpec) -> Self {
        Self {
            fields: Vec::new(),
            transformation,
        }
    }

    /// Whether the rule matches any field type
    pub fn is_wildcard(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the rule applies to `field_name`
    pub fn matches(&self, field_name: &str) -> bool {
        self.is_wildcard() || self.fields.iter().any(|f| f.name == field_name)
    }
}

/// Ordered anonymization template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules, evaluated in order
    #[serde(default)]
    pub field_type_transformations: Vec<FieldTypeTransformation>,
    /// Applied to results that no rule matched; unmatched results stay
    /// untouched when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_transformation: Option<TransformSpec>,
}

impl AnonymizeTemplate {
    /// Template with the given rules and no default transformation
    pub fn new(rules: Vec<FieldTypeTransformation>) -> Self {
        Self {
            field_type_transformations: rules,
            ..Default::default()
        }
    }

    /// Set the default transformation
    pub fn with_default(mut self, transformation: TransformSpec) -> Self {
        self.default_transformation = Some(transformation);
        self
    }

    /// Parse a template from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AnonymizerError::Template(format!("Failed to parse template JSON: {e}")))
    }

    /// Parse a template from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AnonymizerError::Template(format!("Failed to parse template TOML: {e}")))
    }

    /// Load a template file; `.toml` files are parsed as TOML, anything
    /// else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnonymizerError::Template(format!(
                "Failed to read template {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Validate every transformation in the template
    ///
    /// Reports the first invalid rule with its position.
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.field_type_transformations.iter().enumerate() {
            rule.transformation.validate().map_err(|e| {
                AnonymizerError::Template(format!("Rule {index} is invalid: {e}"))
            })?;
        }
        if let Some(ref default) = self.default_transformation {
            default.validate().map_err(|e| {
                AnonymizerError::Template(format!("Default transformation is invalid: {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_wire_variants() {
        let json = r#"[
            {"replaceValue":{"newValue":"<PHONE>"}},
            {"redactValue":{}},
            {"hashValue":{}},
            {"maskValue":{"maskingCharacter":"*","charsToMask":8,"fromEnd":true}},
            {"fpeValue":{"key":"k","tweak":"t","decrypt":true}}
        ]"#;
        let specs: Vec<TransformSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs[0], TransformSpec::replace("<PHONE>"));
        assert_eq!(specs[1], TransformSpec::Redact);
        assert_eq!(specs[2], TransformSpec::Hash);
        assert_eq!(specs[3], TransformSpec::mask("*", 8, true));
        assert_eq!(specs[4], TransformSpec::fpe("k", "t", true));
    }

    #[test]
    fn test_empty_transformation_is_unknown() {
        let err = serde_json::from_str::<TransformSpec>("{}").unwrap_err();
        assert!(err.to_string().contains("Transformation not found"));
    }

    #[test]
    fn test_first_wire_member_wins() {
        let json = r#"{"hashValue":{},"replaceValue":{"newValue":"x"}}"#;
        let spec: TransformSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, TransformSpec::replace("x"));
    }

    #[test]
    fn test_fpe_aliases() {
        let json = r#"{"fPEValue":{"key":"k","tweak":"t"}}"#;
        let spec: TransformSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.kind(), "fpe_encrypt");
    }

    #[test]
    fn test_serialize_uses_wire_shape() {
        let value = serde_json::to_value(TransformSpec::Redact).unwrap();
        assert_eq!(value, serde_json::json!({"redactValue": {}}));
    }

    #[test]
    fn test_template_from_json() {
        let json = r#"{
            "name": "phones",
            "fieldTypeTransformations": [
                {"fields":[{"name":"PHONE_NUMBER"}],"transformation":{"replaceValue":{"newValue":"<phone>"}}},
                {"transformation":{"redactValue":{}}}
            ],
            "defaultTransformation": {"hashValue":{}}
        }"#;
        let template = AnonymizeTemplate::from_json(json).unwrap();
        assert_eq!(template.name.as_deref(), Some("phones"));
        assert_eq!(template.field_type_transformations.len(), 2);
        assert!(template.field_type_transformations[1].is_wildcard());
        assert_eq!(template.default_transformation, Some(TransformSpec::Hash));
    }

    #[test]
    fn test_template_from_toml() {
        let toml = r#"
name = "cards"

[[fieldTypeTransformations]]
fields = [{ name = "CREDIT_CARD" }]
transformation = { maskValue = { maskingCharacter = "*", charsToMask = 4, fromEnd = true } }
"#;
        let template = AnonymizeTemplate::from_toml(toml).unwrap();
        assert_eq!(
            template.field_type_transformations[0].transformation,
            TransformSpec::mask("*", 4, true)
        );
    }

    #[test]
    fn test_rule_matching() {
        let rule = FieldTypeTransformation::for_fields(["PERSON", "NRP"], TransformSpec::Redact);
        assert!(rule.matches("NRP"));
        assert!(!rule.matches("LOCATION"));
        assert!(FieldTypeTransformation::wildcard(TransformSpec::Redact).matches("ANYTHING"));
    }

    #[test]
    fn test_template_validation_reports_rule() {
        let template = AnonymizeTemplate::new(vec![
            FieldTypeTransformation::wildcard(TransformSpec::Hash),
            FieldTypeTransformation::wildcard(TransformSpec::mask("**", 1, false)),
        ]);
        let err = template.validate().unwrap_err();
        assert!(err.to_string().contains("Rule 1"));
    }
}
