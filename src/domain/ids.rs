//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEY_SEPARATOR: char = '.';

/// Template store key newtype wrapper
///
/// Templates are addressed as `project.action.id`, for example
/// `acme.anonymize.default`. Each segment must be non-empty and must not
/// itself contain the separator.
///
/// # Examples
///
/// ```
/// use pii_anonymizer::domain::ids::TemplateKey;
/// use std::str::FromStr;
///
/// let key = TemplateKey::new("acme", "anonymize", "default").unwrap();
/// assert_eq!(key.as_str(), "acme.anonymize.default");
///
/// let parsed = TemplateKey::from_str("acme.anonymize.default").unwrap();
/// assert_eq!(parsed.action(), "anonymize");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateKey(String);

impl TemplateKey {
    /// Builds a key from its three segments
    pub fn new(project: &str, action: &str, id: &str) -> Result<Self, String> {
        for (name, segment) in [("project", project), ("action", action), ("id", id)] {
            if segment.trim().is_empty() {
                return Err(format!("Template key {name} cannot be empty"));
            }
            if segment.contains(KEY_SEPARATOR) {
                return Err(format!(
                    "Template key {name} cannot contain '{KEY_SEPARATOR}': {segment}"
                ));
            }
        }
        Ok(Self(format!(
            "{project}{KEY_SEPARATOR}{action}{KEY_SEPARATOR}{id}"
        )))
    }

    /// Parses a `project.action.id` string
    pub fn parse(key: &str) -> Result<Self, String> {
        let parts: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(format!(
                "Invalid template key format. Expected format: {{project}}.{{action}}.{{id}}, got: {key}"
            ));
        }
        Self::new(parts[0], parts[1], parts[2])
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Project segment
    pub fn project(&self) -> &str {
        self.segment(0)
    }

    /// Action segment
    pub fn action(&self) -> &str {
        self.segment(1)
    }

    /// Template id segment
    pub fn id(&self) -> &str {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split(KEY_SEPARATOR).nth(index).unwrap_or_default()
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TemplateKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TemplateKey> for String {
    fn from(key: TemplateKey) -> Self {
        key.0
    }
}

impl AsRef<str> for TemplateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
