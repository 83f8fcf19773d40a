//! Anonymization configuration

use crate::anonymization::cipher::CipherProfile;
use crate::domain::{AnonymizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Character domain for format-preserving encryption
    #[serde(default)]
    pub cipher_profile: CipherProfile,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.audit.validate()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ANONYMIZER_ANONYMIZATION_CIPHER_PROFILE") {
            self.cipher_profile = val.parse().map_err(|_| {
                AnonymizerError::Configuration(format!(
                    "Invalid ANONYMIZER_ANONYMIZATION_CIPHER_PROFILE: {val}"
                ))
            })?;
        }

        self.audit.apply_env_overrides()
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err(AnonymizerError::Configuration(
                "anonymization.audit.log_path cannot be empty when auditing is enabled"
                    .to_string(),
            ));
        }
        if self.enabled && self.log_path.is_dir() {
            return Err(AnonymizerError::Configuration(format!(
                "anonymization.audit.log_path is a directory: {}",
                self.log_path.display()
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ANONYMIZER_ANONYMIZATION_AUDIT_ENABLED") {
            self.enabled = parse_bool("ANONYMIZER_ANONYMIZATION_AUDIT_ENABLED", &val)?;
        }

        if let Ok(val) = std::env::var("ANONYMIZER_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("ANONYMIZER_ANONYMIZATION_AUDIT_JSON_FORMAT") {
            self.json_format = parse_bool("ANONYMIZER_ANONYMIZATION_AUDIT_JSON_FORMAT", &val)?;
        }

        Ok(())
    }
}

fn parse_bool(name: &str, val: &str) -> Result<bool> {
    val.parse()
        .map_err(|_| AnonymizerError::Configuration(format!("Invalid {name} value: {val}")))
}
