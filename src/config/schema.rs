//! Configuration schema types

use crate::anonymization::config::AnonymizationConfig;
use crate::domain::TemplateKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main anonymizer configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Engine settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default template
    #[serde(default)]
    pub template: TemplateConfig,
}

impl AnonymizerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        self.template.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum requests anonymized at once by the batch command
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.batch_concurrency == 0 || self.batch_concurrency > 256 {
            return Err(format!(
                "application.batch_concurrency must be between 1 and 256, got {}",
                self.batch_concurrency
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

/// Template used when a request does not carry one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template file (JSON, or TOML with a `.toml` extension)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Template key (`project.action.id`), informational
    #[serde(default)]
    pub key: Option<TemplateKey>,
}

impl TemplateConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.path {
            if !path.exists() {
                return Err(format!("template.path not found: {}", path.display()));
            }
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_batch_concurrency() -> usize {
    4
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.batch_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_path_must_exist() {
        let config = TemplateConfig {
            path: Some(PathBuf::from("/definitely/not/here.json")),
            key: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AnonymizerConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.application.batch_concurrency, 4);
        assert!(!config.logging.local_enabled);
        assert!(config.template.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_template_key_section() {
        let config: AnonymizerConfig = toml::from_str(
            r#"
            [template]
            key = "clinic.anonymize.default"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.template.key.unwrap().as_str(),
            "clinic.anonymize.default"
        );
    }
}
