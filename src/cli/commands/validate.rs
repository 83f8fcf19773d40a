//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the anonymizer configuration file.

use super::EXIT_CONFIG;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Batch Concurrency: {}", config.application.batch_concurrency);
        println!("  Cipher Profile: {}", config.anonymization.cipher_profile);
        println!(
            "  Audit Log: {}",
            if config.anonymization.audit.enabled {
                config.anonymization.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!(
                    "{} ({})",
                    config.logging.local_path, config.logging.local_rotation
                )
            } else {
                "disabled".to_string()
            }
        );
        match config.template.path {
            Some(ref path) => println!("  Template: {}", path.display()),
            None => println!("  Template: none"),
        }
        if let Some(ref key) = config.template.key {
            println!("  Template Key: {key}");
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_valid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anonymizer.toml");
        fs::write(&path, "[application]\nlog_level = \"warn\"\n").unwrap();

        let args = ValidateArgs {};
        assert_eq!(args.execute(&path.to_string_lossy()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_config() {
        let args = ValidateArgs {};
        assert_eq!(
            args.execute("/no/such/anonymizer.toml").await.unwrap(),
            EXIT_CONFIG
        );
    }
}
