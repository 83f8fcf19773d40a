//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration or template error,
//! 3 anonymization failure, 5 fatal error.

pub mod anonymize;
pub mod batch;
pub mod crawl;
pub mod init;
pub mod validate;
pub mod validate_template;

use crate::anonymization::AnonymizeTemplate;
use crate::config::{load_config, AnonymizerConfig};
use anyhow::Context;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Exit code for configuration and template errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for failed anonymization
pub const EXIT_ANONYMIZE: i32 = 3;

/// Load the configuration file, or defaults when it does not exist
pub(crate) fn load_config_or_default(config_path: &str) -> crate::domain::Result<AnonymizerConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        Ok(AnonymizerConfig::default())
    }
}

/// Template from `--template`, else from the configuration
pub(crate) fn resolve_template(
    cli_template: Option<&str>,
    config: &AnonymizerConfig,
) -> crate::domain::Result<Option<AnonymizeTemplate>> {
    let path = cli_template
        .map(Path::new)
        .or(config.template.path.as_deref());

    match path {
        Some(path) => {
            let template = AnonymizeTemplate::from_file(path)?;
            template.validate()?;
            tracing::info!(
                template = %path.display(),
                key = ?config.template.key.as_ref().map(|k| k.as_str()),
                rules = template.field_type_transformations.len(),
                "Template loaded"
            );
            Ok(Some(template))
        }
        None => Ok(None),
    }
}

/// Read a file, or stdin for `-`
pub(crate) fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
    }
}

/// Write to a file, or stdout when no path is given
pub(crate) fn write_output(path: Option<&str>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {path}"))
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
