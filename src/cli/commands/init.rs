//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file and, optionally, a starter template.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "anonymizer.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Also write a starter template to this path
    #[arg(long)]
    pub template: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing anonymizer configuration");
        println!();

        let targets = std::iter::once(self.output.as_str()).chain(self.template.as_deref());
        for target in targets {
            if Path::new(target).exists() && !self.force {
                println!("❌ File already exists: {target}");
                println!("   Use --force to overwrite");
                return Ok(2); // Configuration error exit code
            }
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples(self.template.as_deref())
        } else {
            Self::generate_minimal_config(self.template.as_deref())
        };

        if let Err(e) = fs::write(&self.output, config_content) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {e}");
            return Ok(5); // Fatal error exit code
        }
        println!("✅ Configuration file created: {}", self.output);

        if let Some(ref template_path) = self.template {
            if let Err(e) = fs::write(template_path, Self::generate_template()) {
                println!("❌ Failed to write template file");
                println!("   Error: {e}");
                return Ok(5);
            }
            println!("✅ Template created: {template_path}");
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Edit the template rules for your field types");
        println!("  3. Validate configuration: anonymizer validate-config");
        println!("  4. Anonymize: anonymizer anonymize --input request.json");
        println!();
        Ok(0)
    }

    /// Generate minimal configuration
    fn generate_minimal_config(template: Option<&str>) -> String {
        let template_section = match template {
            Some(path) => format!("[template]\npath = \"{path}\"\n"),
            None => "# [template]\n# path = \"templates/default.json\"\n".to_string(),
        };

        format!(
            r#"# PII Anonymizer Configuration File

[application]
log_level = "info"
batch_concurrency = 4

[anonymization]
cipher_profile = "alphanumeric"

[anonymization.audit]
enabled = false
log_path = "./audit/anonymization.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"

{template_section}"#
        )
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples(template: Option<&str>) -> String {
        let template_path = template.unwrap_or("templates/default.json");

        format!(
            r#"# PII Anonymizer Configuration File
#
# This file contains all configuration options with examples and explanations.
# Values may reference environment variables with ${{VAR_NAME}}, and every
# key can be overridden with ANONYMIZER_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Requests anonymized at once by the batch command (1-256)
batch_concurrency = 4

# ============================================================================
# Anonymization
# ============================================================================
[anonymization]
# Character domain for format-preserving encryption:
#   alphanumeric - digits and ASCII letters, case-sensitive (radix 62)
#   numeric      - digits only (radix 10)
cipher_profile = "alphanumeric"

[anonymization.audit]
# Append one entry per request; span values are stored as SHA-256 hashes
enabled = true
log_path = "./audit/anonymization.log"

# JSON lines (true) or plain text (false)
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON log files
local_enabled = true

# Log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"

# ============================================================================
# Default Template
# ============================================================================
[template]
# Used when a request carries no template (JSON, or TOML by extension)
path = "{template_path}"

# Template key (project.action.id)
# key = "clinic.anonymize.default"
"#
        )
    }

    /// Generate a starter template
    fn generate_template() -> String {
        r#"{
  "name": "default",
  "displayName": "Default anonymization",
  "fieldTypeTransformations": [
    {
      "fields": [{ "name": "PHONE_NUMBER" }],
      "transformation": { "replaceValue": { "newValue": "<PHONE_NUMBER>" } }
    },
    {
      "fields": [{ "name": "CREDIT_CARD" }],
      "transformation": {
        "maskValue": { "maskingCharacter": "*", "charsToMask": 12, "fromEnd": false }
      }
    },
    {
      "fields": [{ "name": "EMAIL_ADDRESS" }],
      "transformation": { "hashValue": {} }
    }
  ],
  "defaultTransformation": { "redactValue": {} }
}
"#
        .to_string()
    }
}
