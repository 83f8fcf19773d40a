//! Validate template command implementation

use super::EXIT_CONFIG;
use crate::anonymization::AnonymizeTemplate;
use clap::Args;

/// Arguments for the validate-template command
#[derive(Args, Debug)]
pub struct ValidateTemplateArgs {
    /// Template file (JSON, or TOML with a `.toml` extension)
    pub template: String,
}

impl ValidateTemplateArgs {
    /// Execute the validate-template command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(template = %self.template, "Validating template");

        println!("🔍 Validating template: {}", self.template);
        println!();

        let template = match AnonymizeTemplate::from_file(&self.template) {
            Ok(t) => {
                println!("✅ Template parsed successfully");
                t
            }
            Err(e) => {
                println!("❌ Failed to parse template");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        match template.validate() {
            Ok(()) => {
                println!("✅ Template is valid");
                println!();
                println!("Template Summary:");
                if let Some(ref name) = template.name {
                    println!("  Name: {name}");
                }
                println!("  Rules: {}", template.field_type_transformations.len());
                for (index, rule) in template.field_type_transformations.iter().enumerate() {
                    let fields = if rule.is_wildcard() {
                        "*".to_string()
                    } else {
                        rule.fields
                            .iter()
                            .map(|f| f.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    println!("    {index}: {fields} -> {}", rule.transformation.kind());
                }
                match template.default_transformation {
                    Some(ref default) => println!("  Default: {}", default.kind()),
                    None => println!("  Default: none (unmatched spans are left as is)"),
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Template validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}
