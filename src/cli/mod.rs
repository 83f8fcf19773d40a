//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PII Anonymizer - format-preserving anonymization of detected PII
#[derive(Parser, Debug)]
#[command(name = "anonymizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "anonymizer.toml", env = "ANONYMIZER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANONYMIZER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize one request
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Anonymize many independent requests concurrently
    Batch(commands::batch::BatchArgs),

    /// Anonymize a JSON document using a field-type schema
    Crawl(commands::crawl::CrawlArgs),

    /// Validate an anonymization template
    ValidateTemplate(commands::validate_template::ValidateTemplateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["anonymizer", "anonymize", "--input", "req.json"]);
        assert_eq!(cli.config, "anonymizer.toml");
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, "req.json");
                assert!(args.template.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["anonymizer", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["anonymizer", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_batch() {
        let cli = Cli::parse_from([
            "anonymizer",
            "batch",
            "--input",
            "requests.jsonl",
            "--concurrency",
            "8",
        ]);
        match cli.command {
            Commands::Batch(args) => assert_eq!(args.concurrency, Some(8)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_crawl() {
        let cli = Cli::parse_from([
            "anonymizer",
            "crawl",
            "--schema",
            "schema.json",
            "--values",
            "values.json",
        ]);
        assert!(matches!(cli.command, Commands::Crawl(_)));
    }

    #[test]
    fn test_cli_parse_validate_template() {
        let cli = Cli::parse_from(["anonymizer", "validate-template", "template.json"]);
        match cli.command {
            Commands::ValidateTemplate(args) => assert_eq!(args.template, "template.json"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
