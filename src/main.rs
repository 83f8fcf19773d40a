// PII Anonymizer - Anonymization Transformation Engine
// Copyright (c) 2025 PII Anonymizer Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_anonymizer::cli::{Cli, Commands};
use pii_anonymizer::config::LoggingConfig;
use pii_anonymizer::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // File logging follows the configuration when it can be read
    let logging_config = logging_config_for(&cli.config);
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "PII Anonymizer");

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    drop(guard);
    process::exit(exit_code);
}

fn logging_config_for(config_path: &str) -> LoggingConfig {
    if !Path::new(config_path).exists() {
        return LoggingConfig::default();
    }
    pii_anonymizer::config::load_config(config_path)
        .map(|config| config.logging)
        .unwrap_or_default()
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => args.execute(&cli.config).await,
        Commands::Batch(args) => args.execute(&cli.config).await,
        Commands::Crawl(args) => args.execute(&cli.config).await,
        Commands::ValidateTemplate(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
