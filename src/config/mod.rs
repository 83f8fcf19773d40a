//! Configuration management for the anonymizer.
//!
//! Configuration is a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ANONYMIZER_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! batch_concurrency = 4
//!
//! [anonymization]
//! cipher_profile = "alphanumeric"
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${ANONYMIZER_AUDIT_DIR}/anonymization.log"
//! json_format = true
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//!
//! [template]
//! path = "templates/default.json"
//! key = "clinic.anonymize.default"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use pii_anonymizer::config::load_config;
//!
//! # fn example() {
//! match load_config("anonymizer.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{AnonymizerConfig, ApplicationConfig, LoggingConfig, TemplateConfig};
