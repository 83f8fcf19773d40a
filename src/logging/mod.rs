//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Console output with configurable log levels
//! - JSON-formatted local log files with daily or hourly rotation
//!
//! Span values are never logged; only counts, field types and offsets.
//!
//! # Example
//!
//! ```no_run
//! use pii_anonymizer::logging::init_logging;
//! use pii_anonymizer::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an anonymization call
///
/// # Example
///
/// ```no_run
/// use pii_anonymizer::log_anonymize_start;
///
/// log_anonymize_start!(3, "default-template");
/// ```
#[macro_export]
macro_rules! log_anonymize_start {
    ($results_count:expr, $template:expr) => {
        tracing::debug!(
            results = $results_count,
            template = %$template,
            "Starting anonymization"
        );
    };
}

/// Log the completion of an anonymization call
///
/// # Example
///
/// ```no_run
/// use pii_anonymizer::log_anonymize_complete;
/// use std::time::Duration;
///
/// log_anonymize_complete!(2, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_anonymize_complete {
    ($transformed:expr, $duration:expr) => {
        tracing::info!(
            transformed = $transformed,
            duration_us = $duration.as_micros() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pii_anonymizer::log_error_with_context;
/// use pii_anonymizer::domain::AnonymizerError;
///
/// let error = AnonymizerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use pii_anonymizer::log_batch_processing;
///
/// log_batch_processing!(10, 100);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}
