// PII Anonymizer - Anonymization Transformation Engine
// Copyright (c) 2025 PII Anonymizer Contributors
// Licensed under the MIT License

//! # PII Anonymizer
//!
//! Rewrites text at previously detected PII spans according to an ordered
//! anonymization template.
//!
//! ## Overview
//!
//! This library provides:
//! - **Preprocessing** of detections: ordering and exact-span deduplication
//! - **Dispatch** of each detection to the first matching template rule
//! - **Transforms**: replace, redact, mask, SHA-256 hash and FF1
//!   format-preserving encryption
//! - **Fail-closed orchestration**: any failing span aborts the call and no
//!   text is returned
//! - **JSON crawling** of documents described by a field-type schema
//! - **Audit logging** with hashed span values
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Engine, transforms, cipher, audit
//! - [`domain`] - Error types and identifiers
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use pii_anonymizer::anonymization::{
//!     anonymize, AnonymizeTemplate, DetectionResult, FieldTypeTransformation, TransformSpec,
//! };
//!
//! let template = AnonymizeTemplate::new(vec![
//!     FieldTypeTransformation::for_fields(["PHONE_NUMBER"], TransformSpec::replace("<phone-number>")),
//!     FieldTypeTransformation::for_fields(["CREDIT_CARD"], TransformSpec::Redact),
//! ]);
//!
//! let text = "My phone number is 058-5559943";
//! let results = vec![DetectionResult::new("PHONE_NUMBER", 19, 30, 0.85)];
//!
//! assert_eq!(
//!     anonymize(text, &results, &template).unwrap(),
//!     "My phone number is <phone-number>"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Engine operations fail with [`domain::AnonymizeError`]; everything around
//! the engine uses [`domain::AnonymizerError`], which wraps engine errors:
//!
//! ```rust,no_run
//! use pii_anonymizer::domain::AnonymizerError;
//!
//! fn example() -> Result<(), AnonymizerError> {
//!     let _config = pii_anonymizer::config::load_config("anonymizer.toml")?;
//!     let template = pii_anonymizer::anonymization::AnonymizeTemplate::from_file("template.json")?;
//!     template.validate()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate. Span values never reach the
//! logs:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(transformed = 3, "Anonymization completed");
//! warn!(index = 2, "Request in batch failed");
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
