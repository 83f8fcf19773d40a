//! Anonymization of detected PII spans
//!
//! The pipeline for one text:
//! - **Preprocess**: order detections and drop exact-span duplicates
//! - **Dispatch**: pick the first template rule matching each detection
//! - **Transform**: replace, redact, mask, hash or FF1-encrypt the span
//! - **Audit**: optionally record the call with hashed span values
//!
//! # Usage
//!
//! ```rust,ignore
//! use pii_anonymizer::anonymization::{AnonymizationEngine, AnonymizationConfig};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let response = engine.anonymize(&request)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod cipher;
pub mod config;
pub mod crawler;
pub mod dispatcher;
pub mod engine;
pub mod models;
pub mod preprocess;
pub mod report;

// Re-export main types
pub use anonymizer::{TransformContext, Transformer};
pub use cipher::CipherProfile;
pub use config::{AnonymizationConfig, AuditConfig};
pub use engine::{anonymize, anonymize_with_report, AnonymizationEngine, BatchItem};
pub use models::{
    AnonymizeRequest, AnonymizeResponse, AnonymizeTemplate, DetectionResult, FieldType,
    FieldTypeTransformation, Location, TransformSpec,
};
pub use report::AnonymizeReport;
