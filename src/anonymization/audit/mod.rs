//! Audit logging module
//!
//! Appends one entry per anonymization request; span values are stored
//! only as SHA-256 hashes.

pub mod logger;

pub use logger::AuditLogger;

