//! Domain types shared across the anonymizer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TemplateKey`])
//! - **Error types** ([`AnonymizeError`], [`AnonymizerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Engine operations return `Result<T, AnonymizeError>`; everything around the
//! engine returns [`Result<T>`], and engine errors convert with `?`:
//!
//! ```rust
//! use pii_anonymizer::domain::{AnonymizeError, Result};
//!
//! fn engine_step() -> std::result::Result<String, AnonymizeError> {
//!     Err(AnonymizeError::UnknownTransformation)
//! }
//!
//! fn example() -> Result<String> {
//!     let text = engine_step()?;
//!     Ok(text)
//! }
//! # assert!(example().is_err());
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{AnonymizeError, AnonymizerError};
pub use ids::TemplateKey;
pub use result::Result;
