//! Data models for the anonymization engine

pub mod detection;
pub mod request;
pub mod template;

pub use detection::{DetectionResult, FieldType, Location};
pub use request::{AnonymizeRequest, AnonymizeResponse};
pub use template::{
    AnonymizeTemplate, FieldTypeTransformation, FpeValue, MaskValue, ReplaceValue, TransformSpec,
    Transformation,
};
