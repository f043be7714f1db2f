//! Error handling for the conversion core
//!
//! Only record-defining failures surface to callers; everything else is
//! recovered locally and degrades to defaults or omission.

use thiserror::Error;

/// Conversion error types
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A record-defining field is absent after all fallbacks
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A method with zero parseable brewing stages
    #[error("brewing method has no usable stages")]
    EmptyStages,

    /// The sanitizer could not produce parseable JSON
    #[error("input is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Classification produced no candidate record kind
    #[error("unrecognized record format")]
    Unrecognized,
}

/// Result type for conversions
pub type ConvertResult<T> = Result<T, ConvertError>;
