//! Parameter spec errors.

use thiserror::Error;

/// Result type for parameter spec parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while parsing a parameter spec.
///
/// Every variant carries the full spec so the message stands on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty parameter spec")]
    Empty,

    #[error("Invalid number '{token}' in parameter spec '{spec}'")]
    InvalidNumber { token: String, spec: String },

    #[error("Non-finite value '{token}' in parameter spec '{spec}'")]
    NonFinite { token: String, spec: String },

    #[error(
        "Invalid point count '{token}' in parameter spec '{spec}': expected an integer from 1 to {}",
        crate::spec::MAX_POINTS
    )]
    InvalidLength { token: String, spec: String },

    #[error("Invalid exponent '{token}' in parameter spec '{spec}': expected a finite value > 0")]
    InvalidExponent { token: String, spec: String },

    #[error("Malformed parameter spec '{spec}': {reason}")]
    Malformed { spec: String, reason: &'static str },
}
