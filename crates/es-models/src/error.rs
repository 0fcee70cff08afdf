//! Model construction, solve and resolution errors.

use thiserror::Error;

use crate::kwargs::KwKind;

/// Result type for model construction and solving.
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type for descriptor resolution.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Errors raised by a model, either by its constructor or by its eigensolver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown keyword '{name}' for {model}")]
    UnknownKeyword { model: &'static str, name: String },

    #[error("Keyword '{name}' for {model} expects {expected}, got {found} '{value}'")]
    TypeMismatch {
        model: &'static str,
        name: &'static str,
        expected: KwKind,
        found: KwKind,
        value: String,
    },

    #[error("Keyword '{name}' for {model} out of range: {reason}")]
    OutOfRange {
        model: &'static str,
        name: &'static str,
        reason: String,
    },

    #[error("Invalid parameter value {parameter} for {model}: {reason}")]
    InvalidParameter {
        model: &'static str,
        parameter: f64,
        reason: &'static str,
    },

    #[error("Requested {k} eigenpairs from {model} but its operator dimension is {dimension}")]
    TooManyEigenpairs {
        model: &'static str,
        k: usize,
        dimension: usize,
    },

    #[error("Non-finite matrix element in {model} at parameter {parameter}")]
    NonFinite { model: &'static str, parameter: f64 },

    #[error("Eigensolver did not converge for {model} at parameter {parameter}")]
    NoConvergence { model: &'static str, parameter: f64 },
}

/// Errors raised while turning a descriptor string into a model instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Empty model descriptor")]
    Empty,

    #[error("Model descriptor not found: '{path}'")]
    NotFound { path: String },

    #[error("Malformed keyword segment '{segment}' in model descriptor '{spec}': {reason}")]
    MalformedKeyword {
        segment: String,
        spec: String,
        reason: &'static str,
    },

    #[error("Duplicate keyword '{name}' in model descriptor '{spec}'")]
    DuplicateKeyword { name: String, spec: String },

    #[error("Failed to construct model '{path}': {source}")]
    Construction {
        path: String,
        #[source]
        source: ModelError,
    },
}
