//! Error types for sweep orchestration.

use es_models::ModelError;
use thiserror::Error;

/// Errors that end a sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Invalid eigenpair count k={k}: must be between 1 and the operator dimension {dimension}")]
    InvalidCount { k: usize, dimension: usize },

    #[error("Solve failed at parameter index {index} (L = {parameter}): {source}")]
    Solve {
        index: usize,
        parameter: f64,
        #[source]
        source: ModelError,
    },

    #[error("Model returned {found} {what} at parameter index {index} (L = {parameter}), expected {expected}")]
    WrongCount {
        index: usize,
        parameter: f64,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Eigenvector {vector} at parameter index {index} (L = {parameter}) has length {found}, expected {expected}")]
    WrongDimension {
        index: usize,
        parameter: f64,
        vector: usize,
        expected: usize,
        found: usize,
    },

    #[error("Eigenvalues not ascending at parameter index {index} (L = {parameter}): value {position} is {current} after {previous}")]
    NotAscending {
        index: usize,
        parameter: f64,
        position: usize,
        previous: f64,
        current: f64,
    },

    #[error("Non-finite eigenvalue {position} at parameter index {index} (L = {parameter}): {value}")]
    NonFinite {
        index: usize,
        parameter: f64,
        position: usize,
        value: f64,
    },
}

pub type ComputationResult<T> = Result<T, ComputationError>;
