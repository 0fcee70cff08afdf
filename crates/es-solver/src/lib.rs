//! Eigenpair orchestration over a parameter sweep.
//!
//! Calls a model's eigensolver once per parameter value, strictly in input
//! order, validates what comes back and assembles index-aligned results.
//! The first failure ends the sweep; no partial result is returned.

pub mod error;
pub mod result;
pub mod sweep;

pub use error::{ComputationError, ComputationResult};
pub use result::EigenpairResult;
pub use sweep::{SolveProgress, compute, compute_with_progress};
