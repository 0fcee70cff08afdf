//! The eigensolver interface every model implements.

use std::fmt;

use es_core::Complex64;
use nalgebra::DVector;

use crate::error::ModelResult;

/// The `k` lowest eigenpairs of a model's operator at one parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpairs {
    /// Eigenvalues in ascending order.
    pub values: Vec<f64>,
    /// `vectors[j]` belongs to `values[j]`; each has the operator dimension.
    pub vectors: Vec<DVector<Complex64>>,
}

/// A model whose governing operator can be diagonalised at a parameter value.
///
/// Models are configured once at construction and are read-only afterwards,
/// so repeated solves at the same parameter give the same answer.
pub trait EigenModel: fmt::Debug + Send + Sync {
    /// Model name for logging and error messages.
    fn name(&self) -> &str;

    /// Dimension `n` of the operator; constant for the lifetime of the model.
    fn dimension(&self) -> usize;

    /// Compute the `k` lowest eigenpairs at `parameter`.
    ///
    /// Implementations return eigenvalues in ascending order, with one
    /// eigenvector of length [`EigenModel::dimension`] per eigenvalue.
    fn solve(&self, parameter: f64, k: usize) -> ModelResult<Eigenpairs>;
}
