//! Assembled sweep results.

use es_core::Complex64;
use nalgebra::DVector;

/// Eigenpairs of every parameter value of a sweep.
///
/// Row `i` of both tables belongs to parameter `i`; within a row, eigenvector
/// `j` belongs to eigenvalue `j` and eigenvalues ascend.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenpairResult {
    pub(crate) k: usize,
    pub(crate) dimension: usize,
    pub(crate) eigenvalues: Vec<Vec<f64>>,
    pub(crate) eigenvectors: Vec<Vec<DVector<Complex64>>>,
}

impl EigenpairResult {
    /// Eigenpairs per parameter value.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Operator dimension `n` shared by every eigenvector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of parameter values.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// `len() × k` table of eigenvalues.
    pub fn eigenvalues(&self) -> &[Vec<f64>] {
        &self.eigenvalues
    }

    /// `len() × k` table of eigenvectors, each of length `dimension()`.
    pub fn eigenvectors(&self) -> &[Vec<DVector<Complex64>>] {
        &self.eigenvectors
    }
}
