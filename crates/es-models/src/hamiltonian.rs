//! Dense Hermitian operators shared by the built-in models.
//!
//! Operators are assembled as complex matrices and diagonalised with
//! `nalgebra::SymmetricEigen`, which handles the Hermitian case directly.

use es_core::Complex64;
use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::{ModelError, ModelResult};
use crate::model::Eigenpairs;

/// QR sweep budget per matrix row before a solve counts as non-converged.
const SWEEPS_PER_ROW: usize = 100;

/// Finite-difference Hamiltonian `-1/(2m) d²/dx² + V(x)` for a particle in a
/// box of the given `length`, centred on the origin with hard walls.
///
/// `n` interior grid points are used, so the walls sit one spacing outside
/// the first and last point.
pub fn box_hamiltonian(
    n: usize,
    length: f64,
    mass: f64,
    potential: impl Fn(f64) -> f64,
) -> DMatrix<Complex64> {
    let spacing = length / (n + 1) as f64;
    let kinetic = 1.0 / (2.0 * mass * spacing * spacing);

    let mut h = DMatrix::<Complex64>::zeros(n, n);
    for i in 0..n {
        let x = -0.5 * length + (i + 1) as f64 * spacing;
        h[(i, i)] = Complex64::new(2.0 * kinetic + potential(x), 0.0);
        if i + 1 < n {
            h[(i, i + 1)] = Complex64::new(-kinetic, 0.0);
            h[(i + 1, i)] = Complex64::new(-kinetic, 0.0);
        }
    }
    h
}

/// Diagonalise `matrix` and keep the `k` lowest eigenpairs, ascending.
pub fn lowest_eigenpairs(
    model: &'static str,
    parameter: f64,
    matrix: DMatrix<Complex64>,
    k: usize,
) -> ModelResult<Eigenpairs> {
    let dimension = matrix.nrows();
    if k > dimension {
        return Err(ModelError::TooManyEigenpairs {
            model,
            k,
            dimension,
        });
    }
    if matrix.iter().any(|z| !(z.re.is_finite() && z.im.is_finite())) {
        return Err(ModelError::NonFinite { model, parameter });
    }

    let eigen = SymmetricEigen::try_new(matrix, f64::EPSILON, SWEEPS_PER_ROW * dimension.max(1))
        .ok_or(ModelError::NoConvergence { model, parameter })?;

    let mut order: Vec<usize> = (0..dimension).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    order.truncate(k);

    let values: Vec<f64> = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NoConvergence { model, parameter });
    }
    let vectors = order
        .iter()
        .map(|&i| eigen.eigenvectors.column(i).into_owned())
        .collect();

    Ok(Eigenpairs { values, vectors })
}
