use crate::CoreError;

/// Floating point type used throughout the system.
pub type Real = f64;

/// Complex amplitude of an eigenvector component.
pub type Complex64 = nalgebra::Complex<Real>;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Check that `values` never decreases.
///
/// Neighbours that are equal within `tol` count as ordered, so degenerate
/// levels coming out of a dense eigensolver pass.
pub fn ensure_ascending(values: &[Real], what: &'static str, tol: Tolerances) -> Result<(), CoreError> {
    for (i, pair) in values.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        if previous > current && !nearly_equal(previous, current, tol) {
            return Err(CoreError::NotAscending {
                what,
                position: i + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}
