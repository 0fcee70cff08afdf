//! Sequential sweep over a parameter sequence.

use es_core::{CoreError, Tolerances, ensure_ascending};
use es_models::{EigenModel, Eigenpairs};
use es_params::ParameterSequence;
use tracing::{debug, info};

use crate::error::{ComputationError, ComputationResult};
use crate::result::EigenpairResult;

/// Reported after each successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveProgress {
    pub index: usize,
    pub total: usize,
    pub parameter: f64,
}

/// Compute the `k` lowest eigenpairs of `model` at every parameter value.
pub fn compute(
    model: &dyn EigenModel,
    params: &ParameterSequence,
    k: usize,
) -> ComputationResult<EigenpairResult> {
    compute_with_progress(model, params, k, None)
}

/// [`compute`], streaming a [`SolveProgress`] event after each solve.
pub fn compute_with_progress(
    model: &dyn EigenModel,
    params: &ParameterSequence,
    k: usize,
    mut progress_cb: Option<&mut dyn FnMut(SolveProgress)>,
) -> ComputationResult<EigenpairResult> {
    let dimension = model.dimension();
    if k == 0 || k > dimension {
        return Err(ComputationError::InvalidCount { k, dimension });
    }

    info!(
        model = model.name(),
        points = params.len(),
        k,
        dimension,
        "computing eigenpairs"
    );

    let total = params.len();
    let mut eigenvalues = Vec::with_capacity(total);
    let mut eigenvectors = Vec::with_capacity(total);

    for (index, &parameter) in params.iter().enumerate() {
        let pairs = model
            .solve(parameter, k)
            .map_err(|source| ComputationError::Solve {
                index,
                parameter,
                source,
            })?;
        check_pairs(&pairs, index, parameter, k, dimension)?;
        debug!(index, parameter, lowest = pairs.values[0], "solved");

        eigenvalues.push(pairs.values);
        eigenvectors.push(pairs.vectors);

        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(SolveProgress {
                index,
                total,
                parameter,
            });
        }
    }

    Ok(EigenpairResult {
        k,
        dimension,
        eigenvalues,
        eigenvectors,
    })
}

/// Hold the model to its contract; the values are not re-sorted.
fn check_pairs(
    pairs: &Eigenpairs,
    index: usize,
    parameter: f64,
    k: usize,
    dimension: usize,
) -> ComputationResult<()> {
    for (what, found) in [
        ("eigenvalues", pairs.values.len()),
        ("eigenvectors", pairs.vectors.len()),
    ] {
        if found != k {
            return Err(ComputationError::WrongCount {
                index,
                parameter,
                what,
                expected: k,
                found,
            });
        }
    }

    if let Some((position, &value)) = pairs
        .values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(ComputationError::NonFinite {
            index,
            parameter,
            position,
            value,
        });
    }

    if let Err(CoreError::NotAscending {
        position,
        previous,
        current,
        ..
    }) = ensure_ascending(&pairs.values, "eigenvalues", Tolerances::default())
    {
        return Err(ComputationError::NotAscending {
            index,
            parameter,
            position,
            previous,
            current,
        });
    }

    if let Some((vector, v)) = pairs
        .vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.len() != dimension)
    {
        return Err(ComputationError::WrongDimension {
            index,
            parameter,
            vector,
            expected: dimension,
            found: v.len(),
        });
    }

    Ok(())
}
