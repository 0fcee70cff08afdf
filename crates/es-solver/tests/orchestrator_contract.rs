//! Orchestrator behaviour against scripted test models.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use es_core::Complex64;
use es_models::{EigenModel, Eigenpairs, ModelError, ModelRegistry, ModelResult, resolve};
use es_params::expand;
use es_solver::{ComputationError, SolveProgress, compute, compute_with_progress};
use nalgebra::DVector;

/// Diagonal operator `diag(L, 2L, …, nL)` with a scriptable fault.
#[derive(Debug)]
struct Scripted {
    n: usize,
    calls: AtomicUsize,
    seen: Mutex<Vec<f64>>,
    fault: Fault,
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    None,
    FailAt(usize),
    DescendingAt(usize),
    ShortVectorAt(usize),
    MissingValueAt(usize),
}

impl Scripted {
    fn new(n: usize, fault: Fault) -> Self {
        Self {
            n,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            fault,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EigenModel for Scripted {
    fn name(&self) -> &str {
        "test.Scripted"
    }

    fn dimension(&self) -> usize {
        self.n
    }

    fn solve(&self, parameter: f64, k: usize) -> ModelResult<Eigenpairs> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(parameter);

        let mut values: Vec<f64> = (1..=k).map(|j| j as f64 * parameter.abs()).collect();
        let mut vectors: Vec<DVector<Complex64>> = (0..k)
            .map(|j| {
                let mut v = DVector::from_element(self.n, Complex64::new(0.0, 0.0));
                v[j] = Complex64::new(0.0, 1.0);
                v
            })
            .collect();

        match self.fault {
            Fault::FailAt(i) if i == call => {
                return Err(ModelError::NoConvergence {
                    model: "test.Scripted",
                    parameter,
                });
            }
            Fault::DescendingAt(i) if i == call => values.reverse(),
            Fault::ShortVectorAt(i) if i == call => {
                vectors[0] = DVector::from_element(self.n - 1, Complex64::new(1.0, 0.0));
            }
            Fault::MissingValueAt(i) if i == call => {
                values.pop();
            }
            _ => {}
        }

        Ok(Eigenpairs { values, vectors })
    }
}

#[test]
fn k_above_dimension_fails_before_any_solve() {
    let model = Scripted::new(3, Fault::None);
    let params = expand("1,2,3").unwrap();

    let err = compute(&model, &params, 4).unwrap_err();
    assert_eq!(err, ComputationError::InvalidCount { k: 4, dimension: 3 });
    assert_eq!(model.calls(), 0);

    let err = compute(&model, &params, 0).unwrap_err();
    assert_eq!(err, ComputationError::InvalidCount { k: 0, dimension: 3 });
    assert_eq!(model.calls(), 0);
}

#[test]
fn solves_in_input_order_not_value_order() {
    let model = Scripted::new(4, Fault::None);
    let params = expand("3.0,1.0,2.0,1.0").unwrap();

    let result = compute(&model, &params, 2).unwrap();
    assert_eq!(*model.seen.lock().unwrap(), vec![3.0, 1.0, 2.0, 1.0]);
    assert_eq!(result.len(), 4);
    assert_eq!(result.k(), 2);
    assert_eq!(result.dimension(), 4);
    assert_eq!(result.eigenvalues()[0], vec![3.0, 6.0]);
    assert_eq!(result.eigenvalues()[1], vec![1.0, 2.0]);
    assert_eq!(result.eigenvectors()[2][1][1], Complex64::new(0.0, 1.0));
}

#[test]
fn first_failure_stops_the_sweep() {
    let model = Scripted::new(2, Fault::FailAt(1));
    let params = expand("0,1:4").unwrap();

    let err = compute(&model, &params, 1).unwrap_err();
    let ComputationError::Solve {
        index, parameter, ..
    } = err
    else {
        panic!("expected solve error, got {err:?}");
    };
    assert_eq!(index, 1);
    assert!((parameter - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(model.calls(), 2);
}

#[test]
fn descending_eigenvalues_are_a_contract_violation() {
    let model = Scripted::new(3, Fault::DescendingAt(2));
    let params = expand("1,2,3").unwrap();

    let err = compute(&model, &params, 3).unwrap_err();
    assert!(matches!(
        err,
        ComputationError::NotAscending {
            index: 2,
            position: 1,
            ..
        }
    ));
}

#[test]
fn shape_violations_are_reported() {
    let params = expand("1,2").unwrap();

    let model = Scripted::new(3, Fault::ShortVectorAt(0));
    assert!(matches!(
        compute(&model, &params, 2).unwrap_err(),
        ComputationError::WrongDimension {
            index: 0,
            vector: 0,
            expected: 3,
            found: 2,
            ..
        }
    ));

    let model = Scripted::new(3, Fault::MissingValueAt(1));
    assert!(matches!(
        compute(&model, &params, 2).unwrap_err(),
        ComputationError::WrongCount {
            index: 1,
            what: "eigenvalues",
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn progress_is_reported_per_value() {
    let model = Scripted::new(2, Fault::None);
    let params = expand("5.0,20.0:5").unwrap();

    let mut events: Vec<SolveProgress> = Vec::new();
    compute_with_progress(&model, &params, 1, Some(&mut |e| events.push(e))).unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[4].index, 4);
    assert_eq!(events[4].total, 5);
    assert_eq!(events[1].parameter, 8.75);
}

#[test]
fn builtin_model_sweep() {
    let model = resolve("harmonic.Oscillator1d:N=64", &ModelRegistry::builtin()).unwrap();
    let params = expand("4,8:3").unwrap();

    let result = compute(model.as_ref(), &params, 2).unwrap();
    assert_eq!(result.len(), 3);
    // A wider box lowers the confinement energy.
    assert!(result.eigenvalues()[2][0] < result.eigenvalues()[0][0]);
}
