//! Particle in a box with a Gaussian well.
//!
//! The swept parameter is the box length `L`.

use crate::error::{ModelError, ModelResult};
use crate::hamiltonian::{box_hamiltonian, lowest_eigenpairs};
use crate::kwargs::{KwKind, KwargReader, Kwargs};
use crate::model::{EigenModel, Eigenpairs};
use crate::registry::{KeywordDoc, ModelEntry};

const NAME: &str = "gaussian.Gaussian1d";

/// `H = -1/(2m) d²/dx² + V0 exp(-x²/R²)` on `N` grid points.
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian1d {
    pub grid_points: usize,
    pub depth: f64,
    pub radius: f64,
    pub mass: f64,
}

impl Gaussian1d {
    pub fn from_kwargs(kwargs: Kwargs) -> ModelResult<Self> {
        let mut reader = KwargReader::new(NAME, kwargs);
        let grid_points = reader.count("N", 128)?;
        let depth = reader.real("V0", -4.0)?;
        let radius = reader.real("R", 2.0)?;
        let mass = reader.real("mass", 1.0)?;
        reader.finish()?;

        if grid_points < 2 {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "N",
                reason: format!("needs at least 2 grid points, got {grid_points}"),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "R",
                reason: format!("must be positive, got {radius}"),
            });
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "mass",
                reason: format!("must be positive, got {mass}"),
            });
        }

        Ok(Self {
            grid_points,
            depth,
            radius,
            mass,
        })
    }
}

impl EigenModel for Gaussian1d {
    fn name(&self) -> &str {
        NAME
    }

    fn dimension(&self) -> usize {
        self.grid_points
    }

    fn solve(&self, parameter: f64, k: usize) -> ModelResult<Eigenpairs> {
        if !(parameter.is_finite() && parameter > 0.0) {
            return Err(ModelError::InvalidParameter {
                model: NAME,
                parameter,
                reason: "box length must be positive",
            });
        }
        let r2 = self.radius * self.radius;
        let h = box_hamiltonian(self.grid_points, parameter, self.mass, |x| {
            self.depth * (-x * x / r2).exp()
        });
        lowest_eigenpairs(NAME, parameter, h, k)
    }
}

pub fn entry() -> ModelEntry {
    ModelEntry {
        namespace: "gaussian",
        class_name: "Gaussian1d",
        summary: "Particle in a box of length L with a Gaussian well",
        keywords: &[
            KeywordDoc {
                name: "N",
                kind: KwKind::Integer,
                default: "128",
            },
            KeywordDoc {
                name: "V0",
                kind: KwKind::Real,
                default: "-4.0",
            },
            KeywordDoc {
                name: "R",
                kind: KwKind::Real,
                default: "2.0",
            },
            KeywordDoc {
                name: "mass",
                kind: KwKind::Real,
                default: "1.0",
            },
        ],
        factory: |kwargs| Ok(Box::new(Gaussian1d::from_kwargs(kwargs)?) as Box<dyn EigenModel>),
    }
}
