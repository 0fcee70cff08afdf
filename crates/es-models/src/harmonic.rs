//! Harmonic oscillator confined to a box of length `L`.

use crate::error::{ModelError, ModelResult};
use crate::hamiltonian::{box_hamiltonian, lowest_eigenpairs};
use crate::kwargs::{KwKind, KwargReader, Kwargs};
use crate::model::{EigenModel, Eigenpairs};
use crate::registry::{KeywordDoc, ModelEntry};

const NAME: &str = "harmonic.Oscillator1d";

#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator1d {
    pub grid_points: usize,
    pub omega: f64,
    pub mass: f64,
}

impl Oscillator1d {
    pub fn from_kwargs(kwargs: Kwargs) -> ModelResult<Self> {
        let mut reader = KwargReader::new(NAME, kwargs);
        let grid_points = reader.count("N", 128)?;
        let omega = reader.real("omega", 1.0)?;
        let mass = reader.real("mass", 1.0)?;
        reader.finish()?;

        if grid_points < 2 {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "N",
                reason: format!("needs at least 2 grid points, got {grid_points}"),
            });
        }
        for (name, value) in [("omega", omega), ("mass", mass)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::OutOfRange {
                    model: NAME,
                    name,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        Ok(Self {
            grid_points,
            omega,
            mass,
        })
    }
}

impl EigenModel for Oscillator1d {
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
        let stiffness = self.mass * self.omega * self.omega;
        let h = box_hamiltonian(self.grid_points, parameter, self.mass, |x| {
            0.5 * stiffness * x * x
        });
        lowest_eigenpairs(NAME, parameter, h, k)
    }
}

pub fn entry() -> ModelEntry {
    ModelEntry {
        namespace: "harmonic",
        class_name: "Oscillator1d",
        summary: "Harmonic oscillator in a box of length L",
        keywords: &[
            KeywordDoc {
                name: "N",
                kind: KwKind::Integer,
                default: "128",
            },
            KeywordDoc {
                name: "omega",
                kind: KwKind::Real,
                default: "1.0",
            },
            KeywordDoc {
                name: "mass",
                kind: KwKind::Real,
                default: "1.0",
            },
        ],
        factory: |kwargs| Ok(Box::new(Oscillator1d::from_kwargs(kwargs)?) as Box<dyn EigenModel>),
    }
}
