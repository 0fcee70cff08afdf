//! Tight-binding ring threaded by a magnetic flux.
//!
//! The swept parameter is the flux through the ring in units of the flux
//! quantum. It enters as a Peierls phase `2πΦ/N` on every bond, so the
//! eigenvectors are genuinely complex.

use std::f64::consts::PI;

use es_core::Complex64;
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ModelError, ModelResult};
use crate::hamiltonian::lowest_eigenpairs;
use crate::kwargs::{KwKind, KwargReader, Kwargs};
use crate::model::{EigenModel, Eigenpairs};
use crate::registry::{KeywordDoc, ModelEntry};

const NAME: &str = "lattice.FluxRing";

#[derive(Debug, Clone, PartialEq)]
pub struct FluxRing {
    pub hopping: f64,
    pub periodic: bool,
    /// On-site energies, drawn once at construction.
    pub onsite: Vec<f64>,
}

impl FluxRing {
    pub fn from_kwargs(kwargs: Kwargs) -> ModelResult<Self> {
        let mut reader = KwargReader::new(NAME, kwargs);
        let sites = reader.count("N", 16)?;
        let hopping = reader.real("t", 1.0)?;
        let disorder = reader.real("disorder", 0.0)?;
        let seed = reader.count("seed", 0)?;
        let periodic = reader.boolean("periodic", true)?;
        reader.finish()?;

        if sites < 3 {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "N",
                reason: format!("a ring needs at least 3 sites, got {sites}"),
            });
        }
        if !hopping.is_finite() {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "t",
                reason: format!("must be finite, got {hopping}"),
            });
        }
        if !(disorder.is_finite() && disorder >= 0.0) {
            return Err(ModelError::OutOfRange {
                model: NAME,
                name: "disorder",
                reason: format!("must be non-negative, got {disorder}"),
            });
        }

        let onsite = if disorder == 0.0 {
            vec![0.0; sites]
        } else {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            (0..sites)
                .map(|_| disorder * rng.gen_range(-0.5..0.5))
                .collect()
        };

        Ok(Self {
            hopping,
            periodic,
            onsite,
        })
    }

    fn hamiltonian(&self, flux: f64) -> DMatrix<Complex64> {
        let n = self.onsite.len();
        let phase = 2.0 * PI * flux / n as f64;
        let bond = Complex64::from_polar(-self.hopping, phase);

        let mut h = DMatrix::<Complex64>::zeros(n, n);
        for (i, &eps) in self.onsite.iter().enumerate() {
            h[(i, i)] = Complex64::new(eps, 0.0);
        }
        let bonds = if self.periodic { n } else { n - 1 };
        for i in 0..bonds {
            let j = (i + 1) % n;
            h[(i, j)] += bond;
            h[(j, i)] += bond.conj();
        }
        h
    }
}

impl EigenModel for FluxRing {
    fn name(&self) -> &str {
        NAME
    }

    fn dimension(&self) -> usize {
        self.onsite.len()
    }

    fn solve(&self, parameter: f64, k: usize) -> ModelResult<Eigenpairs> {
        if !parameter.is_finite() {
            return Err(ModelError::InvalidParameter {
                model: NAME,
                parameter,
                reason: "flux must be finite",
            });
        }
        lowest_eigenpairs(NAME, parameter, self.hamiltonian(parameter), k)
    }
}

pub fn entry() -> ModelEntry {
    ModelEntry {
        namespace: "lattice",
        class_name: "FluxRing",
        summary: "Tight-binding ring threaded by flux L (in flux quanta)",
        keywords: &[
            KeywordDoc {
                name: "N",
                kind: KwKind::Integer,
                default: "16",
            },
            KeywordDoc {
                name: "t",
                kind: KwKind::Real,
                default: "1.0",
            },
            KeywordDoc {
                name: "disorder",
                kind: KwKind::Real,
                default: "0.0",
            },
            KeywordDoc {
                name: "seed",
                kind: KwKind::Integer,
                default: "0",
            },
            KeywordDoc {
                name: "periodic",
                kind: KwKind::Boolean,
                default: "true",
            },
        ],
        factory: |kwargs| Ok(Box::new(FluxRing::from_kwargs(kwargs)?) as Box<dyn EigenModel>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kwargs::KwValue;

    fn ring(n: i64) -> FluxRing {
        let mut kwargs = Kwargs::new();
        kwargs.insert("N", KwValue::Integer(n));
        FluxRing::from_kwargs(kwargs).unwrap()
    }

    #[test]
    fn clean_ring_follows_cosine_band() {
        let model = ring(8);
        let flux = 0.25;
        let levels = model.solve(flux, 3).unwrap().values;

        let mut exact: Vec<f64> = (-4..4)
            .map(|m| -2.0 * (2.0 * PI * (m as f64 + flux) / 8.0).cos())
            .collect();
        exact.sort_by(|a, b| a.total_cmp(b));
        for (level, e) in levels.iter().zip(&exact) {
            assert!((level - e).abs() < 1e-10, "{level} vs {e}");
        }
    }

    #[test]
    fn flux_makes_eigenvectors_complex() {
        let pairs = ring(8).solve(0.25, 2).unwrap();
        let excited = &pairs.vectors[1];
        let ratio = excited[1] / excited[0];
        assert!((ratio.norm() - 1.0).abs() < 1e-8);
        assert!(ratio.im.abs() > 0.5);
    }

    #[test]
    fn disorder_is_reproducible_per_seed() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("disorder", KwValue::Real(2.0));
        kwargs.insert("seed", KwValue::Integer(7));
        let a = FluxRing::from_kwargs(kwargs.clone()).unwrap();
        let b = FluxRing::from_kwargs(kwargs).unwrap();
        assert_eq!(a.onsite, b.onsite);
        assert!(a.onsite.iter().all(|e| e.abs() <= 1.0));
    }

    #[test]
    fn open_chain_ignores_flux() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("periodic", KwValue::Boolean(false));
        let model = FluxRing::from_kwargs(kwargs).unwrap();
        let a = model.solve(0.0, 4).unwrap().values;
        let b = model.solve(0.3, 4).unwrap().values;
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-10);
        }
    }

    #[test]
    fn rejects_tiny_ring() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("N", KwValue::Integer(2));
        assert!(matches!(
            FluxRing::from_kwargs(kwargs).unwrap_err(),
            ModelError::OutOfRange { name: "N", .. }
        ));
    }
}
