//! Self-describing binary result container.
//!
//! A container is a set of named datasets (typed, with an explicit shape)
//! and named scalar attributes, encoded with `bincode`. Sweep files hold:
//!
//! | dataset        | dtype        | shape                 |
//! |----------------|--------------|-----------------------|
//! | `parameters`   | `float64`    | `[P]`                 |
//! | `energies`     | `float64`    | `[P, k]`              |
//! | `eigenvectors` | `complex128` | `[P, k, n]` (optional)|
//!
//! and the attributes `timestamp`, `model`, `parameter_spec`, `knum`, `command`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bincode::Options;
use es_core::Complex64;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::metadata::RunMetadata;
use crate::{ResultsError, ResultsResult};

pub const CONTAINER_MAGIC: &str = "EIGSWEEP";
pub const CONTAINER_VERSION: u32 = 1;

pub const PARAMETERS: &str = "parameters";
pub const ENERGIES: &str = "energies";
pub const EIGENVECTORS: &str = "eigenvectors";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatasetData {
    Float64(Vec<f64>),
    /// `[re, im]` pairs.
    Complex128(Vec<[f64; 2]>),
}

/// A named array: flat row-major data plus its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub shape: Vec<usize>,
    pub data: DatasetData,
}

impl Dataset {
    pub fn float64(shape: Vec<usize>, data: Vec<f64>) -> Self {
        Self {
            shape,
            data: DatasetData::Float64(data),
        }
    }

    pub fn complex128(shape: Vec<usize>, data: Vec<[f64; 2]>) -> Self {
        Self {
            shape,
            data: DatasetData::Complex128(data),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self.data {
            DatasetData::Float64(_) => "float64",
            DatasetData::Complex128(_) => "complex128",
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            DatasetData::Float64(v) => v.len(),
            DatasetData::Complex128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub magic: String,
    pub version: u32,
    pub datasets: BTreeMap<String, Dataset>,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            magic: CONTAINER_MAGIC.to_string(),
            version: CONTAINER_VERSION,
            datasets: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Build the container for one sweep. Shapes must already be validated.
    pub(crate) fn from_sweep(
        parameters: &[f64],
        energies: &[Vec<f64>],
        eigenvectors: Option<&[Vec<DVector<Complex64>>]>,
        metadata: &RunMetadata,
    ) -> Self {
        let points = parameters.len();
        let k = energies.first().map_or(0, Vec::len);

        let mut container = Self::new();
        container.datasets.insert(
            PARAMETERS.to_string(),
            Dataset::float64(vec![points], parameters.to_vec()),
        );
        container.datasets.insert(
            ENERGIES.to_string(),
            Dataset::float64(vec![points, k], energies.concat()),
        );

        if let Some(vectors) = eigenvectors {
            let n = vectors
                .first()
                .and_then(|row| row.first())
                .map_or(0, |v| v.len());
            let data = vectors
                .iter()
                .flatten()
                .flat_map(|v| v.iter().map(|z| [z.re, z.im]))
                .collect();
            container.datasets.insert(
                EIGENVECTORS.to_string(),
                Dataset::complex128(vec![points, k, n], data),
            );
        }

        for (name, value) in metadata.fields() {
            let attr = if name == "knum" {
                AttrValue::Int(metadata.knum() as i64)
            } else {
                AttrValue::Str(value)
            };
            container.attributes.insert(name.to_string(), attr);
        }

        container
    }

    fn validate(&self, path: &Path) -> ResultsResult<()> {
        let invalid = |reason: String| ResultsError::InvalidContainer {
            path: path.to_path_buf(),
            reason,
        };

        if self.magic != CONTAINER_MAGIC {
            return Err(invalid(format!("bad magic '{}'", self.magic)));
        }
        if self.version != CONTAINER_VERSION {
            return Err(invalid(format!("unsupported version {}", self.version)));
        }
        for (name, dataset) in &self.datasets {
            let Some(expected) = dataset
                .shape
                .iter()
                .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            else {
                return Err(invalid(format!(
                    "dataset '{name}' has overflowing shape {:?}",
                    dataset.shape
                )));
            };
            if expected != dataset.len() {
                return Err(invalid(format!(
                    "dataset '{name}' has {} elements but shape {:?}",
                    dataset.len(),
                    dataset.shape
                )));
            }
        }
        Ok(())
    }

    fn float64(&self, name: &str, path: &Path) -> ResultsResult<(&[usize], &[f64])> {
        match self.datasets.get(name) {
            Some(Dataset {
                shape,
                data: DatasetData::Float64(values),
            }) => Ok((shape.as_slice(), values.as_slice())),
            Some(ds) => Err(ResultsError::InvalidContainer {
                path: path.to_path_buf(),
                reason: format!("dataset '{name}' has dtype {}, expected float64", ds.dtype()),
            }),
            None => Err(ResultsError::InvalidContainer {
                path: path.to_path_buf(),
                reason: format!("missing dataset '{name}'"),
            }),
        }
    }

    fn str_attr(&self, name: &str, path: &Path) -> ResultsResult<String> {
        match self.attributes.get(name) {
            Some(AttrValue::Str(s)) => Ok(s.clone()),
            _ => Err(ResultsError::InvalidContainer {
                path: path.to_path_buf(),
                reason: format!("missing string attribute '{name}'"),
            }),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoding shared by the writer and the reader.
pub(crate) fn container_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Read and validate a container file.
///
/// Decoding is limited to the file size, so a corrupt length prefix fails
/// instead of allocating.
pub fn read_container(path: &Path) -> ResultsResult<Container> {
    let bytes = fs::read(path).map_err(ResultsError::io(path))?;
    let container: Container = container_options()
        .with_limit(bytes.len() as u64)
        .deserialize(&bytes)
        .map_err(|e| ResultsError::InvalidContainer {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    container.validate(path)?;
    Ok(container)
}

/// A sweep read back from a container file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResults {
    pub parameters: Vec<f64>,
    pub energies: Vec<Vec<f64>>,
    pub eigenvectors: Option<Vec<Vec<DVector<Complex64>>>>,
    pub metadata: RunMetadata,
}

/// Read a sweep container back into result tables and metadata.
pub fn load_results(path: &Path) -> ResultsResult<LoadedResults> {
    let container = read_container(path)?;
    let invalid = |reason: String| ResultsError::InvalidContainer {
        path: path.to_path_buf(),
        reason,
    };

    let (_, parameters) = container.float64(PARAMETERS, path)?;
    let parameters = parameters.to_vec();

    let (energy_shape, energy_values) = container.float64(ENERGIES, path)?;
    let [points, k] = energy_shape[..] else {
        return Err(invalid(format!("energies has shape {energy_shape:?}")));
    };
    if points != parameters.len() {
        return Err(invalid(format!(
            "energies has {points} rows for {} parameters",
            parameters.len()
        )));
    }
    let energies = if k > 0 {
        energy_values.chunks(k).map(<[f64]>::to_vec).collect()
    } else {
        vec![Vec::new(); points]
    };

    let eigenvectors = match container.datasets.get(EIGENVECTORS) {
        None => None,
        Some(Dataset {
            shape,
            data: DatasetData::Complex128(data),
        }) => {
            let [p, kv, n] = shape[..] else {
                return Err(invalid(format!("eigenvectors has shape {shape:?}")));
            };
            if p != points || kv != k {
                return Err(invalid(format!(
                    "eigenvectors has shape {shape:?} for energies {energy_shape:?}"
                )));
            }
            let vectors: Vec<DVector<Complex64>> = if n == 0 {
                vec![DVector::zeros(0); p * kv]
            } else {
                data.chunks(n)
                    .map(|chunk| DVector::from_iterator(n, chunk.iter().map(|&[re, im]| Complex64::new(re, im))))
                    .collect()
            };
            let rows = if kv == 0 {
                vec![Vec::new(); p]
            } else {
                vectors.chunks(kv).map(<[DVector<Complex64>]>::to_vec).collect()
            };
            Some(rows)
        }
        Some(other) => {
            return Err(invalid(format!(
                "dataset 'eigenvectors' has dtype {}, expected complex128",
                other.dtype()
            )));
        }
    };

    let knum = match container.attributes.get("knum") {
        Some(AttrValue::Int(v)) if *v >= 0 => *v as usize,
        _ => return Err(invalid("missing integer attribute 'knum'".to_string())),
    };
    let metadata = RunMetadata::with_timestamp(
        container.str_attr("timestamp", path)?,
        container.str_attr("model", path)?,
        container.str_attr("parameter_spec", path)?,
        knum,
        container.str_attr("command", path)?,
    );

    Ok(LoadedResults {
        parameters,
        energies,
        eigenvectors,
        metadata,
    })
}
