//! Format selection and atomic file output.

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use es_core::Complex64;
use nalgebra::DVector;
use tempfile::{Builder, NamedTempFile};
use tracing::{info, warn};

use crate::container::{Container, container_options};
use crate::metadata::RunMetadata;
use crate::tabular::write_table;
use crate::{ResultsError, ResultsResult};

const CONTAINER_EXTENSIONS: [&str; 2] = ["eig", "bin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Binary container with typed datasets and attributes.
    Container,
    /// Tab-separated text, eigenvalues only.
    Tabular,
}

impl OutputFormat {
    /// Select the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let is_container = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                CONTAINER_EXTENSIONS
                    .iter()
                    .any(|c| ext.eq_ignore_ascii_case(c))
            });
        if is_container {
            Self::Container
        } else {
            Self::Tabular
        }
    }

    pub fn stores_vectors(self) -> bool {
        matches!(self, Self::Container)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::Tabular => f.write_str("tabular"),
        }
    }
}

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub format: OutputFormat,
    pub path: PathBuf,
    pub rows: usize,
    /// Eigenvectors were supplied but the format cannot hold them.
    pub vectors_omitted: bool,
}

/// Write one sweep to `path`.
///
/// `energies[i]` holds the eigenvalues at `parameters[i]`; `eigenvectors`,
/// when present, has the same row layout. Tabular output drops the vectors
/// with a warning. Nothing is left at `path` if the write fails.
pub fn write_results(
    path: &Path,
    parameters: &[f64],
    energies: &[Vec<f64>],
    eigenvectors: Option<&[Vec<DVector<Complex64>>]>,
    metadata: &RunMetadata,
) -> ResultsResult<WriteReport> {
    check_shapes(parameters, energies, eigenvectors)?;

    let format = OutputFormat::from_path(path);
    let vectors_omitted = eigenvectors.is_some() && !format.stores_vectors();
    if vectors_omitted {
        warn!(
            path = %path.display(),
            "tabular output cannot hold eigenvectors; writing eigenvalues only"
        );
    }

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp = create_sibling(path, dir)?;

    {
        let mut out = BufWriter::new(temp.as_file_mut());
        match format {
            OutputFormat::Container => {
                let container = Container::from_sweep(parameters, energies, eigenvectors, metadata);
                container_options().serialize_into(&mut out, &container).map_err(|source| {
                    ResultsError::Encode {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
            }
            OutputFormat::Tabular => {
                write_table(&mut out, parameters, energies, metadata)
                    .map_err(ResultsError::io(path))?;
            }
        }
        out.flush().map_err(ResultsError::io(path))?;
    }
    temp.as_file().sync_all().map_err(ResultsError::io(path))?;
    temp.persist(path).map_err(|e| ResultsError::io(path)(e.error))?;

    info!(path = %path.display(), %format, rows = parameters.len(), "results written");
    Ok(WriteReport {
        format,
        path: path.to_path_buf(),
        rows: parameters.len(),
        vectors_omitted,
    })
}

/// Temporary file next to `path` that ends up with the permissions a plain
/// write would give: the target's current mode when it exists, otherwise
/// the default mode for new files.
fn create_sibling(path: &Path, dir: &Path) -> ResultsResult<NamedTempFile> {
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = Builder::new();
    builder.prefix(".eigsweep-");
    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        // Subject to the process umask, like `File::create`.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let temp = builder.tempfile_in(dir).map_err(ResultsError::io(path))?;
    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(ResultsError::io(path))?;
    }
    Ok(temp)
}

fn check_shapes(
    parameters: &[f64],
    energies: &[Vec<f64>],
    eigenvectors: Option<&[Vec<DVector<Complex64>>]>,
) -> ResultsResult<()> {
    let shape = |what, expected, found| {
        if expected == found {
            Ok(())
        } else {
            Err(ResultsError::Shape {
                what,
                expected,
                found,
            })
        }
    };

    shape("energy rows", parameters.len(), energies.len())?;
    let k = energies.first().map_or(0, Vec::len);
    for row in energies {
        shape("eigenvalues per row", k, row.len())?;
    }

    if let Some(vectors) = eigenvectors {
        shape("eigenvector rows", parameters.len(), vectors.len())?;
        let n = vectors
            .first()
            .and_then(|row| row.first())
            .map_or(0, |v| v.len());
        for row in vectors {
            shape("eigenvectors per row", k, row.len())?;
            for v in row {
                shape("eigenvector length", n, v.len())?;
            }
        }
    }
    Ok(())
}
