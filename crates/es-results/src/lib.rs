//! es-results: sweep result serialization.
//!
//! Two output formats, chosen by file extension:
//! - a self-describing binary container (`.eig`, `.bin`) holding named, typed
//!   datasets plus scalar metadata attributes
//! - tab-separated text for everything else (eigenvalues only)
//!
//! Files are written to a temporary sibling and renamed into place, so a
//! failed write never leaves a partial file under the requested name.

pub mod container;
pub mod metadata;
pub mod tabular;
pub mod writer;

pub use container::{AttrValue, Container, Dataset, DatasetData, LoadedResults, load_results, read_container};
pub use metadata::RunMetadata;
pub use writer::{OutputFormat, WriteReport, write_results};

use std::path::PathBuf;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode container '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: bincode::Error,
    },

    #[error("Invalid container '{}': {reason}", path.display())]
    InvalidContainer { path: PathBuf, reason: String },

    #[error("Inconsistent result shape: {what} (expected {expected}, found {found})")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl ResultsError {
    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
