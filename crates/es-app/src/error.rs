//! Error types for the es-app service layer.

use std::path::PathBuf;

use es_models::ResolutionError;
use es_params::ParseError;
use es_results::ResultsError;
use es_solver::ComputationError;

/// Any failure of a sweep run, from configuration to output.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid parameter spec: {0}")]
    Parse(#[from] ParseError),

    #[error("Model resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Computation failed: {0}")]
    Computation(#[from] ComputationError),

    #[error("Writing results failed: {0}")]
    Results(#[from] ResultsError),

    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit status for this error: 2 for configuration problems,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for es-app operations.
pub type AppResult<T> = Result<T, AppError>;
