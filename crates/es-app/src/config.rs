//! Run configuration: built-in defaults, an optional YAML run file and
//! command-line flags, layered in that order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "gaussian.Gaussian1d:N=128,V0=-4.0,R=2.0";
pub const DEFAULT_PARAMETERS: &str = "5.0,20.0:20";
pub const DEFAULT_KNUM: usize = 1;

/// Fully resolved settings of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub model: String,
    pub parameters: String,
    pub knum: usize,
    pub output: Option<PathBuf>,
    pub vectors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            parameters: DEFAULT_PARAMETERS.to_string(),
            knum: DEFAULT_KNUM,
            output: None,
            vectors: false,
        }
    }
}

impl RunConfig {
    /// Apply every field that `overrides` sets.
    pub fn merged(mut self, overrides: &RunOverrides) -> Self {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(parameters) = &overrides.parameters {
            self.parameters = parameters.clone();
        }
        if let Some(knum) = overrides.knum {
            self.knum = knum;
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
        if let Some(vectors) = overrides.vectors {
            self.vectors = vectors;
        }
        self
    }

    /// Checks that do not need the pipeline itself.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err(AppError::Config("output path is empty".to_string()));
            }
            if output.is_dir() {
                return Err(AppError::Config(format!(
                    "output path '{}' is a directory",
                    output.display()
                )));
            }
        }
        Ok(())
    }
}

/// A partial [`RunConfig`], as read from a run file or from flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOverrides {
    pub model: Option<String>,
    pub parameters: Option<String>,
    pub knum: Option<usize>,
    pub output: Option<PathBuf>,
    pub vectors: Option<bool>,
}

/// Load a YAML run file. An empty file sets nothing.
pub fn load_overrides(path: &Path) -> AppResult<RunOverrides> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(RunOverrides::default());
    }

    serde_yaml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
