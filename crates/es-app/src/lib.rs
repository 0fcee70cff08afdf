//! Application service layer for eigsweep.
//!
//! Ties the pipeline together for front ends: expand the parameter spec,
//! resolve the model, compute the eigenpairs and optionally write them out.

pub mod config;
pub mod error;
pub mod model_service;
pub mod progress;
pub mod run_service;

pub use config::{RunConfig, RunOverrides, load_overrides};
pub use error::{AppError, AppResult};
pub use model_service::{ModelSummary, list_models};
pub use progress::{SweepProgressEvent, SweepStage};
pub use run_service::{
    SweepRequest, SweepResponse, SweepTiming, run_sweep, run_sweep_with_progress,
};
