//! Sweep execution service.

use std::time::Instant;

use es_models::{ModelRegistry, resolve};
use es_params::{ParameterSequence, expand};
use es_results::{RunMetadata, WriteReport, write_results};
use es_solver::{EigenpairResult, SolveProgress, compute_with_progress};
use tracing::info;

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::progress::{SweepProgressEvent, SweepStage};

/// Request to execute one sweep.
pub struct SweepRequest<'a> {
    pub config: &'a RunConfig,
    pub registry: &'a ModelRegistry,
    /// Invocation recorded in the output metadata.
    pub command: &'a str,
}

/// Wall time spent per stage, in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepTiming {
    pub expand_time_s: f64,
    pub resolve_time_s: f64,
    pub solve_time_s: f64,
    pub write_time_s: f64,
    pub total_time_s: f64,
}

/// Everything a front end needs to report a finished sweep.
#[derive(Debug, Clone)]
pub struct SweepResponse {
    pub model_name: String,
    pub parameters: ParameterSequence,
    pub result: EigenpairResult,
    pub metadata: RunMetadata,
    /// Present when an output path was configured.
    pub write: Option<WriteReport>,
    pub timing: SweepTiming,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(SweepProgressEvent)>,
    stage: SweepStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(SweepProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Run the whole pipeline for `request`.
pub fn run_sweep(request: &SweepRequest) -> AppResult<SweepResponse> {
    run_sweep_with_progress(request, None)
}

/// Run the whole pipeline for `request` and stream progress events.
///
/// Stages run strictly in order and the first failure ends the run; nothing
/// is written unless every parameter value was solved.
pub fn run_sweep_with_progress(
    request: &SweepRequest,
    mut progress_cb: Option<&mut dyn FnMut(SweepProgressEvent)>,
) -> AppResult<SweepResponse> {
    let config = request.config;
    config.validate()?;

    let started = Instant::now();
    let mut timing = SweepTiming::default();

    emit_progress(
        &mut progress_cb,
        SweepStage::Expanding,
        started,
        Some(config.parameters.clone()),
    );
    let stage_start = Instant::now();
    let parameters = expand(&config.parameters)?;
    timing.expand_time_s = stage_start.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        SweepStage::Resolving,
        started,
        Some(config.model.clone()),
    );
    let stage_start = Instant::now();
    let model = resolve(&config.model, request.registry)?;
    timing.resolve_time_s = stage_start.elapsed().as_secs_f64();

    emit_progress(&mut progress_cb, SweepStage::Solving, started, None);
    let stage_start = Instant::now();
    let result = {
        let mut forward = |solve: SolveProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(SweepProgressEvent {
                    stage: SweepStage::Solving,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    solve: Some(solve),
                });
            }
        };
        compute_with_progress(model.as_ref(), &parameters, config.knum, Some(&mut forward))?
    };
    timing.solve_time_s = stage_start.elapsed().as_secs_f64();

    let metadata = RunMetadata::new(
        config.model.clone(),
        config.parameters.clone(),
        config.knum,
        request.command,
    );

    let write = match &config.output {
        Some(path) => {
            emit_progress(
                &mut progress_cb,
                SweepStage::Writing,
                started,
                Some(path.display().to_string()),
            );
            let stage_start = Instant::now();
            let vectors = config.vectors.then(|| result.eigenvectors());
            let report = write_results(
                path,
                &parameters,
                result.eigenvalues(),
                vectors,
                &metadata,
            )?;
            timing.write_time_s = stage_start.elapsed().as_secs_f64();
            Some(report)
        }
        None => None,
    };

    timing.total_time_s = started.elapsed().as_secs_f64();
    emit_progress(&mut progress_cb, SweepStage::Completed, started, None);
    info!(
        model = model.name(),
        points = parameters.len(),
        k = config.knum,
        total_time_s = timing.total_time_s,
        "sweep finished"
    );

    Ok(SweepResponse {
        model_name: model.name().to_string(),
        parameters,
        result,
        metadata,
        write,
        timing,
    })
}
