use es_solver::SolveProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStage {
    Expanding,
    Resolving,
    Solving,
    Writing,
    Completed,
}

impl SweepStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expanding => "Expanding parameters",
            Self::Resolving => "Resolving model",
            Self::Solving => "Solving",
            Self::Writing => "Writing results",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepProgressEvent {
    pub stage: SweepStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    /// Set for per-parameter events of the `Solving` stage.
    pub solve: Option<SolveProgress>,
}

impl SweepProgressEvent {
    pub fn stage(stage: SweepStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            solve: None,
        }
    }

    /// Fraction of parameter values solved so far, for `Solving` events.
    pub fn fraction_complete(&self) -> Option<f64> {
        self.solve
            .map(|s| (s.index + 1) as f64 / s.total.max(1) as f64)
    }
}
