//! Run execution service.

use std::path::Path;

use cf_core::timing::Timer;
use cf_project::StudyDef;
use cf_sim::{CancelToken, FrameSampler, SampleProgress, Trajectory};
use tracing::info;

use crate::compile::compile_study;
use crate::error::AppResult;

/// Options for running studies.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute frames on the rayon pool
    pub parallel: bool,
    /// Checked between frames
    pub cancel: Option<CancelToken>,
}

/// Concise timing summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub sample_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub trajectory: Trajectory,
    pub timing: RunTimingSummary,
}

/// Compile and run a study.
pub fn run_study(study: &StudyDef, options: &RunOptions) -> AppResult<RunResponse> {
    run_study_with_progress(study, options, None)
}

/// Compile and run a study, streaming progress.
///
/// Sequential runs report after every frame. Parallel runs report once, when
/// all frames are done.
pub fn run_study_with_progress(
    study: &StudyDef,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(SampleProgress)>,
) -> AppResult<RunResponse> {
    let total_timer = Timer::start("total");

    let compile_timer = Timer::start("compile");
    let runtime = compile_study(study)?;
    let sampler = FrameSampler::new(runtime.geometry, runtime.options)?;
    let compile_time_s = compile_timer.stop();

    info!(
        study = %study.name,
        frames = sampler.frame_count(),
        parallel = options.parallel,
        "running study"
    );

    let sample_timer = Timer::start("sample");
    let trajectory = if options.parallel {
        let trajectory = match &options.cancel {
            Some(cancel) => sampler.run_parallel_with_cancel(cancel)?,
            None => sampler.run_parallel()?,
        };
        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(SampleProgress {
                completed: trajectory.len(),
                total: trajectory.len(),
            });
        }
        trajectory
    } else {
        sampler.run_with_progress(options.cancel.as_ref(), progress_cb)?
    };
    let sample_time_s = sample_timer.stop();

    let timing = RunTimingSummary {
        compile_time_s,
        sample_time_s,
        total_time_s: total_timer.stop(),
    };
    info!(
        frames = trajectory.len(),
        degenerate = trajectory.diagnostics().len(),
        sample_time_s,
        "study complete"
    );

    Ok(RunResponse { trajectory, timing })
}

/// Load a study file (YAML or JSON) and run it.
pub fn load_and_run(path: &Path, options: &RunOptions) -> AppResult<RunResponse> {
    let study = cf_project::load_study(path)?;
    run_study(&study, options)
}
