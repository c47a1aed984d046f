//! Frame sampler: evaluates the linkage at evenly spaced times.

use std::sync::atomic::{AtomicUsize, Ordering};

use cf_kinematics::{CrankModel, DegenerateRoot, LinkageGeometry, SliderSolver};
use nalgebra::Point2;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cancel::{CancelToken, SampleProgress};
use crate::error::{SimError, SimResult};
use crate::options::SampleOptions;
use crate::trajectory::{FrameDiagnostic, FrameState, Trajectory};

type Evaluated = (FrameState, Option<DegenerateRoot>);

/// Outcome of one frame in a parallel run.
enum Slot {
    Done(Evaluated),
    Failed(SimError),
    Cancelled,
    /// Not computed because a lower index already failed.
    Skipped,
}

/// Samples the linkage at `t_i = dt * i` for `i in 0..frame_count`.
///
/// Every frame depends only on its own `t_i`, so frames can be computed in
/// any order; trajectories are always assembled in index order.
#[derive(Clone, Debug)]
pub struct FrameSampler {
    geometry: LinkageGeometry,
    model: CrankModel,
    solver: SliderSolver,
    options: SampleOptions,
    dt: f64,
}

impl FrameSampler {
    pub fn new(geometry: LinkageGeometry, options: SampleOptions) -> SimResult<Self> {
        options.validate()?;

        let dt = options.dt(&geometry);
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "sample spacing must be positive and finite",
            });
        }

        Ok(Self {
            model: CrankModel::new(&geometry),
            solver: SliderSolver::with_options(&geometry, options.solver),
            geometry,
            options,
            dt,
        })
    }

    pub fn geometry(&self) -> &LinkageGeometry {
        &self.geometry
    }

    pub fn options(&self) -> &SampleOptions {
        &self.options
    }

    pub fn model(&self) -> &CrankModel {
        &self.model
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn frame_count(&self) -> usize {
        self.options.frame_count
    }

    pub fn sample_time(&self, index: usize) -> f64 {
        self.dt * index as f64
    }

    /// Compute a single frame.
    pub fn frame(&self, index: usize) -> SimResult<FrameState> {
        if index >= self.frame_count() {
            return Err(SimError::IndexOob {
                index,
                len: self.frame_count(),
            });
        }
        self.evaluate(index).map(|(frame, _)| frame)
    }

    /// Lazy frames in index order. Each call starts again from index 0.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            sampler: self,
            next: 0,
        }
    }

    /// Sequential run, stopping at the first failing frame.
    pub fn run(&self) -> SimResult<Trajectory> {
        self.run_internal(None, None)
    }

    pub fn run_with_cancel(&self, cancel: &CancelToken) -> SimResult<Trajectory> {
        self.run_internal(Some(cancel), None)
    }

    /// Sequential run reporting progress after every frame.
    pub fn run_with_progress(
        &self,
        cancel: Option<&CancelToken>,
        progress: Option<&mut dyn FnMut(SampleProgress)>,
    ) -> SimResult<Trajectory> {
        self.run_internal(cancel, progress)
    }

    /// Parallel run on the rayon pool.
    ///
    /// Reports the same error as [`FrameSampler::run`] when frames fail: the
    /// lowest failing index wins.
    pub fn run_parallel(&self) -> SimResult<Trajectory> {
        self.run_parallel_internal(None, None)
    }

    pub fn run_parallel_with_cancel(&self, cancel: &CancelToken) -> SimResult<Trajectory> {
        self.run_parallel_internal(Some(cancel), None)
    }

    /// Parallel run reporting progress as frames finish.
    ///
    /// The callback runs on worker threads. `completed` counts finished
    /// frames, not the index of the frame that just finished.
    pub fn run_parallel_with_progress(
        &self,
        cancel: Option<&CancelToken>,
        progress: Option<&(dyn Fn(SampleProgress) + Sync)>,
    ) -> SimResult<Trajectory> {
        self.run_parallel_internal(cancel, progress)
    }

    fn evaluate(&self, index: usize) -> SimResult<Evaluated> {
        let t = self.sample_time(index);
        let b = self.model.joint_b(t);
        let solution = self
            .solver
            .solve(&b.position)
            .map_err(|source| SimError::Frame { index, t, source })?;

        let frame = FrameState {
            index,
            t,
            phi: self.model.phi(t),
            a: Point2::origin(),
            b,
            c: solution.position,
            c_root: solution.root,
        };
        Ok((frame, solution.degenerate(&b.position)))
    }

    fn run_internal(
        &self,
        cancel: Option<&CancelToken>,
        mut progress: Option<&mut dyn FnMut(SampleProgress)>,
    ) -> SimResult<Trajectory> {
        let total = self.frame_count();
        debug!(frames = total, dt = self.dt, "sampling trajectory");

        let mut frames = Vec::with_capacity(total);
        let mut diagnostics = Vec::new();

        for index in 0..total {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(SimError::Cancelled {
                    completed: index,
                    total,
                });
            }

            let (frame, degenerate) = self.evaluate(index)?;
            record_degenerate(&mut diagnostics, &frame, degenerate);
            frames.push(frame);

            if let Some(cb) = progress.as_deref_mut() {
                cb(SampleProgress {
                    completed: index + 1,
                    total,
                });
            }
        }

        Ok(self.finish(frames, diagnostics))
    }

    fn run_parallel_internal(
        &self,
        cancel: Option<&CancelToken>,
        progress: Option<&(dyn Fn(SampleProgress) + Sync)>,
    ) -> SimResult<Trajectory> {
        let total = self.frame_count();
        debug!(frames = total, dt = self.dt, "sampling trajectory in parallel");

        // Lowest failing index seen so far; frames above it are not computed.
        let first_failure = AtomicUsize::new(usize::MAX);
        let finished = AtomicUsize::new(0);

        let slots: Vec<Slot> = (0..total)
            .into_par_iter()
            .map(|index| {
                if index > first_failure.load(Ordering::Relaxed) {
                    return Slot::Skipped;
                }
                if cancel.is_some_and(CancelToken::is_cancelled) {
                    return Slot::Cancelled;
                }
                match self.evaluate(index) {
                    Ok(evaluated) => {
                        let completed = finished.fetch_add(1, Ordering::Relaxed) + 1;
                        if let Some(cb) = progress {
                            cb(SampleProgress { completed, total });
                        }
                        Slot::Done(evaluated)
                    }
                    Err(e) => {
                        first_failure.fetch_min(index, Ordering::Relaxed);
                        Slot::Failed(e)
                    }
                }
            })
            .collect();

        let completed = slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Done(_)))
            .count();

        let mut frames = Vec::with_capacity(total);
        let mut diagnostics = Vec::new();
        for slot in slots {
            match slot {
                Slot::Done((frame, degenerate)) => {
                    record_degenerate(&mut diagnostics, &frame, degenerate);
                    frames.push(frame);
                }
                Slot::Failed(e) => return Err(e),
                Slot::Cancelled => return Err(SimError::Cancelled { completed, total }),
                Slot::Skipped => {
                    unreachable!("frames are only skipped above a failed index")
                }
            }
        }

        Ok(self.finish(frames, diagnostics))
    }

    fn finish(&self, frames: Vec<FrameState>, diagnostics: Vec<FrameDiagnostic>) -> Trajectory {
        debug!(
            frames = frames.len(),
            degenerate = diagnostics.len(),
            "trajectory complete"
        );
        Trajectory::new(self.geometry, self.options, self.dt, frames, diagnostics)
    }
}

fn warn_degenerate(frame: &FrameState, root: &DegenerateRoot) {
    warn!(
        index = frame.index,
        t = frame.t,
        bx = root.bx,
        by = root.by,
        discriminant = root.discriminant,
        "tangent slider root; using the larger root"
    );
}

fn record_degenerate(
    diagnostics: &mut Vec<FrameDiagnostic>,
    frame: &FrameState,
    degenerate: Option<DegenerateRoot>,
) {
    if let Some(root) = degenerate {
        warn_degenerate(frame, &root);
        diagnostics.push(FrameDiagnostic {
            index: frame.index,
            t: frame.t,
            root,
        });
    }
}

/// Iterator returned by [`FrameSampler::frames`].
pub struct Frames<'a> {
    sampler: &'a FrameSampler,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = SimResult<FrameState>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.sampler.frame_count() {
            return None;
        }
        let index = self.next;
        self.next += 1;

        Some(self.sampler.evaluate(index).map(|(frame, degenerate)| {
            if let Some(root) = degenerate {
                warn_degenerate(&frame, &root);
            }
            frame
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.frame_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
