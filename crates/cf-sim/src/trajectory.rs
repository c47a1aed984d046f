//! Per-frame state and the assembled trajectory.

use std::time::Duration;

use cf_kinematics::{DegenerateRoot, JointKinematics, LinkageGeometry, RootSelection};
use nalgebra::Point2;

use crate::options::SampleOptions;

/// Kinematic state of the whole linkage at one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Sample index (position in the trajectory)
    pub index: usize,
    /// Time (seconds)
    pub t: f64,
    /// Crank angle (radians, unwrapped)
    pub phi: f64,
    /// Fixed pivot, always the origin
    pub a: Point2<f64>,
    pub b: JointKinematics,
    /// Slider joint, always on y = 0
    pub c: Point2<f64>,
    /// Root of the slider quadratic used for `c`
    pub c_root: RootSelection,
}

impl FrameState {
    /// Measured |AB|.
    pub fn crank_length(&self) -> f64 {
        nalgebra::distance(&self.a, &self.b.position)
    }

    /// Measured |BC|.
    pub fn coupler_length(&self) -> f64 {
        nalgebra::distance(&self.b.position, &self.c)
    }
}

/// A degenerate root recorded while sampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameDiagnostic {
    pub index: usize,
    pub t: f64,
    pub root: DegenerateRoot,
}

/// Ordered frames of one sampling run.
#[derive(Clone, Debug)]
pub struct Trajectory {
    geometry: LinkageGeometry,
    options: SampleOptions,
    dt: f64,
    frames: Vec<FrameState>,
    diagnostics: Vec<FrameDiagnostic>,
}

impl Trajectory {
    pub(crate) fn new(
        geometry: LinkageGeometry,
        options: SampleOptions,
        dt: f64,
        frames: Vec<FrameState>,
        diagnostics: Vec<FrameDiagnostic>,
    ) -> Self {
        Self {
            geometry,
            options,
            dt,
            frames,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameState] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameState> {
        self.frames.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FrameState> {
        self.frames.get(index)
    }

    pub fn geometry(&self) -> &LinkageGeometry {
        &self.geometry
    }

    pub fn options(&self) -> &SampleOptions {
        &self.options
    }

    /// Sample spacing (seconds).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time covered by the configured revolutions (seconds).
    ///
    /// The last frame sits one `dt` short of this, so a looping renderer
    /// does not show the start pose twice.
    pub fn span(&self) -> f64 {
        self.dt * self.frames.len() as f64
    }

    /// First and last sample times.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((self.frames.first()?.t, self.frames.last()?.t))
    }

    /// Degenerate roots encountered, in frame order.
    pub fn diagnostics(&self) -> &[FrameDiagnostic] {
        &self.diagnostics
    }

    /// Wall-clock interval between frames for real-time playback.
    pub fn playback_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.dt).ok()
    }

    pub fn into_frames(self) -> Vec<FrameState> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a FrameState;
    type IntoIter = std::slice::Iter<'a, FrameState>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
