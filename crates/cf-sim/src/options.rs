//! Sampling options.

use std::f64::consts::TAU;

use cf_kinematics::{LinkageGeometry, SolverOptions};

use crate::error::{SimError, SimResult};

/// Upper bound on `frame_count`. Trajectories are materialized in memory, so
/// larger runs are rejected up front.
pub const MAX_FRAME_COUNT: usize = 10_000_000;

/// How `revolutions` maps to a time span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeBase {
    /// Span is `revolutions * 2π` seconds, independent of crank speed.
    #[default]
    Nominal,
    /// Span is `revolutions` crank periods, `revolutions * 2π / |w|` seconds.
    CrankPeriod,
}

/// Options for sampling runs.
#[derive(Clone, Copy, Debug)]
pub struct SampleOptions {
    /// Number of frames (must be positive)
    pub frame_count: usize,
    /// Revolutions covered by the run (must be positive)
    pub revolutions: f64,
    pub time_base: TimeBase,
    /// Slider constraint settings
    pub solver: SolverOptions,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            frame_count: 360,
            revolutions: 2.0,
            time_base: TimeBase::default(),
            solver: SolverOptions::default(),
        }
    }
}

impl SampleOptions {
    pub fn new(frame_count: usize, revolutions: f64) -> Self {
        Self {
            frame_count,
            revolutions,
            ..Self::default()
        }
    }

    pub fn with_time_base(mut self, time_base: TimeBase) -> Self {
        self.time_base = time_base;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.frame_count == 0 {
            return Err(SimError::InvalidArg {
                what: "frame_count must be positive",
            });
        }
        if self.frame_count > MAX_FRAME_COUNT {
            return Err(SimError::InvalidArg {
                what: "frame_count exceeds MAX_FRAME_COUNT",
            });
        }
        if !self.revolutions.is_finite() || self.revolutions <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "revolutions must be positive and finite",
            });
        }
        if !self.solver.tangent_tol.is_finite() || self.solver.tangent_tol < 0.0 {
            return Err(SimError::InvalidArg {
                what: "tangent_tol must be non-negative and finite",
            });
        }
        Ok(())
    }

    /// Total time covered by the run, in seconds.
    pub fn span(&self, geometry: &LinkageGeometry) -> f64 {
        match self.time_base {
            TimeBase::Nominal => self.revolutions * TAU,
            TimeBase::CrankPeriod => self.revolutions * geometry.period(),
        }
    }

    /// Spacing between consecutive samples, in seconds.
    pub fn dt(&self, geometry: &LinkageGeometry) -> f64 {
        self.span(geometry) / self.frame_count as f64
    }
}
