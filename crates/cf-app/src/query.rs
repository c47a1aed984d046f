//! Query helpers for extracting data from trajectories.

use std::fmt;
use std::str::FromStr;

use cf_sim::{FrameState, Trajectory};

use crate::error::{AppError, AppResult};

/// A scalar quantity that can be read off every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Phi,
    BX,
    BY,
    BVx,
    BVy,
    BAx,
    BAy,
    BSpeed,
    CX,
}

impl Variable {
    pub const ALL: [Variable; 9] = [
        Variable::Phi,
        Variable::BX,
        Variable::BY,
        Variable::BVx,
        Variable::BVy,
        Variable::BAx,
        Variable::BAy,
        Variable::BSpeed,
        Variable::CX,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::Phi => "phi",
            Variable::BX => "x_b",
            Variable::BY => "y_b",
            Variable::BVx => "v_x_b",
            Variable::BVy => "v_y_b",
            Variable::BAx => "a_x_b",
            Variable::BAy => "a_y_b",
            Variable::BSpeed => "speed_b",
            Variable::CX => "x_c",
        }
    }

    pub fn value(self, frame: &FrameState) -> f64 {
        match self {
            Variable::Phi => frame.phi,
            Variable::BX => frame.b.position.x,
            Variable::BY => frame.b.position.y,
            Variable::BVx => frame.b.velocity.x,
            Variable::BVy => frame.b.velocity.y,
            Variable::BAx => frame.b.acceleration.x,
            Variable::BAy => frame.b.acceleration.y,
            Variable::BSpeed => frame.b.velocity.norm(),
            Variable::CX => frame.c.x,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Variable::ALL.iter().map(|v| v.name()).collect();
                AppError::InvalidInput(format!(
                    "Unknown variable: {} (expected one of {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Summary of a trajectory's time range and motion extremes.
#[derive(Debug, Clone)]
pub struct TrajectorySummary {
    pub frame_count: usize,
    pub time_range: (f64, f64),
    pub dt: f64,
    /// Minimum and maximum slider position
    pub stroke: (f64, f64),
    pub peak_b_speed: f64,
    pub peak_b_acceleration: f64,
    pub degenerate_count: usize,
}

impl TrajectorySummary {
    pub fn stroke_length(&self) -> f64 {
        self.stroke.1 - self.stroke.0
    }
}

pub fn summarize(trajectory: &Trajectory) -> AppResult<TrajectorySummary> {
    let time_range = trajectory
        .time_range()
        .ok_or_else(|| AppError::InvalidInput("Trajectory has no frames".to_string()))?;

    let mut stroke = (f64::INFINITY, f64::NEG_INFINITY);
    let mut peak_b_speed = 0.0_f64;
    let mut peak_b_acceleration = 0.0_f64;
    for frame in trajectory {
        stroke.0 = stroke.0.min(frame.c.x);
        stroke.1 = stroke.1.max(frame.c.x);
        peak_b_speed = peak_b_speed.max(frame.b.velocity.norm());
        peak_b_acceleration = peak_b_acceleration.max(frame.b.acceleration.norm());
    }

    Ok(TrajectorySummary {
        frame_count: trajectory.len(),
        time_range,
        dt: trajectory.dt(),
        stroke,
        peak_b_speed,
        peak_b_acceleration,
        degenerate_count: trajectory.diagnostics().len(),
    })
}

/// Time series `(t, value)` for one variable.
pub fn extract_series(trajectory: &Trajectory, variable: Variable) -> Vec<(f64, f64)> {
    trajectory
        .iter()
        .map(|frame| (frame.t, variable.value(frame)))
        .collect()
}
