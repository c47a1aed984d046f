//! Error types for sampling runs.

use cf_kinematics::KinematicsError;
use thiserror::Error;

/// Errors encountered while building a trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Frame index out of bounds (index={index}, len={len})")]
    IndexOob { index: usize, len: usize },

    #[error("Frame {index} at t = {t} s failed: {source}")]
    Frame {
        index: usize,
        t: f64,
        #[source]
        source: KinematicsError,
    },

    #[error("Sampling cancelled after {completed} of {total} frames")]
    Cancelled { completed: usize, total: usize },
}

impl SimError {
    /// True when a frame failed because the coupler could not reach the slider line.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            SimError::Frame {
                source: KinematicsError::UnreachableConfiguration { .. },
                ..
            }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
