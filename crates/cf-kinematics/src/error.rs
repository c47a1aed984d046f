//! Error types for kinematic evaluation.

use cf_core::CfError;
use thiserror::Error;

/// Errors raised while building or solving the linkage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(CfError),

    /// The coupler cannot bridge the vertical offset between B and the slider line.
    #[error(
        "Unreachable configuration: B = ({bx}, {by}) is farther than {length_bc} from the slider line"
    )]
    UnreachableConfiguration { bx: f64, by: f64, length_bc: f64 },

    #[error("Numeric error: {0}")]
    Numeric(#[from] CfError),
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;
