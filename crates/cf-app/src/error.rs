//! Error types for the cf-app service layer.

use cf_sim::SimError;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI a single error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Study error: {0}")]
    Project(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<cf_project::ProjectError> for AppError {
    fn from(err: cf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<cf_project::ValidationError> for AppError {
    fn from(err: cf_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<cf_kinematics::KinematicsError> for AppError {
    fn from(err: cf_kinematics::KinematicsError) -> Self {
        AppError::Geometry(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Render(err.to_string())
    }
}
