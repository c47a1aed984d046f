//! Shared application service layer for crankflow.
//!
//! This crate gives front ends one place to load studies, compile them into
//! solver inputs, run the sampler, query the resulting trajectory and hand it
//! to a renderer.

pub mod compile;
pub mod error;
pub mod query;
pub mod render;
pub mod run_service;

// Re-export key types for convenience
pub use compile::{StudyRuntime, compile_study};
pub use error::{AppError, AppResult};
pub use query::{TrajectorySummary, Variable, extract_series, summarize};
pub use render::{
    CsvRenderer, FrameRecord, JointRecord, JsonRenderer, PointRecord, Renderer, write_series_csv,
};
pub use run_service::{
    RunOptions, RunResponse, RunTimingSummary, load_and_run, run_study, run_study_with_progress,
};
