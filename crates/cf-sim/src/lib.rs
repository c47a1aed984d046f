//! Frame sampling for slider-crank motion studies.
//!
//! Provides:
//! - Fixed-count time sampling over whole crank revolutions
//! - Per-frame evaluation of the crank expressions and slider constraint
//! - Ordered, immutable trajectories with degenerate-root diagnostics
//! - Sequential or rayon-parallel runs with cooperative cancellation

pub mod cancel;
pub mod error;
pub mod options;
pub mod sampler;
pub mod trajectory;

// Re-exports for public API
pub use cancel::{CancelToken, SampleProgress};
pub use error::{SimError, SimResult};
pub use options::{MAX_FRAME_COUNT, SampleOptions, TimeBase};
pub use sampler::{FrameSampler, Frames};
pub use trajectory::{FrameDiagnostic, FrameState, Trajectory};
