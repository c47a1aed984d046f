//! Closed-form kinematics of a slider-crank linkage.
//!
//! Joint A is pinned at the origin, the crank A-B turns at constant angular
//! speed and joint C slides along the line `y = 0`, held at a fixed distance
//! from B by the coupler B-C. This crate provides:
//! - [`LinkageGeometry`]: validated link lengths and crank speed
//! - [`CrankModel`]: B's position, velocity and acceleration as exact
//!   functions of time, derived once from the geometry
//! - [`SliderSolver`]: the position constraint for C, solved as a quadratic
//!   with a deterministic root choice

pub mod constraint;
pub mod error;
pub mod expressions;
pub mod geometry;

pub use constraint::{
    DegenerateRoot, RootSelection, SliderQuadratic, SliderSolution, SliderSolver, SolverOptions,
};
pub use error::{KinematicsError, KinematicsResult};
pub use expressions::{CrankAngle, CrankModel, Harmonic, JointKinematics, PlanarHarmonic};
pub use geometry::LinkageGeometry;

pub use nalgebra::{Point2, Vector2};
