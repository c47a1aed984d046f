//! Link lengths and crank speed.

use std::f64::consts::TAU;

use cf_core::units::{AngularVelocity, Length, raw};
use cf_core::{ensure_nonzero, ensure_positive};
use tracing::debug;

use crate::error::{KinematicsError, KinematicsResult};

/// Immutable slider-crank configuration.
///
/// Lengths are in meters, the crank speed in radians per second. A negative
/// speed turns the crank clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkageGeometry {
    length_ab: f64,
    length_bc: f64,
    angular_speed: f64,
}

impl LinkageGeometry {
    /// Validate and build a geometry from raw SI values.
    pub fn new(length_ab: f64, length_bc: f64, angular_speed: f64) -> KinematicsResult<Self> {
        let length_ab =
            ensure_positive(length_ab, "length_ab").map_err(KinematicsError::InvalidGeometry)?;
        let length_bc =
            ensure_positive(length_bc, "length_bc").map_err(KinematicsError::InvalidGeometry)?;
        let angular_speed = ensure_nonzero(angular_speed, "angular_speed")
            .map_err(KinematicsError::InvalidGeometry)?;

        let geometry = Self {
            length_ab,
            length_bc,
            angular_speed,
        };
        if !geometry.always_reachable() {
            debug!(
                length_ab,
                length_bc, "coupler shorter than crank; some crank angles cannot be reached"
            );
        }
        Ok(geometry)
    }

    /// Build a geometry from unit-carrying quantities.
    pub fn from_quantities(
        length_ab: Length,
        length_bc: Length,
        angular_speed: AngularVelocity,
    ) -> KinematicsResult<Self> {
        Self::new(
            raw::meters(length_ab),
            raw::meters(length_bc),
            raw::radians_per_second(angular_speed),
        )
    }

    pub fn length_ab(&self) -> f64 {
        self.length_ab
    }

    pub fn length_bc(&self) -> f64 {
        self.length_bc
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    /// Time for one full crank turn, in seconds.
    pub fn period(&self) -> f64 {
        TAU / self.angular_speed.abs()
    }

    /// True when the coupler reaches the slider line at every crank angle.
    ///
    /// |B.y| never exceeds the crank length, so a coupler at least as long as
    /// the crank always bridges the offset.
    pub fn always_reachable(&self) -> bool {
        self.length_bc >= self.length_ab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::CfError;
    use cf_core::units::{m, rad_per_s, rpm};

    #[test]
    fn accepts_reference_geometry() {
        let g = LinkageGeometry::new(0.5, 1.0, 0.5).unwrap();
        assert_eq!(g.length_ab(), 0.5);
        assert_eq!(g.length_bc(), 1.0);
        assert_eq!(g.angular_speed(), 0.5);
        assert!(g.always_reachable());
        assert!((g.period() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let err = LinkageGeometry::new(0.0, 1.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            KinematicsError::InvalidGeometry(CfError::OutOfRange {
                what: "length_ab",
                value: 0.0
            })
        );
        assert!(matches!(
            LinkageGeometry::new(0.5, -1.0, 1.0),
            Err(KinematicsError::InvalidGeometry(_))
        ));
        assert!(matches!(
            LinkageGeometry::new(f64::NAN, 1.0, 1.0),
            Err(KinematicsError::InvalidGeometry(CfError::NonFinite { .. }))
        ));
    }

    #[test]
    fn rejects_zero_speed() {
        assert!(matches!(
            LinkageGeometry::new(0.5, 1.0, 0.0),
            Err(KinematicsError::InvalidGeometry(CfError::OutOfRange {
                what: "angular_speed",
                ..
            }))
        ));
    }

    #[test]
    fn negative_speed_is_valid() {
        let g = LinkageGeometry::new(0.5, 1.0, -2.0).unwrap();
        assert!((g.period() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn short_coupler_is_flagged() {
        let g = LinkageGeometry::new(0.5, 0.4, 1.0).unwrap();
        assert!(!g.always_reachable());
    }

    #[test]
    fn from_quantities_converts_rpm() {
        let g = LinkageGeometry::from_quantities(m(0.5), m(1.0), rpm(30.0)).unwrap();
        assert!((g.angular_speed() - std::f64::consts::PI).abs() < 1e-12);

        let g = LinkageGeometry::from_quantities(m(0.5), m(1.0), rad_per_s(0.5)).unwrap();
        assert_eq!(g.angular_speed(), 0.5);
    }
}
