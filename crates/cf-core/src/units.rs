// cf-core/src/units.rs

use uom::si::f64::{AngularVelocity as UomAngularVelocity, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

/// Raw SI magnitudes, for the numeric kernels that work on plain `f64`.
pub mod raw {
    use super::*;

    #[inline]
    pub fn meters(v: Length) -> f64 {
        use uom::si::length::meter;
        v.get::<meter>()
    }

    #[inline]
    pub fn radians_per_second(v: AngularVelocity) -> f64 {
        use uom::si::angular_velocity::radian_per_second;
        v.get::<radian_per_second>()
    }
}
