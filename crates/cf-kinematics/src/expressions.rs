//! Closed-form motion of the crank joint B.
//!
//! Every coordinate of B is a harmonic `c * cos(w t) + s * sin(w t)`. The
//! derivative of such a term is again harmonic, so velocity and acceleration
//! are derived exactly, once, when the model is built. Evaluation per sample
//! only needs one `sin_cos` of the crank angle.

use nalgebra::{Point2, Vector2};

use crate::geometry::LinkageGeometry;

/// Crank angle as a linear function of time: `phi(t) = w * t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrankAngle {
    pub omega: f64,
}

impl CrankAngle {
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.omega * t
    }
}

/// `cos_coeff * cos(omega t) + sin_coeff * sin(omega t)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Harmonic {
    pub cos_coeff: f64,
    pub sin_coeff: f64,
    pub omega: f64,
}

impl Harmonic {
    pub const fn cosine(amplitude: f64, omega: f64) -> Self {
        Self {
            cos_coeff: amplitude,
            sin_coeff: 0.0,
            omega,
        }
    }

    pub const fn sine(amplitude: f64, omega: f64) -> Self {
        Self {
            cos_coeff: 0.0,
            sin_coeff: amplitude,
            omega,
        }
    }

    /// Exact time derivative.
    ///
    /// d/dt [c cos(wt) + s sin(wt)] = (s w) cos(wt) + (-c w) sin(wt)
    pub fn derivative(self) -> Self {
        Self {
            cos_coeff: self.sin_coeff * self.omega,
            sin_coeff: -self.cos_coeff * self.omega,
            omega: self.omega,
        }
    }

    pub fn eval(&self, t: f64) -> f64 {
        let (sin_phi, cos_phi) = (self.omega * t).sin_cos();
        self.eval_at(sin_phi, cos_phi)
    }

    /// Evaluate with a precomputed `sin(omega t)` and `cos(omega t)`.
    #[inline]
    pub fn eval_at(&self, sin_phi: f64, cos_phi: f64) -> f64 {
        self.cos_coeff * cos_phi + self.sin_coeff * sin_phi
    }
}

/// A pair of harmonics describing a planar quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarHarmonic {
    pub x: Harmonic,
    pub y: Harmonic,
}

impl PlanarHarmonic {
    pub fn derivative(self) -> Self {
        Self {
            x: self.x.derivative(),
            y: self.y.derivative(),
        }
    }

    #[inline]
    pub fn eval_at(&self, sin_phi: f64, cos_phi: f64) -> Vector2<f64> {
        Vector2::new(
            self.x.eval_at(sin_phi, cos_phi),
            self.y.eval_at(sin_phi, cos_phi),
        )
    }
}

/// Position, velocity and acceleration of a joint at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointKinematics {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub acceleration: Vector2<f64>,
}

/// Motion of joint B, derived once from a [`LinkageGeometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrankModel {
    angle: CrankAngle,
    position: PlanarHarmonic,
    velocity: PlanarHarmonic,
    acceleration: PlanarHarmonic,
}

impl CrankModel {
    pub fn new(geometry: &LinkageGeometry) -> Self {
        let r = geometry.length_ab();
        let w = geometry.angular_speed();

        // B = r (cos phi, sin phi)
        let position = PlanarHarmonic {
            x: Harmonic::cosine(r, w),
            y: Harmonic::sine(r, w),
        };
        let velocity = position.derivative();
        let acceleration = velocity.derivative();

        Self {
            angle: CrankAngle { omega: w },
            position,
            velocity,
            acceleration,
        }
    }

    pub fn phi(&self, t: f64) -> f64 {
        self.angle.at(t)
    }

    pub fn position(&self, t: f64) -> Point2<f64> {
        let (s, c) = self.phi(t).sin_cos();
        Point2::from(self.position.eval_at(s, c))
    }

    pub fn velocity(&self, t: f64) -> Vector2<f64> {
        let (s, c) = self.phi(t).sin_cos();
        self.velocity.eval_at(s, c)
    }

    pub fn acceleration(&self, t: f64) -> Vector2<f64> {
        let (s, c) = self.phi(t).sin_cos();
        self.acceleration.eval_at(s, c)
    }

    /// Full state of B at `t`, sharing one trigonometric evaluation.
    pub fn joint_b(&self, t: f64) -> JointKinematics {
        let (s, c) = self.phi(t).sin_cos();
        JointKinematics {
            position: Point2::from(self.position.eval_at(s, c)),
            velocity: self.velocity.eval_at(s, c),
            acceleration: self.acceleration.eval_at(s, c),
        }
    }

    pub fn angle(&self) -> CrankAngle {
        self.angle
    }

    /// Derived expressions for position, velocity and acceleration.
    pub fn expressions(&self) -> [PlanarHarmonic; 3] {
        [self.position, self.velocity, self.acceleration]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn reference_model() -> CrankModel {
        CrankModel::new(&LinkageGeometry::new(0.5, 1.0, 0.5).unwrap())
    }

    #[test]
    fn harmonic_derivative_of_cosine_is_negative_sine() {
        let h = Harmonic::cosine(2.0, 3.0).derivative();
        assert_eq!(h.cos_coeff, 0.0);
        assert_eq!(h.sin_coeff, -6.0);
        assert_eq!(h.omega, 3.0);
    }

    #[test]
    fn harmonic_second_derivative_scales_by_minus_omega_squared() {
        let h = Harmonic::sine(1.5, 2.0);
        let h2 = h.derivative().derivative();
        for t in [0.0, 0.3, 1.7, -2.2] {
            assert!((h2.eval(t) + 4.0 * h.eval(t)).abs() < 1e-12);
        }
    }

    #[test]
    fn reference_state_at_zero() {
        let b = reference_model().joint_b(0.0);
        assert_eq!(b.position, Point2::new(0.5, 0.0));
        assert!(b.velocity.x.abs() < 1e-15);
        assert!((b.velocity.y - 0.25).abs() < 1e-15);
        assert!((b.acceleration.x + 0.125).abs() < 1e-15);
        assert!(b.acceleration.y.abs() < 1e-15);
    }

    #[test]
    fn reference_state_at_half_turn() {
        let model = reference_model();
        let t = 2.0 * PI;
        assert!((model.phi(t) - PI).abs() < 1e-15);
        let b = model.joint_b(t);
        assert!((b.position.x + 0.5).abs() < 1e-12);
        assert!(b.position.y.abs() < 1e-12);
        assert!((b.velocity.y + 0.25).abs() < 1e-12);
        assert!((b.acceleration.x - 0.125).abs() < 1e-12);
    }

    #[test]
    fn individual_accessors_match_joint_b() {
        let model = reference_model();
        let t = 1.234;
        let b = model.joint_b(t);
        assert_eq!(model.position(t), b.position);
        assert_eq!(model.velocity(t), b.velocity);
        assert_eq!(model.acceleration(t), b.acceleration);
    }

    #[test]
    fn expressions_are_chained_derivatives() {
        let [p, v, a] = reference_model().expressions();
        assert_eq!(p.derivative(), v);
        assert_eq!(v.derivative(), a);
    }
}
