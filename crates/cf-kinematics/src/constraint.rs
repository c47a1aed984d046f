//! Slider position from the coupler length constraint.
//!
//! With C on the line `y = 0`, the constraint
//! `(Bx - xc)^2 + By^2 = L^2` is the quadratic
//! `xc^2 - 2 Bx xc + (Bx^2 + By^2 - L^2) = 0`
//! whose discriminant reduces to `D = 4 (L^2 - By^2)`.

use cf_core::ensure_finite;
use nalgebra::Point2;

use crate::error::{KinematicsError, KinematicsResult};
use crate::geometry::LinkageGeometry;

/// Solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
    /// Discriminants with `|D| <= tangent_tol * 4 L^2` are treated as zero.
    pub tangent_tol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { tangent_tol: 1e-12 }
    }
}

/// Which root of the slider quadratic was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootSelection {
    /// The root strictly ahead of B along +x.
    Forward,
    /// No root lies ahead of B (tangent case); the larger root was used.
    Tangent,
}

/// Explicit coefficients of the slider quadratic for one position of B.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderQuadratic {
    pub bx: f64,
    pub by: f64,
    pub length_bc: f64,
}

impl SliderQuadratic {
    /// `[a, b, c]` of `a xc^2 + b xc + c = 0`.
    pub fn coefficients(&self) -> [f64; 3] {
        let Self { bx, by, length_bc } = *self;
        [1.0, -2.0 * bx, bx * bx + by * by - length_bc * length_bc]
    }

    /// `b^2 - 4ac`, in the cancellation-free form `4 (L^2 - By^2)`.
    pub fn discriminant(&self) -> f64 {
        4.0 * (self.length_bc * self.length_bc - self.by * self.by)
    }

    pub fn residual(&self, xc: f64) -> f64 {
        let [a, b, c] = self.coefficients();
        (a * xc + b) * xc + c
    }
}

/// Non-fatal note that a sample landed on the tangent case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateRoot {
    pub bx: f64,
    pub by: f64,
    pub discriminant: f64,
    pub xc: f64,
}

/// Solved slider position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSolution {
    /// C, always on `y = 0`.
    pub position: Point2<f64>,
    pub root: RootSelection,
    /// Discriminant after tangent snapping (never negative).
    pub discriminant: f64,
    /// The root that was not chosen.
    pub alternate_root: f64,
}

impl SliderSolution {
    pub fn is_degenerate(&self) -> bool {
        self.root == RootSelection::Tangent
    }

    /// Warning payload when the tangent fallback was used.
    pub fn degenerate(&self, b: &Point2<f64>) -> Option<DegenerateRoot> {
        self.is_degenerate().then_some(DegenerateRoot {
            bx: b.x,
            by: b.y,
            discriminant: self.discriminant,
            xc: self.position.x,
        })
    }
}

/// Solves for C given B.
#[derive(Clone, Copy, Debug)]
pub struct SliderSolver {
    length_bc: f64,
    options: SolverOptions,
}

impl SliderSolver {
    pub fn new(geometry: &LinkageGeometry) -> Self {
        Self::with_options(geometry, SolverOptions::default())
    }

    pub fn with_options(geometry: &LinkageGeometry, options: SolverOptions) -> Self {
        Self {
            length_bc: geometry.length_bc(),
            options,
        }
    }

    pub fn length_bc(&self) -> f64 {
        self.length_bc
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Position of C for joint B at `b`.
    ///
    /// Picks the root strictly greater than `b.x`; if there is none the
    /// larger root is used and the solution is marked [`RootSelection::Tangent`].
    pub fn solve(&self, b: &Point2<f64>) -> KinematicsResult<SliderSolution> {
        let bx = ensure_finite(b.x, "B.x")?;
        let by = ensure_finite(b.y, "B.y")?;

        let quadratic = SliderQuadratic {
            bx,
            by,
            length_bc: self.length_bc,
        };
        let raw = quadratic.discriminant();
        let snap = self.options.tangent_tol * 4.0 * self.length_bc * self.length_bc;

        let discriminant = if raw.abs() <= snap {
            0.0
        } else if raw < 0.0 {
            return Err(KinematicsError::UnreachableConfiguration {
                bx,
                by,
                length_bc: self.length_bc,
            });
        } else {
            raw
        };

        let half_width = 0.5 * discriminant.sqrt();
        let roots = [bx + half_width, bx - half_width];

        let (xc, alternate_root, root) = match roots.iter().position(|&r| r > bx) {
            Some(i) => (roots[i], roots[1 - i], RootSelection::Forward),
            None => {
                let (hi, lo) = if roots[0] >= roots[1] {
                    (roots[0], roots[1])
                } else {
                    (roots[1], roots[0])
                };
                (hi, lo, RootSelection::Tangent)
            }
        };

        Ok(SliderSolution {
            position: Point2::new(xc, 0.0),
            root,
            discriminant,
            alternate_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver(length_bc: f64) -> SliderSolver {
        SliderSolver::new(&LinkageGeometry::new(0.5, length_bc, 0.5).unwrap())
    }

    #[test]
    fn reference_root_at_zero() {
        let sol = solver(1.0).solve(&Point2::new(0.5, 0.0)).unwrap();
        assert_eq!(sol.position, Point2::new(1.5, 0.0));
        assert_eq!(sol.alternate_root, -0.5);
        assert_eq!(sol.root, RootSelection::Forward);
        assert_eq!(sol.discriminant, 4.0);
        assert!(!sol.is_degenerate());
    }

    #[test]
    fn chosen_root_satisfies_quadratic() {
        let b = Point2::new(-0.3, 0.4);
        let sol = solver(1.0).solve(&b).unwrap();
        let quadratic = SliderQuadratic {
            bx: b.x,
            by: b.y,
            length_bc: 1.0,
        };
        assert!(quadratic.residual(sol.position.x).abs() < 1e-12);
        assert!(quadratic.residual(sol.alternate_root).abs() < 1e-12);
        assert!(sol.position.x > b.x);
        assert_eq!(sol.position.y, 0.0);
    }

    #[test]
    fn discriminant_matches_general_form() {
        let q = SliderQuadratic {
            bx: 0.2,
            by: 0.3,
            length_bc: 0.9,
        };
        let [a, b, c] = q.coefficients();
        assert!((q.discriminant() - (b * b - 4.0 * a * c)).abs() < 1e-12);
    }

    #[test]
    fn unreachable_when_offset_exceeds_coupler() {
        let err = solver(0.4).solve(&Point2::new(0.0, 0.5)).unwrap_err();
        assert_eq!(
            err,
            KinematicsError::UnreachableConfiguration {
                bx: 0.0,
                by: 0.5,
                length_bc: 0.4
            }
        );
    }

    #[test]
    fn tangent_case_uses_larger_root_and_flags_it() {
        let b = Point2::new(0.0, 0.5);
        let sol = solver(0.5).solve(&b).unwrap();
        assert_eq!(sol.root, RootSelection::Tangent);
        assert_eq!(sol.position, Point2::new(0.0, 0.0));
        assert_eq!(sol.discriminant, 0.0);

        let warning = sol.degenerate(&b).unwrap();
        assert_eq!(warning.bx, 0.0);
        assert_eq!(warning.by, 0.5);
        assert_eq!(warning.xc, 0.0);
    }

    #[test]
    fn round_off_below_tangent_is_snapped() {
        let b = Point2::new(0.1, 0.5 * (1.0 + 1e-15));
        let sol = solver(0.5).solve(&b).unwrap();
        assert!(sol.is_degenerate());
        assert_eq!(sol.position.x, 0.1);
    }

    #[test]
    fn solve_is_deterministic() {
        let s = solver(1.0);
        let b = Point2::new(0.123, -0.456);
        assert_eq!(s.solve(&b).unwrap(), s.solve(&b).unwrap());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = solver(1.0).solve(&Point2::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, KinematicsError::Numeric(_)));
    }
}
