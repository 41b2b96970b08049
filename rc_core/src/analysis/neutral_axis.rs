//! Neutral axis solver
//!
//! Finds the depth `x_u` of the neutral axis below the compressed face by
//! secant iteration on the section equilibrium function
//!
//! ```text
//! f(x) = N·E_cm/(6b) · x²
//!      + (−E_cm·b·N·h/4 − s·M·E_cm·b/2) · x
//!      + Σ N·E_si·A_i·(d_i − h/2) − Σ s·M·E_si·A_i
//!      + ( Σ −N·E_si·A_i·(d_i − h/2)·d_i + Σ s·M·E_si·A_i·d_i ) / x
//! ```
//!
//! where `s` is the sign factor of the most strained side and `d_i` the
//! distance of bar `i` from the compressed face. The reciprocal term comes
//! from normalising the strain profile at the neutral axis, so `f` has no
//! closed-form root in general.
//!
//! The solver never fails for numerical reasons: a vanishing secant
//! denominator, non-convergence or an out-of-range iterate are absorbed and
//! the result falls back to a value in `[0, h]` (see [`NeutralAxisSolution`]).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::side::StrainedSide;
use crate::errors::CalcResult;
use crate::loads::LoadCase;
use crate::section::Section;

/// Maximum number of secant steps
pub const MAX_ITERATIONS: usize = 20;

/// Step size (mm) below which the iteration stops, and the bound on the
/// normalised residual a converged root must meet
pub const TOLERANCE: f64 = 1e-5;

/// Divisor used in place of a zero secant denominator.
///
/// This only keeps the iteration from dividing by zero; the resulting step
/// is meaningless and is caught by the range and residual checks.
pub const ZERO_DENOMINATOR_SUBSTITUTE: f64 = 1e-25;

/// Coefficients of the equilibrium function `f(x) = a·x² + b·x + c + r/x`.
///
/// The rebar sums depend only on the section and the loads, so they are
/// accumulated once and every evaluation is constant time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumFunction {
    /// Coefficient of x²
    pub quadratic: f64,
    /// Coefficient of x
    pub linear: f64,
    /// Constant term (rebar contributions)
    pub constant: f64,
    /// Coefficient of 1/x (rebar contributions)
    pub reciprocal: f64,
}

impl EquilibriumFunction {
    /// Accumulate the coefficients for one section and load case.
    ///
    /// `distances_mm[i]` is the distance of `section.rebars[i]` from the
    /// compressed face of `side`.
    pub fn new(section: &Section, loads: &LoadCase, side: StrainedSide, distances_mm: &[f64]) -> Self {
        let n = loads.axial_force();
        let m = loads.moment();
        let s = side.sign_factor();
        let b = section.width_mm;
        let h = section.height_mm;
        let e_cm = section.concrete.e_cm_mpa;
        let half = section.half_height_mm();

        let mut constant = 0.0;
        let mut reciprocal = 0.0;
        for (rebar, &d) in section.rebars.iter().zip(distances_mm) {
            let ea = rebar.axial_stiffness();
            constant += n * ea * (d - half) - s * m * ea;
            reciprocal += -n * ea * (d - half) * d + s * m * ea * d;
        }

        EquilibriumFunction {
            quadratic: n * e_cm / (6.0 * b),
            linear: -e_cm * b * n * h / 4.0 - s * m * 0.5 * e_cm * b,
            constant,
            reciprocal,
        }
    }

    /// Evaluate f(x_u)
    pub fn evaluate(&self, x_u: f64) -> f64 {
        self.quadratic * x_u * x_u + self.linear * x_u + self.constant + self.reciprocal / x_u
    }
}

/// Outcome of the neutral-axis iteration.
///
/// `x_u_mm` always lies in `[0, h]`. When `converged` is false the value is a
/// fallback: `h` for pure axial compression (whole section compressed) and
/// `0` otherwise, which callers must read as "no compression zone found"
/// rather than "neutral axis at the compressed face".
///
/// Pure compression means exactly `M = 0`: a non-converging case under heavy
/// compression with any non-zero moment falls back to `0`, not `h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxisSolution {
    /// Neutral axis depth below the compressed face (mm)
    pub x_u_mm: f64,
    /// Secant steps taken
    pub iterations: usize,
    /// Evaluations of the equilibrium function
    pub evaluations: usize,
    /// Step and residual criteria both met
    pub converged: bool,
    /// The fallback value replaced the last iterate
    pub clamped: bool,
    /// |f(x)| at the last in-range iterate, relative to the largest |f| seen
    pub residual: Option<f64>,
}

/// Secant solver for one section under one load case.
#[derive(Debug, Clone, PartialEq)]
pub struct NeutralAxisSolver {
    height_mm: f64,
    side: StrainedSide,
    distances_mm: Vec<f64>,
    equilibrium: EquilibriumFunction,
    pure_compression: bool,
}

impl NeutralAxisSolver {
    /// Prepare the solver: validates the inputs, selects the most strained
    /// side and tabulates every bar's distance from the compressed face.
    pub fn new(section: &Section, loads: &LoadCase) -> CalcResult<Self> {
        section.validate()?;
        loads.validate()?;

        let side = StrainedSide::from_moment(loads.moment());
        let distances_mm: Vec<f64> = section
            .rebars
            .iter()
            .map(|r| side.distance_from_compressed_face(r.y_mm, section.height_mm))
            .collect();
        let equilibrium = EquilibriumFunction::new(section, loads, side, &distances_mm);

        Ok(NeutralAxisSolver {
            height_mm: section.height_mm,
            side,
            distances_mm,
            equilibrium,
            pure_compression: loads.is_pure_compression(),
        })
    }

    /// Most strained side used by the solver
    pub fn side(&self) -> StrainedSide {
        self.side
    }

    /// Distance of each bar from the compressed face (mm), in rebar order
    pub fn distances_mm(&self) -> &[f64] {
        &self.distances_mm
    }

    /// The equilibrium function being solved
    pub fn equilibrium(&self) -> &EquilibriumFunction {
        &self.equilibrium
    }

    /// Run the secant iteration.
    pub fn solve(&self) -> NeutralAxisSolution {
        let h = self.height_mm;
        let mut evaluations = 0;

        let mut x0 = h / 2.0;
        let mut f0 = self.evaluate(x0, &mut evaluations);
        let mut scale = f0.abs();
        let mut x1 = if f0 < 0.0 { x0 - x0 / 2.0 } else { x0 + x0 / 2.0 };

        let mut iterations = 0;
        let mut step_converged = false;
        while iterations < MAX_ITERATIONS {
            if (x1 - x0).abs() < TOLERANCE {
                step_converged = true;
                break;
            }
            let f1 = self.evaluate(x1, &mut evaluations);
            scale = scale.max(f1.abs());

            let mut denominator = f1 - f0;
            if denominator.abs() < f64::EPSILON {
                warn!(x_u = x1, "secant denominator vanished, substituting a tiny divisor");
                denominator = ZERO_DENOMINATOR_SUBSTITUTE;
            }
            let x_next = x1 - f1 * (x1 - x0) / denominator;
            debug!(iteration = iterations, x_u = x1, residual = f1, next = x_next, "secant step");

            x0 = x1;
            f0 = f1;
            x1 = x_next.abs();
            iterations += 1;
        }
        step_converged = step_converged || (x1 - x0).abs() < TOLERANCE;

        let in_range = (0.0..=h).contains(&x1);
        // scale == 0 means f vanished at every sample (N = M = 0): no root to find
        let residual = if in_range && scale > 0.0 {
            let r = self.evaluate(x1, &mut evaluations).abs();
            Some(r / scale).filter(|v| v.is_finite())
        } else {
            None
        };
        let converged = step_converged && residual.is_some_and(|r| r <= TOLERANCE);

        let (x_u_mm, clamped) = if converged {
            (x1.max(0.0), false)
        } else {
            let fallback = if self.pure_compression { h } else { 0.0 };
            warn!(
                last_iterate = x1,
                iterations,
                in_range,
                fallback,
                "neutral axis iteration did not converge"
            );
            (fallback, true)
        };

        debug!(x_u = x_u_mm, iterations, evaluations, converged, "neutral axis solved");

        NeutralAxisSolution {
            x_u_mm,
            iterations,
            evaluations,
            converged,
            clamped,
            residual,
        }
    }

    fn evaluate(&self, x_u: f64, evaluations: &mut usize) -> f64 {
        *evaluations += 1;
        self.equilibrium.evaluate(x_u)
    }
}
