//! Concrete material
//!
//! Only the short-term secant modulus enters the stress-strain analysis; the
//! characteristic strength is carried for reference and for deriving the
//! modulus when no measured value is available.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Lowest characteristic cylinder strength covered by EN 1992-1-1 (MPa)
pub const MIN_F_CK_MPA: f64 = 12.0;

/// Highest characteristic cylinder strength covered by EN 1992-1-1 (MPa)
pub const MAX_F_CK_MPA: f64 = 90.0;

/// Concrete material properties.
///
/// ## JSON Example
///
/// ```json
/// { "f_ck_mpa": 30.0, "e_cm_mpa": 32836.57 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Characteristic compressive cylinder strength f_ck (MPa)
    pub f_ck_mpa: f64,

    /// Secant modulus of elasticity E_cm (MPa)
    pub e_cm_mpa: f64,
}

impl ConcreteMaterial {
    /// Concrete with E_cm derived from f_ck.
    ///
    /// `E_cm = 22000 · (f_cm / 10)^0.3` with `f_cm = f_ck + 8` (EN 1992-1-1, Table 3.1).
    ///
    /// ```rust
    /// use rc_core::materials::ConcreteMaterial;
    ///
    /// let c30 = ConcreteMaterial::from_characteristic_strength(30.0);
    /// assert!((c30.e_cm_mpa - 32837.0).abs() < 1.0);
    /// ```
    pub fn from_characteristic_strength(f_ck_mpa: f64) -> Self {
        let f_cm_mpa = f_ck_mpa + 8.0;
        ConcreteMaterial {
            f_ck_mpa,
            e_cm_mpa: 22_000.0 * (f_cm_mpa / 10.0).powf(0.3),
        }
    }

    /// Concrete with a directly specified modulus (e.g. from testing).
    pub fn with_modulus(f_ck_mpa: f64, e_cm_mpa: f64) -> Self {
        ConcreteMaterial { f_ck_mpa, e_cm_mpa }
    }

    /// Parse a strength class such as `"C30/37"` or `"C30"`.
    pub fn from_grade(grade: &str) -> CalcResult<Self> {
        let trimmed = grade.trim();
        let digits = trimmed
            .strip_prefix('C')
            .or_else(|| trimmed.strip_prefix('c'))
            .ok_or_else(|| CalcError::material_not_found(grade))?;
        let cylinder = digits.split('/').next().unwrap_or_default();
        let f_ck_mpa: f64 = cylinder
            .trim()
            .parse()
            .map_err(|_| CalcError::material_not_found(grade))?;

        if !(MIN_F_CK_MPA..=MAX_F_CK_MPA).contains(&f_ck_mpa) {
            return Err(CalcError::invalid_input(
                "concrete_grade",
                grade,
                format!("f_ck must be between {} and {} MPa", MIN_F_CK_MPA, MAX_F_CK_MPA),
            ));
        }

        Ok(Self::from_characteristic_strength(f_ck_mpa))
    }

    /// Validate that the modulus is usable by the solver.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.e_cm_mpa.is_finite() || self.e_cm_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "e_cm_mpa",
                self.e_cm_mpa.to_string(),
                "Concrete modulus must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ConcreteMaterial {
    fn default() -> Self {
        Self::from_characteristic_strength(30.0)
    }
}

impl std::fmt::Display for ConcreteMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{:.0} (E_cm = {:.0} MPa)", self.f_ck_mpa, self.e_cm_mpa)
    }
}
