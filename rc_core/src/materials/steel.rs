//! Reinforcing steel
//!
//! Idealized bilinear elastic-perfectly-plastic behaviour: linear up to the
//! yield strain `f_yk / E_s`, then a horizontal yield plateau at `±f_yk`.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::ReinforcingSteel;
//!
//! let b500 = ReinforcingSteel::b500();
//! assert_eq!(b500.stress_from_strain(0.001), 200.0);
//! assert_eq!(b500.stress_from_strain(0.004), 500.0);
//! assert_eq!(b500.stress_from_strain(-0.004), -500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Modulus of elasticity of reinforcing steel per EN 1992-1-1 3.2.7(4) (MPa)
pub const DEFAULT_E_S_MPA: f64 = 200_000.0;

/// Reinforcing steel properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcingSteel {
    /// Characteristic yield strength f_yk (MPa)
    pub f_yk_mpa: f64,

    /// Modulus of elasticity E_s (MPa)
    pub e_s_mpa: f64,
}

impl ReinforcingSteel {
    /// Create a steel with the given yield strength and modulus
    pub fn new(f_yk_mpa: f64, e_s_mpa: f64) -> Self {
        ReinforcingSteel { f_yk_mpa, e_s_mpa }
    }

    /// B500 reinforcing steel (f_yk = 500 MPa, E_s = 200 GPa)
    pub fn b500() -> Self {
        Self::new(500.0, DEFAULT_E_S_MPA)
    }

    /// Strain at the onset of yielding, f_yk / E_s
    pub fn yield_strain(&self) -> f64 {
        self.f_yk_mpa / self.e_s_mpa
    }

    /// Design yield strength f_yd = f_yk / γ_s (MPa)
    pub fn design_yield_strength(&self, gamma_s: f64) -> f64 {
        self.f_yk_mpa / gamma_s
    }

    /// Stress (MPa) for a given strain under the bilinear law.
    ///
    /// Within the elastic range the stress is `strain · E_s`; beyond the
    /// yield strain it is clamped to `sign(strain) · f_yk`.
    pub fn stress_from_strain(&self, strain: f64) -> f64 {
        if strain.abs() <= self.yield_strain() {
            strain * self.e_s_mpa
        } else {
            strain.signum() * self.f_yk_mpa
        }
    }

    /// True when the strain lies on the yield plateau
    pub fn is_yielded(&self, strain: f64) -> bool {
        strain.abs() > self.yield_strain()
    }

    /// Validate that the properties describe a usable steel.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.e_s_mpa.is_finite() || self.e_s_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "e_s_mpa",
                self.e_s_mpa.to_string(),
                "Steel modulus must be positive",
            ));
        }
        if !self.f_yk_mpa.is_finite() || self.f_yk_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "f_yk_mpa",
                self.f_yk_mpa.to_string(),
                "Yield strength must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ReinforcingSteel {
    fn default() -> Self {
        Self::b500()
    }
}

impl std::fmt::Display for ReinforcingSteel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B{:.0} (E_s = {:.0} MPa)", self.f_yk_mpa, self.e_s_mpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_strain() {
        assert_eq!(ReinforcingSteel::b500().yield_strain(), 0.0025);
    }

    #[test]
    fn test_elastic_branch() {
        let steel = ReinforcingSteel::b500();
        assert_eq!(steel.stress_from_strain(0.001), 200.0);
        assert_eq!(steel.stress_from_strain(-0.001), -200.0);
        assert_eq!(steel.stress_from_strain(0.0), 0.0);
        assert!(!steel.is_yielded(0.001));
    }

    #[test]
    fn test_yield_plateau() {
        let steel = ReinforcingSteel::b500();
        assert_eq!(steel.stress_from_strain(0.004), 500.0);
        assert_eq!(steel.stress_from_strain(-0.01), -500.0);
        assert!(steel.is_yielded(0.004));
    }

    #[test]
    fn test_yield_strain_is_elastic() {
        // Exactly at f_yk/E_s the elastic branch still applies
        let steel = ReinforcingSteel::b500();
        assert_eq!(steel.stress_from_strain(0.0025), 500.0);
        assert!(!steel.is_yielded(0.0025));
    }

    #[test]
    fn test_design_yield_strength() {
        let steel = ReinforcingSteel::b500();
        assert!((steel.design_yield_strength(1.15) - 434.78).abs() < 0.01);
    }

    #[test]
    fn test_validate() {
        assert!(ReinforcingSteel::b500().validate().is_ok());
        assert!(ReinforcingSteel::new(500.0, -1.0).validate().is_err());
        assert!(ReinforcingSteel::new(0.0, 200_000.0).validate().is_err());
    }
}
