//! # Materials
//!
//! Material definitions for reinforced concrete sections.
//!
//! - [`ConcreteMaterial`] - secant modulus E_cm (and the f_ck it derives from)
//! - [`ReinforcingSteel`] - yield strength f_yk, modulus E_s and the bilinear law
//! - [`Material`] - tagged union used for rebar materials
//!
//! Strength-class tables, exposure classes and covers are not part of this
//! crate; callers supply the numbers.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{Material, ReinforcingSteel};
//!
//! let rebar_material = Material::ReinforcingSteel(ReinforcingSteel::b500());
//! assert_eq!(rebar_material.elastic_modulus(), 200_000.0);
//! assert!(rebar_material.as_reinforcing_steel("rebar").is_ok());
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::ConcreteMaterial;
pub use steel::{ReinforcingSteel, DEFAULT_E_S_MPA};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Unified material enum for rebar materials.
///
/// ## JSON Serialization
///
/// ```json
/// { "type": "ReinforcingSteel", "f_yk_mpa": 500.0, "e_s_mpa": 200000.0 }
/// { "type": "Concrete", "f_ck_mpa": 30.0, "e_cm_mpa": 32837.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    /// Plain concrete (e.g. a dowel modelled as a concrete insert)
    Concrete(ConcreteMaterial),
    /// Reinforcing steel bar
    ReinforcingSteel(ReinforcingSteel),
}

impl Material {
    /// Elastic modulus (MPa) regardless of material kind
    pub fn elastic_modulus(&self) -> f64 {
        match self {
            Material::Concrete(c) => c.e_cm_mpa,
            Material::ReinforcingSteel(s) => s.e_s_mpa,
        }
    }

    /// Borrow the steel properties, or fail when the material is not steel.
    ///
    /// `field` names the offending input in the returned error.
    pub fn as_reinforcing_steel(&self, field: &str) -> CalcResult<&ReinforcingSteel> {
        match self {
            Material::ReinforcingSteel(s) => Ok(s),
            other => Err(CalcError::material_mismatch(
                field,
                "reinforcing steel",
                other.kind(),
            )),
        }
    }

    /// Short name of the material kind
    pub fn kind(&self) -> &'static str {
        match self {
            Material::Concrete(_) => "concrete",
            Material::ReinforcingSteel(_) => "reinforcing steel",
        }
    }

    /// Validate the wrapped material
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            Material::Concrete(c) => c.validate(),
            Material::ReinforcingSteel(s) => s.validate(),
        }
    }
}

impl From<ReinforcingSteel> for Material {
    fn from(steel: ReinforcingSteel) -> Self {
        Material::ReinforcingSteel(steel)
    }
}

impl From<ConcreteMaterial> for Material {
    fn from(concrete: ConcreteMaterial) -> Self {
        Material::Concrete(concrete)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Concrete(c) => write!(f, "{}", c),
            Material::ReinforcingSteel(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_serialization() {
        let mat = Material::ReinforcingSteel(ReinforcingSteel::b500());
        let json = serde_json::to_string(&mat).unwrap();
        assert!(json.contains("\"type\":\"ReinforcingSteel\""));

        let roundtrip: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, roundtrip);
    }

    #[test]
    fn test_non_steel_rejected() {
        let mat = Material::Concrete(ConcreteMaterial::default());
        let err = mat.as_reinforcing_steel("rebars[0]").unwrap_err();
        assert_eq!(
            err,
            CalcError::material_mismatch("rebars[0]", "reinforcing steel", "concrete")
        );
    }

    #[test]
    fn test_elastic_modulus() {
        let concrete: Material = ConcreteMaterial::with_modulus(30.0, 33_000.0).into();
        assert_eq!(concrete.elastic_modulus(), 33_000.0);
    }
}
