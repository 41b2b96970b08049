//! # Rectangular Reinforced Concrete Section
//!
//! The section is described relative to its centroid. Rebar ordinates `y`
//! are signed and measured positive towards the **lower** edge, so the lower
//! face sits at `y = +h/2` and the upper face at `y = -h/2`.
//!
//! ```text
//!        y = -h/2   ┌───────────────┐  upper edge
//!                   │  o   o   o    │  y < 0
//!        y = 0    ──┼───────────────┼── centroid
//!                   │  o   o   o    │  y > 0
//!        y = +h/2   └───────────────┘  lower edge
//!                   |<---- b ------>|
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rc_core::section::Section;
//! use rc_core::materials::{ConcreteMaterial, ReinforcingSteel};
//!
//! let section = Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
//!     .with_rebar_layer(5, 14.0, -340.0)
//!     .with_rebar_layer(4, 20.0, 340.0);
//!
//! assert_eq!(section.rebars.len(), 9);
//! assert!(section.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, Material, ReinforcingSteel};
use crate::units::{Millimeters, SqMillimeters};

/// A single reinforcing bar.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
///   "label": "bottom-1",
///   "y_mm": 340.0,
///   "area_mm2": 314.16,
///   "material": { "type": "ReinforcingSteel", "f_yk_mpa": 500.0, "e_s_mpa": 200000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rebar {
    /// Stable identity used to key per-rebar results
    pub id: Uuid,

    /// Optional user label
    #[serde(default)]
    pub label: String,

    /// Signed ordinate from the centroid, positive towards the lower edge (mm)
    pub y_mm: f64,

    /// Cross-sectional area (mm²)
    pub area_mm2: f64,

    /// Bar material
    pub material: Material,
}

impl Rebar {
    /// Create a rebar from its area
    pub fn new(y_mm: f64, area_mm2: f64, material: impl Into<Material>) -> Self {
        Rebar {
            id: Uuid::new_v4(),
            label: String::new(),
            y_mm,
            area_mm2,
            material: material.into(),
        }
    }

    /// Create a round bar from its diameter
    pub fn from_diameter(y_mm: f64, diameter_mm: f64, material: impl Into<Material>) -> Self {
        let area = SqMillimeters::of_bar(Millimeters(diameter_mm));
        Self::new(y_mm, area.value(), material)
    }

    /// Set the label (builder pattern)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Axial stiffness E_s · A (N)
    pub fn axial_stiffness(&self) -> f64 {
        self.material.elastic_modulus() * self.area_mm2
    }

    fn validate(&self, index: usize, height_mm: f64) -> CalcResult<()> {
        if !self.area_mm2.is_finite() || self.area_mm2 <= 0.0 {
            return Err(CalcError::invalid_input(
                format!("rebars[{}].area_mm2", index),
                self.area_mm2.to_string(),
                "Rebar area must be positive",
            ));
        }
        if !self.y_mm.is_finite() || self.y_mm.abs() > height_mm / 2.0 {
            return Err(CalcError::invalid_input(
                format!("rebars[{}].y_mm", index),
                self.y_mm.to_string(),
                format!("Rebar must lie within the section depth (|y| <= {})", height_mm / 2.0),
            ));
        }
        self.material.validate()
    }
}

/// Rectangular concrete section with its reinforcement.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_mm": 1000.0,
///   "height_mm": 800.0,
///   "concrete": { "f_ck_mpa": 30.0, "e_cm_mpa": 32836.57 },
///   "steel": { "f_yk_mpa": 500.0, "e_s_mpa": 200000.0 },
///   "rebars": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section width b (mm)
    pub width_mm: f64,

    /// Section height h (mm)
    pub height_mm: f64,

    /// Concrete material
    pub concrete: ConcreteMaterial,

    /// Generic reinforcing steel of the section (default material for new
    /// bar layers; its modulus also drives the cracked-section fallback)
    #[serde(default)]
    pub steel: ReinforcingSteel,

    /// Reinforcing bars, in input order
    #[serde(default)]
    pub rebars: Vec<Rebar>,
}

impl Section {
    /// Create an unreinforced section with B500 as its generic steel
    pub fn new(width_mm: f64, height_mm: f64, concrete: ConcreteMaterial) -> Self {
        Section {
            width_mm,
            height_mm,
            concrete,
            steel: ReinforcingSteel::b500(),
            rebars: Vec::new(),
        }
    }

    /// Replace the generic steel (builder pattern)
    pub fn with_steel(mut self, steel: ReinforcingSteel) -> Self {
        self.steel = steel;
        self
    }

    /// Add a single bar (builder pattern)
    pub fn with_rebar(mut self, rebar: Rebar) -> Self {
        self.rebars.push(rebar);
        self
    }

    /// Add `count` bars of one diameter at a common ordinate, using the
    /// section's generic steel.
    pub fn with_rebar_layer(mut self, count: usize, diameter_mm: f64, y_mm: f64) -> Self {
        let steel = self.steel;
        self.rebars
            .extend((0..count).map(|_| Rebar::from_diameter(y_mm, diameter_mm, steel)));
        self
    }

    /// Half the section height (distance from centroid to either face)
    pub fn half_height_mm(&self) -> f64 {
        self.height_mm / 2.0
    }

    /// Total reinforcement area (mm²)
    pub fn rebar_area_mm2(&self) -> f64 {
        self.rebars.iter().map(|r| r.area_mm2).sum()
    }

    /// Look up a rebar by id
    pub fn rebar(&self, id: Uuid) -> Option<&Rebar> {
        self.rebars.iter().find(|r| r.id == id)
    }

    /// Validate geometry and materials.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.width_mm.is_finite() || self.width_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "width_mm",
                self.width_mm.to_string(),
                "Width must be positive",
            ));
        }
        if !self.height_mm.is_finite() || self.height_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "height_mm",
                self.height_mm.to_string(),
                "Height must be positive",
            ));
        }
        self.concrete.validate()?;
        self.steel.validate()?;
        for (index, rebar) in self.rebars.iter().enumerate() {
            rebar.validate(index, self.height_mm)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_section() -> Section {
        Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
            .with_rebar_layer(5, 14.0, -340.0)
            .with_rebar_layer(4, 20.0, 340.0)
    }

    #[test]
    fn test_rebar_layers() {
        let section = test_section();
        assert_eq!(section.rebars.len(), 9);
        // 5⌀14 + 4⌀20 = 769.69 + 1256.64
        assert!((section.rebar_area_mm2() - 2026.33).abs() < 0.01);
        assert!(section.rebars.iter().all(|r| r.material.elastic_modulus() == 200_000.0));
    }

    #[test]
    fn test_rebar_ids_are_unique() {
        let section = test_section();
        let first = section.rebars[0].id;
        assert!(section.rebars[1..].iter().all(|r| r.id != first));
        assert_eq!(section.rebar(first).map(|r| r.y_mm), Some(-340.0));
    }

    #[test]
    fn test_invalid_height() {
        let mut section = test_section();
        section.height_mm = -800.0;
        assert_eq!(section.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rebar_outside_section() {
        let section = test_section().with_rebar(Rebar::from_diameter(420.0, 12.0, ReinforcingSteel::b500()));
        let err = section.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "rebars[9].y_mm"));
    }

    #[test]
    fn test_unreinforced_section_is_valid() {
        let section = Section::new(300.0, 500.0, ConcreteMaterial::default());
        assert!(section.validate().is_ok());
        assert_eq!(section.rebar_area_mm2(), 0.0);
    }

    #[test]
    fn test_serialization() {
        let section = test_section();
        let json = serde_json::to_string_pretty(&section).unwrap();
        let roundtrip: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(section.height_mm, roundtrip.height_mm);
        assert_eq!(section.rebars.len(), roundtrip.rebars.len());
        assert_eq!(section.rebars[4].id, roundtrip.rebars[4].id);
        assert!((section.rebars[4].area_mm2 - roundtrip.rebars[4].area_mm2).abs() < 1e-9);
    }
}
