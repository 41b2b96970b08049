//! # Unit Types
//!
//! Type-safe wrappers for SI structural units. Lightweight `f64` newtypes
//! that serialize as plain numbers.
//!
//! ## Internal Units
//!
//! The section engine works in a consistent N / mm system so that no unit
//! factor ever appears inside the equilibrium equations:
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Force: newtons (N)
//! - Moment: newton-millimetres (N·mm)
//! - Stress / modulus: megapascals (MPa = N/mm²)
//!
//! Design values are usually quoted in kN and kN·m, so those convert in.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};
//!
//! let moment: NewtonMillimeters = KiloNewtonMeters(450.0).into();
//! assert_eq!(moment.0, 450.0e6);
//!
//! let force: KiloNewtons = Newtons(-50_000.0).into();
//! assert_eq!(force.0, -50.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMillimeters(pub f64);

impl SqMillimeters {
    /// Area of a round bar with the given diameter
    pub fn of_bar(diameter: Millimeters) -> Self {
        SqMillimeters(std::f64::consts::PI * diameter.0 * diameter.0 / 4.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(SqMillimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KiloNewtonMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilonewtons_to_newtons() {
        let n: Newtons = KiloNewtons(-50.0).into();
        assert_eq!(n.0, -50_000.0);
    }

    #[test]
    fn test_moment_conversion() {
        let nmm: NewtonMillimeters = KiloNewtonMeters(1.5).into();
        assert_eq!(nmm.0, 1.5e6);
        let back: KiloNewtonMeters = nmm.into();
        assert_eq!(back.0, 1.5);
    }

    #[test]
    fn test_bar_area() {
        // ⌀20 → 314.16 mm²
        let area = SqMillimeters::of_bar(Millimeters(20.0));
        assert!((area.0 - 314.159).abs() < 0.01);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(800.0);
        let b = Millimeters(60.0);
        assert_eq!((a - b).0, 740.0);
        assert_eq!((a + b).0, 860.0);
        assert_eq!((a / 2.0).0, 400.0);
        assert_eq!((b * 2.0).0, 120.0);
    }

    #[test]
    fn test_serialization() {
        let force = KiloNewtons(500.0);
        let json = serde_json::to_string(&force).unwrap();
        assert_eq!(json, "500.0");

        let roundtrip: KiloNewtons = serde_json::from_str(&json).unwrap();
        assert_eq!(force, roundtrip);
    }
}
