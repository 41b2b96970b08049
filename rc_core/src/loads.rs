//! # Load Cases and Design Situations
//!
//! A [`LoadCase`] carries the internal forces acting on the section:
//!
//! - **Axial force N** (N): negative = compression, positive = tension
//! - **Bending moment M** (N·mm): positive compresses the lower edge
//!   (the `+y` side of the section)
//!
//! Either value may be omitted (it is then treated as zero) but not both.
//!
//! The [`DesignSituation`] selects the partial safety factors γ_s / γ_c per
//! EN 1992-1-1 Table 2.1N unless they are overridden on the case.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::loads::{DesignSituation, LoadCase};
//!
//! let case = LoadCase::new("ULS-1")
//!     .with_axial_force(50_000.0)
//!     .with_moment(450.0e6);
//! assert!(case.validate().is_ok());
//!
//! let factors = case.safety_factors();
//! assert_eq!(factors.gamma_s, 1.15);
//! assert_eq!(factors.gamma_c, 1.5);
//!
//! let accidental = case.with_design_situation(DesignSituation::Extraordinary);
//! assert_eq!(accidental.safety_factors().gamma_c, 1.2);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};

/// Design situation per EN 1990, selecting the partial safety factors.
///
/// Serialized as its [`code`](DesignSituation::code); deserialization goes
/// through [`FromStr`], so the aliases are accepted in files too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DesignSituation {
    /// Persistent design situation
    #[default]
    Permanent,
    /// Transient design situation
    Temporary,
    /// Accidental design situation
    Extraordinary,
}

impl DesignSituation {
    /// Default partial safety factors for this situation
    pub fn partial_safety_factors(&self) -> PartialSafetyFactors {
        match self {
            DesignSituation::Permanent | DesignSituation::Temporary => PartialSafetyFactors {
                gamma_s: 1.15,
                gamma_c: 1.5,
            },
            DesignSituation::Extraordinary => PartialSafetyFactors {
                gamma_s: 1.0,
                gamma_c: 1.2,
            },
        }
    }

    /// Short code used in files and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            DesignSituation::Permanent => "permanent",
            DesignSituation::Temporary => "temporary",
            DesignSituation::Extraordinary => "extraordinary",
        }
    }
}

impl FromStr for DesignSituation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permanent" | "persistent" => Ok(DesignSituation::Permanent),
            "temporary" | "transient" => Ok(DesignSituation::Temporary),
            "extraordinary" | "accidental" => Ok(DesignSituation::Extraordinary),
            _ => Err(CalcError::invalid_input(
                "design_situation",
                s,
                "Expected one of: permanent, temporary, extraordinary",
            )),
        }
    }
}

impl TryFrom<String> for DesignSituation {
    type Error = CalcError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DesignSituation> for String {
    fn from(situation: DesignSituation) -> Self {
        situation.code().to_string()
    }
}

impl std::fmt::Display for DesignSituation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Partial safety factors for steel (γ_s) and concrete (γ_c)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialSafetyFactors {
    /// Reinforcing steel factor γ_s
    pub gamma_s: f64,
    /// Concrete factor γ_c
    pub gamma_c: f64,
}

/// Internal forces acting on the section for one analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "ULS-1",
///   "axial_force_n": 50000.0,
///   "moment_nmm": 450000000.0,
///   "design_situation": "permanent"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadCase {
    /// User label for this case
    #[serde(default)]
    pub label: String,

    /// Axial force N (N), negative = compression
    #[serde(default)]
    pub axial_force_n: Option<f64>,

    /// Bending moment M (N·mm), positive compresses the lower edge
    #[serde(default)]
    pub moment_nmm: Option<f64>,

    /// Design situation (selects default γ_s / γ_c)
    #[serde(default)]
    pub design_situation: DesignSituation,

    /// Override for γ_s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_s: Option<f64>,

    /// Override for γ_c
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_c: Option<f64>,
}

impl LoadCase {
    /// Create an empty load case; set N and/or M before analysing it.
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            ..LoadCase::default()
        }
    }

    /// Build a case from design values quoted in kN and kN·m.
    pub fn from_design_values(label: impl Into<String>, axial: KiloNewtons, moment: KiloNewtonMeters) -> Self {
        let n: Newtons = axial.into();
        let m: NewtonMillimeters = moment.into();
        LoadCase::new(label)
            .with_axial_force(n.value())
            .with_moment(m.value())
    }

    /// Set the axial force in N (builder pattern)
    pub fn with_axial_force(mut self, axial_force_n: f64) -> Self {
        self.axial_force_n = Some(axial_force_n);
        self
    }

    /// Set the bending moment in N·mm (builder pattern)
    pub fn with_moment(mut self, moment_nmm: f64) -> Self {
        self.moment_nmm = Some(moment_nmm);
        self
    }

    /// Set the design situation (builder pattern)
    pub fn with_design_situation(mut self, design_situation: DesignSituation) -> Self {
        self.design_situation = design_situation;
        self
    }

    /// Override the partial safety factors (builder pattern)
    pub fn with_safety_factors(mut self, gamma_s: f64, gamma_c: f64) -> Self {
        self.gamma_s = Some(gamma_s);
        self.gamma_c = Some(gamma_c);
        self
    }

    /// Axial force N, zero when omitted
    pub fn axial_force(&self) -> f64 {
        self.axial_force_n.unwrap_or(0.0)
    }

    /// Bending moment M, zero when omitted
    pub fn moment(&self) -> f64 {
        self.moment_nmm.unwrap_or(0.0)
    }

    /// Pure axial compression: no bending and N < 0
    pub fn is_pure_compression(&self) -> bool {
        self.moment() == 0.0 && self.axial_force() < 0.0
    }

    /// Effective partial safety factors (overrides win over the situation defaults)
    pub fn safety_factors(&self) -> PartialSafetyFactors {
        let defaults = self.design_situation.partial_safety_factors();
        PartialSafetyFactors {
            gamma_s: self.gamma_s.unwrap_or(defaults.gamma_s),
            gamma_c: self.gamma_c.unwrap_or(defaults.gamma_c),
        }
    }

    /// Validate the load case.
    ///
    /// At least one of N and M must be given, and every given value must be finite.
    pub fn validate(&self) -> CalcResult<()> {
        if self.axial_force_n.is_none() && self.moment_nmm.is_none() {
            return Err(CalcError::missing_field("axial_force_n or moment_nmm"));
        }
        for (field, value) in [("axial_force_n", self.axial_force_n), ("moment_nmm", self.moment_nmm)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Must be a finite number"));
                }
            }
        }
        for (field, value) in [("gamma_s", self.gamma_s), ("gamma_c", self.gamma_c)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Safety factor must be positive"));
                }
            }
        }
        Ok(())
    }
}
