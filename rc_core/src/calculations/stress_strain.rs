//! # Section Stress-Strain Calculation
//!
//! JSON-friendly wrapper around [`StrainState`]: one input
//! (section + load case) in, one flat serializable result out.
//!
//! ## Assumptions
//!
//! - Rectangular section, plane sections remain plane
//! - Linear-elastic concrete in compression with a triangular stress block,
//!   no tensile strength
//! - Bilinear elastic-perfectly-plastic reinforcing steel
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::stress_strain::{calculate, StressStrainInput};
//! use rc_core::loads::LoadCase;
//! use rc_core::materials::ConcreteMaterial;
//! use rc_core::section::Section;
//!
//! let input = StressStrainInput {
//!     label: "Wall W-1".to_string(),
//!     section: Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
//!         .with_rebar_layer(5, 14.0, -340.0)
//!         .with_rebar_layer(4, 20.0, 340.0),
//!     loads: LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.compression_zone_found);
//! assert_eq!(result.rebars.len(), 9);
//! println!("x_u = {:.1} mm, sigma_c = {:.2} MPa", result.x_u_mm, result.concrete_stress_mpa);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::{NeutralAxisSolution, RebarState, StrainState, StrainedSide};
use crate::errors::CalcResult;
use crate::loads::LoadCase;
use crate::section::Section;

/// Input for one section analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Wall W-1",
///   "section": {
///     "width_mm": 1000.0,
///     "height_mm": 800.0,
///     "concrete": { "f_ck_mpa": 30.0, "e_cm_mpa": 32836.57 },
///     "rebars": [
///       { "id": "…", "y_mm": 340.0, "area_mm2": 314.16,
///         "material": { "type": "ReinforcingSteel", "f_yk_mpa": 500.0, "e_s_mpa": 200000.0 } }
///     ]
///   },
///   "loads": { "axial_force_n": 50000.0, "moment_nmm": 450000000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressStrainInput {
    /// User label for this analysis
    #[serde(default)]
    pub label: String,

    /// Section geometry, materials and reinforcement
    pub section: Section,

    /// Internal forces
    pub loads: LoadCase,
}

/// Results of one section analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressStrainResult {
    /// Label copied from the input
    pub label: String,

    /// Neutral axis depth below the compressed face (mm)
    pub x_u_mm: f64,

    /// Edge assumed to be most compressed
    pub most_strained_side: StrainedSide,

    /// Solver diagnostics
    pub solver: NeutralAxisSolution,

    /// False when the section was treated as fully cracked (x_u = 0, ε_c = 0)
    pub compression_zone_found: bool,

    /// Concrete strain at the compressed face (dimensionless)
    pub concrete_strain: f64,

    /// Concrete stress at the compressed face (MPa)
    pub concrete_stress_mpa: f64,

    /// Resultant concrete compressive force (N)
    pub concrete_force_n: f64,

    /// Strain and stress of every bar, in section order
    pub rebars: Vec<RebarState>,

    /// Most stretched bar
    pub most_stretched_rebar: Option<Uuid>,

    /// Most compressed bar
    pub most_compressed_rebar: Option<Uuid>,

    /// Steel partial safety factor γ_s
    pub gamma_s: f64,

    /// Concrete partial safety factor γ_c
    pub gamma_c: f64,

    /// Design yield strength of the section steel, f_yk / γ_s (MPa)
    pub design_yield_strength_mpa: f64,
}

impl StressStrainResult {
    /// Look up the result for one bar
    pub fn rebar(&self, id: Uuid) -> Option<&RebarState> {
        self.rebars.iter().find(|r| r.id == id)
    }

    /// Number of bars on the yield plateau
    pub fn yielded_rebar_count(&self) -> usize {
        self.rebars.iter().filter(|r| r.yielded).count()
    }

    /// Largest bar tensile stress (MPa), if any bar is in tension
    pub fn max_rebar_tension_mpa(&self) -> Option<f64> {
        self.rebars
            .iter()
            .map(|r| r.stress_mpa)
            .filter(|s| *s > 0.0)
            .max_by(f64::total_cmp)
    }
}

/// Analyse one section under one load case.
///
/// # Returns
///
/// * `Ok(StressStrainResult)` - Calculation results
/// * `Err(CalcError)` - Invalid section or loads, or a non-steel bar
pub fn calculate(input: &StressStrainInput) -> CalcResult<StressStrainResult> {
    let state = StrainState::evaluate(&input.section, &input.loads)?;

    let (rebars, most_stretched_rebar, most_compressed_rebar) = if input.section.rebars.is_empty() {
        (Vec::new(), None, None)
    } else {
        (
            state.rebar_states()?,
            Some(state.max_rebar_strain()?.id),
            Some(state.min_rebar_strain()?.id),
        )
    };

    let factors = input.loads.safety_factors();
    let result = StressStrainResult {
        label: input.label.clone(),
        x_u_mm: state.x_u(),
        most_strained_side: state.side(),
        solver: *state.neutral_axis(),
        compression_zone_found: state.compression_zone_found(),
        concrete_strain: state.concrete_strain(),
        concrete_stress_mpa: state.concrete_stress(),
        concrete_force_n: state.concrete_force(),
        rebars,
        most_stretched_rebar,
        most_compressed_rebar,
        gamma_s: factors.gamma_s,
        gamma_c: factors.gamma_c,
        design_yield_strength_mpa: input.section.steel.design_yield_strength(factors.gamma_s),
    };

    info!(
        label = %result.label,
        x_u = result.x_u_mm,
        converged = result.solver.converged,
        "section analysed"
    );
    Ok(result)
}

/// Analyse a batch of inputs, stopping at the first error.
pub fn calculate_all(inputs: &[StressStrainInput]) -> CalcResult<Vec<StressStrainResult>> {
    inputs.iter().map(calculate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::DesignSituation;
    use crate::materials::ConcreteMaterial;

    fn test_input() -> StressStrainInput {
        StressStrainInput {
            label: "Test Section".to_string(),
            section: Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
                .with_rebar_layer(5, 14.0, -340.0)
                .with_rebar_layer(4, 20.0, 340.0),
            loads: LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6),
        }
    }

    #[test]
    fn test_calculation() {
        let input = test_input();
        let result = calculate(&input).unwrap();

        assert_eq!(result.label, "Test Section");
        assert_eq!(result.most_strained_side, StrainedSide::Lower);
        assert!((result.x_u_mm - 74.37).abs() < 0.5);
        assert!(result.solver.converged);
        assert!(result.concrete_stress_mpa < 0.0);
        assert!(result.concrete_force_n < 0.0);
        assert_eq!(result.yielded_rebar_count(), 5);
        assert_eq!(result.max_rebar_tension_mpa(), Some(500.0));

        let stretched = result.most_stretched_rebar.unwrap();
        assert_eq!(result.rebar(stretched).unwrap().y_mm, -340.0);
        let compressed = result.most_compressed_rebar.unwrap();
        assert_eq!(result.rebar(compressed).unwrap().y_mm, 340.0);
    }

    #[test]
    fn test_safety_factors_follow_design_situation() {
        let mut input = test_input();
        let result = calculate(&input).unwrap();
        assert_eq!((result.gamma_s, result.gamma_c), (1.15, 1.5));
        assert!((result.design_yield_strength_mpa - 434.78).abs() < 0.01);

        input.loads = input.loads.with_design_situation(DesignSituation::Extraordinary);
        let result = calculate(&input).unwrap();
        assert_eq!((result.gamma_s, result.gamma_c), (1.0, 1.2));
        assert_eq!(result.design_yield_strength_mpa, 500.0);
    }

    #[test]
    fn test_unreinforced_section_has_no_rebar_results() {
        let mut input = test_input();
        input.section.rebars.clear();
        let result = calculate(&input).unwrap();

        assert!(result.rebars.is_empty());
        assert!(result.most_stretched_rebar.is_none());
        assert!(result.max_rebar_tension_mpa().is_none());
    }

    #[test]
    fn test_invalid_input() {
        let mut input = test_input();
        input.loads = LoadCase::new("empty");
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_batch() {
        let mut second = test_input();
        second.loads = LoadCase::new("SLS").with_moment(-200.0e6);
        let results = calculate_all(&[test_input(), second]).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].most_strained_side, StrainedSide::Upper);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&test_input()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"most_strained_side\": \"LOWER_EDGE\""));

        let roundtrip: StressStrainResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.rebars.len(), result.rebars.len());
        assert_eq!(roundtrip.most_stretched_rebar, result.most_stretched_rebar);
    }
}
