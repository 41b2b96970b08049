//! Strain state of the section
//!
//! Built on top of the neutral axis: concrete strain and stress at the
//! compressed face, the resultant concrete force, and the strain of every bar.
//!
//! Strains are dimensionless (negative = shortening), stresses are in MPa.
//!
//! Two pairs of closed forms are selected by branch conditions, each
//! reflecting a different equilibrium assumption:
//!
//! - **Concrete strain**: axial equilibrium when `N != 0`, flexural
//!   equilibrium about the neutral axis when `N == 0`.
//! - **Bar strain**: the linear profile through the neutral axis when a
//!   compression zone exists (`eps_c != 0`), otherwise a cracked-section
//!   curvature form that ignores the concrete.
//!
//! Everything is computed once in [`StrainState::evaluate`]; the value is
//! immutable afterwards.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::neutral_axis::{NeutralAxisSolution, NeutralAxisSolver};
use super::side::StrainedSide;
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadCase;
use crate::materials::Material;
use crate::section::Section;

/// Strain of a single bar, with what is needed to turn it into a stress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarStrain {
    /// Rebar identity
    pub id: Uuid,
    /// Rebar label
    pub label: String,
    /// Ordinate from the centroid (mm)
    pub y_mm: f64,
    /// Distance from the compressed face (mm)
    pub distance_mm: f64,
    /// Strain (dimensionless, positive = elongation)
    pub strain: f64,
    /// Bar material
    pub material: Material,
}

impl RebarStrain {
    /// Stress (MPa) from the bilinear steel law.
    ///
    /// Fails with `MaterialMismatch` when the bar is not reinforcing steel.
    pub fn stress(&self) -> CalcResult<f64> {
        let steel = self.material.as_reinforcing_steel(&format!("rebar {}", self.id))?;
        Ok(steel.stress_from_strain(self.strain))
    }
}

/// Strain and stress of a single bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarState {
    /// Rebar identity
    pub id: Uuid,
    /// Rebar label
    pub label: String,
    /// Ordinate from the centroid (mm)
    pub y_mm: f64,
    /// Distance from the compressed face (mm)
    pub distance_mm: f64,
    /// Strain (dimensionless)
    pub strain: f64,
    /// Stress (MPa)
    pub stress_mpa: f64,
    /// Bar is on the yield plateau
    pub yielded: bool,
}

/// Complete strain state of a section under one load case.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainState {
    neutral_axis: NeutralAxisSolution,
    side: StrainedSide,
    concrete_strain: f64,
    concrete_stress_mpa: f64,
    concrete_force_n: f64,
    rebars: Vec<RebarStrain>,
}

impl StrainState {
    /// Solve for the neutral axis and evaluate all strains.
    ///
    /// ```rust
    /// use rc_core::analysis::{StrainState, StrainedSide};
    /// use rc_core::loads::LoadCase;
    /// use rc_core::materials::ConcreteMaterial;
    /// use rc_core::section::Section;
    ///
    /// let section = Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
    ///     .with_rebar_layer(5, 14.0, -340.0)
    ///     .with_rebar_layer(4, 20.0, 340.0);
    /// let loads = LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6);
    ///
    /// let state = StrainState::evaluate(&section, &loads)?;
    /// assert_eq!(state.side(), StrainedSide::Lower);
    /// assert!(state.x_u() > 0.0 && state.x_u() < 800.0);
    /// assert!(state.concrete_strain() < 0.0);
    /// # Ok::<(), rc_core::errors::CalcError>(())
    /// ```
    pub fn evaluate(section: &Section, loads: &LoadCase) -> CalcResult<Self> {
        let solver = NeutralAxisSolver::new(section, loads)?;
        let neutral_axis = solver.solve();
        let side = solver.side();
        let distances = solver.distances_mm();
        let x_u = neutral_axis.x_u_mm;

        let concrete_strain = concrete_strain_at_pressure_face(section, loads, side, distances, x_u);
        let concrete_stress_mpa = concrete_strain * section.concrete.e_cm_mpa;
        let concrete_force_n = concrete_stress_mpa * section.width_mm * (x_u / 2.0);

        let strains: Vec<f64> = if concrete_strain != 0.0 {
            distances
                .iter()
                .map(|d| concrete_strain / x_u * (x_u - d))
                .collect()
        } else {
            cracked_section_strains(section, loads, distances)
        };

        let rebars = section
            .rebars
            .iter()
            .zip(distances)
            .zip(strains)
            .map(|((rebar, &distance_mm), strain)| RebarStrain {
                id: rebar.id,
                label: rebar.label.clone(),
                y_mm: rebar.y_mm,
                distance_mm,
                strain,
                material: rebar.material,
            })
            .collect();

        Ok(StrainState {
            neutral_axis,
            side,
            concrete_strain,
            concrete_stress_mpa,
            concrete_force_n,
            rebars,
        })
    }

    /// Neutral axis depth below the compressed face (mm)
    pub fn x_u(&self) -> f64 {
        self.neutral_axis.x_u_mm
    }

    /// Full solver outcome (iterations, convergence, residual)
    pub fn neutral_axis(&self) -> &NeutralAxisSolution {
        &self.neutral_axis
    }

    /// Edge assumed to be most compressed
    pub fn side(&self) -> StrainedSide {
        self.side
    }

    /// Concrete strain at the compressed face (dimensionless)
    pub fn concrete_strain(&self) -> f64 {
        self.concrete_strain
    }

    /// Concrete stress at the compressed face (MPa)
    pub fn concrete_stress(&self) -> f64 {
        self.concrete_stress_mpa
    }

    /// Resultant of the triangular concrete stress block (N)
    pub fn concrete_force(&self) -> f64 {
        self.concrete_force_n
    }

    /// False when the solver found no compression zone (`x_u = 0`, `eps_c = 0`).
    ///
    /// Such a result means the section was treated as fully cracked and
    /// should be flagged rather than accepted.
    pub fn compression_zone_found(&self) -> bool {
        self.x_u() > 0.0 && self.concrete_strain != 0.0
    }

    /// Strains of all bars, in section order
    pub fn rebar_strains(&self) -> CalcResult<&[RebarStrain]> {
        if self.rebars.is_empty() {
            return Err(CalcError::no_rebars("read rebar strains"));
        }
        Ok(&self.rebars)
    }

    /// Strain of one bar
    pub fn rebar_strain(&self, id: Uuid) -> CalcResult<f64> {
        self.rebar_strains()?
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.strain)
            .ok_or_else(|| CalcError::invalid_input("rebar_id", id.to_string(), "No rebar with this id in the section"))
    }

    /// Strain and stress of all bars
    pub fn rebar_states(&self) -> CalcResult<Vec<RebarState>> {
        self.rebar_strains()?
            .iter()
            .map(|r| {
                let steel = r.material.as_reinforcing_steel(&format!("rebar {}", r.id))?;
                Ok(RebarState {
                    id: r.id,
                    label: r.label.clone(),
                    y_mm: r.y_mm,
                    distance_mm: r.distance_mm,
                    strain: r.strain,
                    stress_mpa: steel.stress_from_strain(r.strain),
                    yielded: steel.is_yielded(r.strain),
                })
            })
            .collect()
    }

    /// The most stretched bar (largest strain)
    pub fn max_rebar_strain(&self) -> CalcResult<&RebarStrain> {
        self.rebar_strains()?
            .iter()
            .max_by(|a, b| a.strain.total_cmp(&b.strain))
            .ok_or_else(|| CalcError::no_rebars("find the most stretched rebar"))
    }

    /// The most compressed bar (smallest strain)
    pub fn min_rebar_strain(&self) -> CalcResult<&RebarStrain> {
        self.rebar_strains()?
            .iter()
            .min_by(|a, b| a.strain.total_cmp(&b.strain))
            .ok_or_else(|| CalcError::no_rebars("find the most compressed rebar"))
    }
}

/// Concrete strain at the compressed face for a given neutral axis depth.
///
/// Zero when there is no compression zone (`x_u = 0`) or when the
/// equilibrium denominator vanishes (e.g. pure bending without bars).
fn concrete_strain_at_pressure_face(
    section: &Section,
    loads: &LoadCase,
    side: StrainedSide,
    distances: &[f64],
    x_u: f64,
) -> f64 {
    if x_u == 0.0 {
        return 0.0;
    }

    let n = loads.axial_force();
    let e_cm = section.concrete.e_cm_mpa;
    let b = section.width_mm;
    let bars = section.rebars.iter().zip(distances);

    let (numerator, denominator) = if n != 0.0 {
        // Axial equilibrium
        let steel: f64 = bars.map(|(r, d)| 2.0 * r.axial_stiffness() * (d - x_u)).sum();
        (-2.0 * n * x_u, -x_u * x_u * e_cm * b + steel)
    } else {
        // Flexural equilibrium about the neutral axis
        let steel: f64 = bars
            .map(|(r, d)| r.axial_stiffness() * (d - x_u / 3.0) * (d / x_u - 1.0))
            .sum();
        (-loads.moment() * side.sign_factor(), steel)
    };

    if denominator == 0.0 || denominator.is_nan() {
        warn!(x_u, axial_force = n, "concrete strain denominator vanished, taking zero strain");
        return 0.0;
    }
    numerator / denominator
}

/// Bar strains for a fully cracked section, ignoring the concrete.
///
/// Uses the section's generic steel modulus for every bar. When all bars sit
/// at one depth the curvature is indeterminate and taken as zero.
fn cracked_section_strains(section: &Section, loads: &LoadCase, distances: &[f64]) -> Vec<f64> {
    if section.rebars.is_empty() {
        return Vec::new();
    }

    let n = loads.axial_force();
    let m = loads.moment();
    let e_s = section.steel.e_s_mpa;
    let half = section.half_height_mm();

    let mut a_tot = 0.0;
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    for (rebar, &d) in section.rebars.iter().zip(distances) {
        let lever = d - half;
        a_tot += rebar.area_mm2;
        s1 += rebar.area_mm2 * lever;
        s2 += rebar.area_mm2 * lever * lever;
    }

    let denominator = s1 * s1 / a_tot - s2;
    let k_u = if denominator.abs() <= 1e-9 * s2 {
        warn!("all rebars at one depth, cracked-section curvature taken as zero");
        0.0
    } else {
        (m / e_s - n / (e_s * a_tot) * s1) / denominator
    };
    let e0 = (n / e_s + k_u * s1) / a_tot;

    distances.iter().map(|d| e0 - k_u * (d - half)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteMaterial, ReinforcingSteel};
    use crate::section::Rebar;

    fn c30() -> ConcreteMaterial {
        ConcreteMaterial::from_characteristic_strength(30.0)
    }

    /// 5⌀14 near the top, 4⌀20 near the bottom
    fn test_section() -> Section {
        Section::new(1000.0, 800.0, c30())
            .with_rebar_layer(5, 14.0, -340.0)
            .with_rebar_layer(4, 20.0, 340.0)
    }

    fn symmetric_section() -> Section {
        Section::new(1000.0, 800.0, c30())
            .with_rebar_layer(4, 20.0, -350.0)
            .with_rebar_layer(4, 20.0, 350.0)
    }

    #[test]
    fn test_end_to_end_tension_and_bending() {
        let section = test_section();
        let loads = LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        assert!(state.x_u().is_finite());
        assert!((0.0..=800.0).contains(&state.x_u()));
        assert!((state.x_u() - 74.37).abs() < 0.5);
        assert!(state.compression_zone_found());

        // Concrete: ε_c ≈ -0.462‰, σ_c = ε_c·E_cm, F_c = σ_c·b·x_u/2
        assert!((state.concrete_strain() + 4.623e-4).abs() < 1e-6);
        let expected_stress = state.concrete_strain() * section.concrete.e_cm_mpa;
        assert!((state.concrete_stress() - expected_stress).abs() < 1e-12);
        let expected_force = expected_stress * 1000.0 * state.x_u() / 2.0;
        assert!((state.concrete_force() - expected_force).abs() < 1e-6);

        // Top bars are far from the compressed lower edge and yield in tension
        let stretched = state.max_rebar_strain().unwrap();
        assert_eq!(stretched.y_mm, -340.0);
        assert!((stretched.strain - 4.138e-3).abs() < 1e-5);
        assert_eq!(stretched.stress().unwrap(), 500.0);

        // Bottom bars are compressed and stay elastic
        let compressed = state.min_rebar_strain().unwrap();
        assert_eq!(compressed.y_mm, 340.0);
        assert!((compressed.strain + 8.93e-5).abs() < 1e-6);
        let stress = compressed.stress().unwrap();
        assert!((stress - compressed.strain * 200_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rebar_states_obey_steel_law() {
        let section = test_section();
        let loads = LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();
        let steel = ReinforcingSteel::b500();

        let states = state.rebar_states().unwrap();
        assert_eq!(states.len(), 9);
        for rebar in &states {
            assert!(rebar.stress_mpa.abs() <= 500.0);
            if rebar.yielded {
                assert!(rebar.strain.abs() > steel.yield_strain());
                assert_eq!(rebar.stress_mpa.abs(), 500.0);
            } else {
                assert!(rebar.strain.abs() <= steel.yield_strain());
                assert!((rebar.stress_mpa - rebar.strain * 200_000.0).abs() < 1e-9);
            }
        }
        assert_eq!(states.iter().filter(|r| r.yielded).count(), 5);
    }

    #[test]
    fn test_linear_profile_through_neutral_axis() {
        let section = test_section();
        let loads = LoadCase::new("M").with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        for rebar in state.rebar_strains().unwrap() {
            let expected = state.concrete_strain() / state.x_u() * (state.x_u() - rebar.distance_mm);
            assert!((rebar.strain - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn test_negative_moment_compresses_upper_edge() {
        let section = test_section();
        let loads = LoadCase::new("-M").with_axial_force(-500_000.0).with_moment(-450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        assert_eq!(state.side(), StrainedSide::Upper);
        assert!(state.neutral_axis().converged);
        assert!(state.concrete_strain() < 0.0);
        // Bottom bars are now the stretched ones
        assert_eq!(state.max_rebar_strain().unwrap().y_mm, 340.0);
        assert_eq!(state.min_rebar_strain().unwrap().y_mm, -340.0);
    }

    #[test]
    fn test_x_u_is_computed_once() {
        let section = test_section();
        let loads = LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        let evaluations = state.neutral_axis().evaluations;
        let first = state.x_u();
        let second = state.x_u();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(state.neutral_axis().evaluations, evaluations);

        // A fresh evaluation reproduces the same value
        let again = StrainState::evaluate(&section, &loads).unwrap();
        assert_eq!(again.x_u().to_bits(), first.to_bits());
    }

    #[test]
    fn test_symmetric_pure_compression() {
        let loads = LoadCase::new("N").with_axial_force(-50_000.0).with_moment(0.0);
        let state = StrainState::evaluate(&symmetric_section(), &loads).unwrap();

        assert_eq!(state.x_u(), 800.0);
        assert!(state.concrete_strain() < 0.0);
        assert!(state.rebar_strains().unwrap().iter().all(|r| r.strain < 0.0));
    }

    #[test]
    fn test_cracked_section_pure_tension() {
        let section = symmetric_section();
        let loads = LoadCase::new("N").with_axial_force(100_000.0);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        assert_eq!(state.x_u(), 0.0);
        assert_eq!(state.concrete_strain(), 0.0);
        assert_eq!(state.concrete_force(), 0.0);
        assert!(!state.compression_zone_found());

        // Symmetric bars: no curvature, uniform strain N / (E_s·A_tot)
        let expected = 100_000.0 / (200_000.0 * section.rebar_area_mm2());
        for rebar in state.rebar_strains().unwrap() {
            assert!((rebar.strain - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_loads_report_no_compression_zone() {
        let loads = LoadCase::new("zero").with_axial_force(0.0).with_moment(0.0);
        let state = StrainState::evaluate(&symmetric_section(), &loads).unwrap();

        assert_eq!(state.x_u(), 0.0);
        assert_eq!(state.concrete_strain(), 0.0);
        assert!(!state.compression_zone_found());
        assert!(!state.neutral_axis().converged);
        assert!(state.rebar_strains().unwrap().iter().all(|r| r.strain == 0.0));
    }

    #[test]
    fn test_cracked_section_single_layer() {
        let section = Section::new(300.0, 500.0, c30()).with_rebar_layer(3, 16.0, 200.0);
        let loads = LoadCase::new("N").with_axial_force(10_000.0);
        let strains = cracked_section_strains(&section, &loads, &[50.0, 50.0, 50.0]);

        let expected = 10_000.0 / (200_000.0 * section.rebar_area_mm2());
        assert_eq!(strains.len(), 3);
        assert!(strains.iter().all(|s| (s - expected).abs() < 1e-15));
    }

    #[test]
    fn test_unreinforced_section() {
        let section = Section::new(1000.0, 800.0, c30());
        let loads = LoadCase::new("M").with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        assert!((0.0..=800.0).contains(&state.x_u()));
        assert!(state.concrete_strain().is_finite());
        assert_eq!(state.rebar_strains().unwrap_err().error_code(), "NO_REBARS");
        assert_eq!(state.rebar_states().unwrap_err().error_code(), "NO_REBARS");
        assert_eq!(state.max_rebar_strain().unwrap_err().error_code(), "NO_REBARS");
        assert_eq!(state.min_rebar_strain().unwrap_err().error_code(), "NO_REBARS");
    }

    #[test]
    fn test_rebar_lookup_by_id() {
        let section = test_section();
        let loads = LoadCase::new("M").with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        let id = section.rebars[8].id;
        let strain = state.rebar_strain(id).unwrap();
        assert!(strain < 0.0);
        assert_eq!(
            state.rebar_strain(Uuid::nil()).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_non_steel_rebar_rejected_by_steel_law() {
        let section = test_section()
            .with_rebar(Rebar::from_diameter(0.0, 16.0, c30()).with_label("dowel"));
        let loads = LoadCase::new("M").with_moment(450.0e6);
        let state = StrainState::evaluate(&section, &loads).unwrap();

        // Strains are still available; stresses need steel
        assert_eq!(state.rebar_strains().unwrap().len(), 10);
        let err = state.rebar_states().unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_MISMATCH");
    }

    #[test]
    fn test_missing_loads_rejected() {
        let err = StrainState::evaluate(&test_section(), &LoadCase::new("none")).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }
}
