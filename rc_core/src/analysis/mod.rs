//! # Section Analysis
//!
//! Stress-strain analysis of a rectangular reinforced concrete section under
//! an axial force N and a bending moment M. The pipeline:
//!
//! 1. [`side`] - the sign of M selects the most compressed edge
//! 2. [`neutral_axis`] - secant iteration for the neutral axis depth `x_u`
//! 3. [`strain_state`] - concrete strain/stress/force and bar strains/stresses
//!
//! ## Sign Conventions
//!
//! - **Ordinates**: `y` from the centroid, positive towards the lower edge
//! - **Axial force**: negative = compression
//! - **Moment**: positive compresses the lower edge
//! - **Strain**: negative = shortening, positive = elongation
//!
//! ## Example
//!
//! ```rust
//! use rc_core::analysis::StrainState;
//! use rc_core::loads::LoadCase;
//! use rc_core::materials::ConcreteMaterial;
//! use rc_core::section::Section;
//!
//! let section = Section::new(300.0, 500.0, ConcreteMaterial::from_characteristic_strength(25.0))
//!     .with_rebar_layer(2, 12.0, -210.0)
//!     .with_rebar_layer(3, 16.0, 210.0);
//! let state = StrainState::evaluate(&section, &LoadCase::new("M").with_moment(60.0e6))?;
//!
//! assert!(state.x_u() <= 500.0);
//! for rebar in state.rebar_states()? {
//!     assert!(rebar.stress_mpa.abs() <= 500.0);
//! }
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```

pub mod neutral_axis;
pub mod side;
pub mod strain_state;

pub use neutral_axis::{
    EquilibriumFunction, NeutralAxisSolution, NeutralAxisSolver, MAX_ITERATIONS, TOLERANCE,
    ZERO_DENOMINATOR_SUBSTITUTE,
};
pub use side::StrainedSide;
pub use strain_state::{RebarState, RebarStrain, StrainState};
