//! # Structural Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`stress_strain`] - Neutral axis, concrete and rebar strains/stresses of
//!   a reinforced concrete section under N and M

pub mod stress_strain;

pub use stress_strain::{calculate, calculate_all, StressStrainInput, StressStrainResult};
