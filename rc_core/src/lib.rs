//! # rc_core - Reinforced Concrete Section Engine
//!
//! `rc_core` computes the neutral axis and the strain/stress state of a
//! rectangular reinforced concrete cross-section under an axial force and a
//! bending moment. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: A strain state is computed once and never mutated
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use rc_core::{LoadCase, Section, StrainState};
//! use rc_core::materials::ConcreteMaterial;
//!
//! let section = Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
//!     .with_rebar_layer(5, 14.0, -340.0)
//!     .with_rebar_layer(4, 20.0, 340.0);
//! let loads = LoadCase::new("ULS").with_axial_force(50_000.0).with_moment(450.0e6);
//!
//! let state = StrainState::evaluate(&section, &loads).unwrap();
//! assert!(state.concrete_strain() < 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Section geometry and reinforcement layout
//! - [`loads`] - Internal forces and design situations
//! - [`analysis`] - Side selection, neutral axis solver, strain state
//! - [`calculations`] - Input/Result wrappers for batch use
//! - [`materials`] - Concrete and reinforcing steel
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Case files with atomic saves

pub mod analysis;
pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{NeutralAxisSolver, StrainState, StrainedSide};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_case_file, save_case_file, save_results, CaseFile};
pub use loads::LoadCase;
pub use section::{Rebar, Section};
