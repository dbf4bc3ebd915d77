//! Constitutive updates for the material points of a continuum simulation
//!
//! Given a strain increment at each integration point, the models in this crate
//! compute the updated stress and the consistent tangent stiffness, and advance
//! the history variables (e.g., cohesion) once a step has converged.
//!
//! The available models are:
//!
//! * `ElasticIsotropic` -- linear elasticity defined by the bulk and shear moduli
//! * `DruckerPrager` -- Drucker-Prager plasticity with linear cohesion hardening/softening
//!
//! # Example
//!
//! ```
//! use solidpoint::prelude::*;
//!
//! fn main() -> Result<(), StrError> {
//!     let param = ParamSolid::sample_drucker_prager();
//!     let mut model = SolidModel::new("DruckerPrager", &param)?;
//!     model.allocate(8, 2)?; // 2 elements with 4 integration points each
//!
//!     let delta_strain = Voigt::new(1e-4, 0.0, 0.0, 0.0, 0.0, 0.0);
//!     let (stress, stiffness) = model.update(0, 0, &delta_strain)?;
//!     assert!(stress[0] > 0.0);
//!     assert!(stiffness[(0, 0)] > 0.0);
//!
//!     model.commit_step()?;
//!     Ok(())
//! }
//! ```

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod driver;
pub mod models;
pub mod prelude;
pub mod state;
