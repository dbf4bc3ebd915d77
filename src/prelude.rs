//! Makes available common structures needed to run constitutive updates
//!
//! You may write `use solidpoint::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{DriverInput, ElementParameters, ModelConfig, Stiffness, Voigt};
pub use crate::base::{ParamElasticity, ParamPlasticity, ParamSolid};
pub use crate::driver::{PathRecord, StrainPathDriver};
pub use crate::models::{SolidModel, UpdateInfo, UpdateStats};
pub use crate::StrError;
