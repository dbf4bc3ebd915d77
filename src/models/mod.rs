//! Implements the solid models and their catalog

mod drucker_prager;
mod elastic_isotropic;
mod invariants;
mod solid_model;
mod update_info;
pub use crate::models::drucker_prager::*;
pub use crate::models::elastic_isotropic::*;
pub use crate::models::invariants::*;
pub use crate::models::solid_model::*;
pub use crate::models::update_info::*;
