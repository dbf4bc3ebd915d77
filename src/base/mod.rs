//! Implements the base structures: constants, Voigt arrays, parameters, and configuration

mod config;
mod constants;
mod parameters;
mod voigt;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::parameters::*;
pub use crate::base::voigt::*;
