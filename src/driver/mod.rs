//! This module implements a material-point driver applying strain paths to solid models

mod strain_path;
pub use crate::driver::strain_path::*;
