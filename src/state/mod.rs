//! Implements the storage of per-point state and its allocate/commit lifecycle

mod lifecycle;
mod state_array;
pub use crate::state::lifecycle::*;
pub use crate::state::state_array::*;
