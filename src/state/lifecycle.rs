use crate::StrError;

/// Tracks the allocate → update → commit lifecycle of a model
///
/// The caller is responsible for the sequence:
///
/// ```text
/// allocate → (update ... update → commit) → (update ... update → commit) → ...
/// ```
#[derive(Clone, Debug)]
pub struct Lifecycle {
    /// Indicates that the arrays have been allocated
    allocated: bool,

    /// Number of point updates since the last commit
    n_update: usize,

    /// Number of committed steps
    n_step: usize,
}

impl Lifecycle {
    /// Allocates a new instance
    pub fn new() -> Self {
        Lifecycle {
            allocated: false,
            n_update: 0,
            n_step: 0,
        }
    }

    /// Calculates the number of integration points per element
    ///
    /// Returns an error if the number of points is not a positive multiple of the number of elements.
    pub fn n_integ_point(point_count: usize, element_count: usize) -> Result<usize, StrError> {
        if element_count == 0 {
            return Err("element count must be ≥ 1");
        }
        if point_count == 0 {
            return Err("point count must be ≥ 1");
        }
        if point_count % element_count != 0 {
            return Err("point count must be a multiple of element count");
        }
        Ok(point_count / element_count)
    }

    /// Marks the arrays as allocated (only once)
    pub fn set_allocated(&mut self) -> Result<(), StrError> {
        if self.allocated {
            return Err("model arrays have been allocated already");
        }
        self.allocated = true;
        Ok(())
    }

    /// Returns an error if the arrays have not been allocated yet
    pub fn check_allocated(&self) -> Result<(), StrError> {
        if !self.allocated {
            return Err("model arrays must be allocated before use");
        }
        Ok(())
    }

    /// Registers the number of point updates performed since the last commit
    pub fn register_updates(&mut self, n: usize) {
        self.n_update += n;
    }

    /// Registers a commit (end of a converged step)
    pub fn register_commit(&mut self) -> Result<(), StrError> {
        self.check_allocated()?;
        self.n_step += 1;
        self.n_update = 0;
        Ok(())
    }

    /// Returns whether the arrays have been allocated or not
    pub fn allocated(&self) -> bool {
        self.allocated
    }

    /// Returns the number of point updates since the last commit
    pub fn n_update(&self) -> usize {
        self.n_update
    }

    /// Returns the number of committed steps
    pub fn n_step(&self) -> usize {
        self.n_step
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
