/// Holds diagnostic information about the update of one integration point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Indicates that the return mapping was performed (plastic loading)
    pub plastic: bool,

    /// Number of Newton corrections of the return mapping
    pub iterations: usize,

    /// Indicates that the return mapping converged before the iteration cap
    ///
    /// **Note:** A non-converged update still yields the last iterate.
    pub converged: bool,
}

/// Holds the accumulated diagnostics of a batch of updates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Number of updated points
    pub n_point: usize,

    /// Number of points with plastic loading
    pub n_plastic: usize,

    /// Number of points where the return mapping reached the iteration cap
    pub n_not_converged: usize,

    /// Maximum number of Newton corrections among all points
    pub max_iterations: usize,
}

impl UpdateInfo {
    /// Returns the information of an elastic update
    pub fn elastic() -> Self {
        UpdateInfo {
            plastic: false,
            iterations: 0,
            converged: true,
        }
    }
}

impl UpdateStats {
    /// Merges two sets of statistics
    pub fn merge(self, other: UpdateStats) -> UpdateStats {
        UpdateStats {
            n_point: self.n_point + other.n_point,
            n_plastic: self.n_plastic + other.n_plastic,
            n_not_converged: self.n_not_converged + other.n_not_converged,
            max_iterations: usize::max(self.max_iterations, other.max_iterations),
        }
    }
}

impl From<UpdateInfo> for UpdateStats {
    fn from(info: UpdateInfo) -> Self {
        UpdateStats {
            n_point: 1,
            n_plastic: if info.plastic { 1 } else { 0 },
            n_not_converged: if info.converged { 0 } else { 1 },
            max_iterations: info.iterations,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
