use super::{DruckerPrager, ElasticIsotropic, UpdateInfo, UpdateStats};
use crate::base::{ElementParameters, ModelConfig, ParamSolid, Stiffness, Voigt};
use crate::base::{NAME_DRUCKER_PRAGER, NAME_ELASTIC_ISOTROPIC};
use crate::state::{Lifecycle, StateArray};
use crate::StrError;
use rayon::prelude::*;

/// Holds the names of all registered models
const CATALOG: [&str; 2] = [NAME_ELASTIC_ISOTROPIC, NAME_DRUCKER_PRAGER];

/// Holds the actual model implementation
pub enum SolidVariant {
    /// Linear elastic model
    ElasticIsotropic(ElasticIsotropic),

    /// Drucker-Prager plasticity model
    DruckerPrager(DruckerPrager),
}

/// Implements a solid model selected by name, with its allocate/update/commit lifecycle
///
/// The updates of each variant are dispatched with a `match`; the per-point work
/// is performed by the copyable update views, e.g. [crate::models::DruckerPragerUpdates].
pub struct SolidModel {
    /// Holds the actual model implementation
    pub actual: SolidVariant,

    /// Tracks the allocate/commit lifecycle
    lifecycle: Lifecycle,
}

impl SolidModel {
    /// Returns the names of all registered models
    pub fn catalog() -> &'static [&'static str] {
        &CATALOG
    }

    /// Allocates a new instance given the name of the model in the catalog
    ///
    /// The arrays must be sized with [SolidModel::allocate] before any update.
    pub fn new(name: &str, param: &ParamSolid) -> Result<Self, StrError> {
        let actual = match name {
            NAME_ELASTIC_ISOTROPIC => {
                if param.plasticity.is_some() {
                    log::warn!("plasticity parameters are ignored by the {} model", name);
                }
                SolidVariant::ElasticIsotropic(ElasticIsotropic::new(param)?)
            }
            NAME_DRUCKER_PRAGER => SolidVariant::DruckerPrager(DruckerPrager::new(param)?),
            _ => {
                log::error!("unknown solid model name: {}", name);
                return Err("unknown solid model name");
            }
        };
        log::debug!("created solid model {}", name);
        Ok(SolidModel {
            actual,
            lifecycle: Lifecycle::new(),
        })
    }

    /// Allocates a new instance from a configuration
    pub fn from_config(config: &ModelConfig) -> Result<Self, StrError> {
        SolidModel::new(&config.model, &config.param)
    }

    /// Returns the name of the model in the catalog
    pub fn model_name(&self) -> &'static str {
        match self.actual {
            SolidVariant::ElasticIsotropic(..) => NAME_ELASTIC_ISOTROPIC,
            SolidVariant::DruckerPrager(..) => NAME_DRUCKER_PRAGER,
        }
    }

    /// Sizes all arrays (must be called once, before any update)
    ///
    /// # Input
    ///
    /// * `point_count` -- total number of integration points
    /// * `element_count` -- number of elements (`point_count` must be a multiple of it)
    pub fn allocate(&mut self, point_count: usize, element_count: usize) -> Result<(), StrError> {
        let n_integ_point = Lifecycle::n_integ_point(point_count, element_count)?;
        self.lifecycle.set_allocated()?;
        match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => m.allocate(element_count, n_integ_point),
            SolidVariant::DruckerPrager(m) => m.allocate(element_count, n_integ_point),
        }
        log::debug!(
            "allocated {} model with {} elements and {} integration points per element",
            self.model_name(),
            element_count,
            n_integ_point
        );
        Ok(())
    }

    /// Sets the parameters of an element (the plastic entries are ignored by the elastic model)
    pub fn set_element_parameters(&mut self, k: usize, param: &ElementParameters) -> Result<(), StrError> {
        self.lifecycle.check_allocated()?;
        match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => m.set_element_parameters(k, param),
            SolidVariant::DruckerPrager(m) => m.set_element_parameters(k, param),
        }
    }

    /// Returns the parameters of an element
    pub fn element_parameters(&self, k: usize) -> Result<ElementParameters, StrError> {
        self.lifecycle.check_allocated()?;
        match &self.actual {
            SolidVariant::ElasticIsotropic(m) => {
                let (bulk, shear) = m.moduli(k)?;
                Ok(ElementParameters {
                    bulk,
                    shear,
                    friction: 0.0,
                    dilation: 0.0,
                    hardening: 0.0,
                })
            }
            SolidVariant::DruckerPrager(m) => m.element_parameters(k),
        }
    }

    /// Sets the initial stress (old and new values) of the (k, q) point
    pub fn set_initial_stress(&mut self, k: usize, q: usize, stress: &Voigt) -> Result<(), StrError> {
        self.lifecycle.check_allocated()?;
        match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => m.stress_mut().set_initial(k, q, *stress),
            SolidVariant::DruckerPrager(m) => m.elastic_mut().stress_mut().set_initial(k, q, *stress),
        }
    }

    /// Sets the initial cohesion (old and new values) of the (k, q) point
    pub fn set_initial_cohesion(&mut self, k: usize, q: usize, cohesion: f64) -> Result<(), StrError> {
        self.lifecycle.check_allocated()?;
        if cohesion < 0.0 {
            return Err("cohesion must be ≥ 0.0");
        }
        match &mut self.actual {
            SolidVariant::ElasticIsotropic(..) => Err("cohesion is not available in the ElasticIsotropic model"),
            SolidVariant::DruckerPrager(m) => m.cohesion_mut().set_initial(k, q, cohesion),
        }
    }

    /// Updates the (k, q) point given the strain increment
    ///
    /// Returns the new stress and the consistent tangent stiffness. The old
    /// state is not modified; thus, calling this function again within the
    /// same step recomputes the update from the same converged state.
    pub fn update(&mut self, k: usize, q: usize, delta_strain: &Voigt) -> Result<(Voigt, Stiffness), StrError> {
        let (stress, stiffness, _) = self.update_with_info(k, q, delta_strain)?;
        Ok((stress, stiffness))
    }

    /// Updates the (k, q) point and also returns diagnostic information
    pub fn update_with_info(
        &mut self,
        k: usize,
        q: usize,
        delta_strain: &Voigt,
    ) -> Result<(Voigt, Stiffness, UpdateInfo), StrError> {
        self.lifecycle.check_allocated()?;
        let p = self.stress_array().checked_index(k, q)?;
        let mut stiffness = Stiffness::zeros();
        let (stress, info) = match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => {
                let (kernel, new_stress) = m.kernel_updates();
                kernel.small_strain_update(k, q, delta_strain, &mut new_stress[p], &mut stiffness);
                (new_stress[p], UpdateInfo::elastic())
            }
            SolidVariant::DruckerPrager(m) => {
                let (kernel, new_stress, new_cohesion) = m.kernel_updates();
                let (sigma, cohesion) = (&mut new_stress[p], &mut new_cohesion[p]);
                let info = kernel.small_strain_update(k, q, delta_strain, sigma, cohesion, &mut stiffness);
                (new_stress[p], info)
            }
        };
        self.lifecycle.register_updates(1);
        Ok((stress, stiffness, info))
    }

    /// Updates all points in parallel
    ///
    /// The arrays are indexed by the flat point index `k · n_integ_point + q`.
    ///
    /// # Input
    ///
    /// * `delta_strains` -- the strain increments (n_point)
    /// * `stresses` -- (output) the new stresses (n_point)
    /// * `stiffnesses` -- (output) the consistent tangent stiffnesses (n_point)
    pub fn update_all(
        &mut self,
        delta_strains: &[Voigt],
        stresses: &mut [Voigt],
        stiffnesses: &mut [Stiffness],
    ) -> Result<UpdateStats, StrError> {
        self.lifecycle.check_allocated()?;
        let n_point = self.n_point();
        if delta_strains.len() != n_point {
            return Err("the number of strain increments must equal the number of points");
        }
        if stresses.len() != n_point {
            return Err("the number of output stresses must equal the number of points");
        }
        if stiffnesses.len() != n_point {
            return Err("the number of output stiffnesses must equal the number of points");
        }
        let stats = match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => {
                let (kernel, new_stress) = m.kernel_updates();
                let nq = kernel.n_integ_point();
                new_stress
                    .par_iter_mut()
                    .zip(stresses.par_iter_mut())
                    .zip(stiffnesses.par_iter_mut())
                    .zip(delta_strains.par_iter())
                    .enumerate()
                    .map(|(p, (((sigma_new, sigma), dd), delta_strain))| {
                        kernel.small_strain_update(p / nq, p % nq, delta_strain, sigma_new, dd);
                        *sigma = *sigma_new;
                        UpdateStats::from(UpdateInfo::elastic())
                    })
                    .reduce(UpdateStats::default, UpdateStats::merge)
            }
            SolidVariant::DruckerPrager(m) => {
                let (kernel, new_stress, new_cohesion) = m.kernel_updates();
                let nq = kernel.elastic().n_integ_point();
                new_stress
                    .par_iter_mut()
                    .zip(new_cohesion.par_iter_mut())
                    .zip(stresses.par_iter_mut())
                    .zip(stiffnesses.par_iter_mut())
                    .zip(delta_strains.par_iter())
                    .enumerate()
                    .map(|(p, ((((sigma_new, c_new), sigma), dd), delta_strain))| {
                        let info = kernel.small_strain_update(p / nq, p % nq, delta_strain, sigma_new, c_new, dd);
                        *sigma = *sigma_new;
                        UpdateStats::from(info)
                    })
                    .reduce(UpdateStats::default, UpdateStats::merge)
            }
        };
        self.lifecycle.register_updates(stats.n_point);
        if stats.n_not_converged > 0 {
            log::warn!(
                "return mapping reached the iteration cap at {} of {} points",
                stats.n_not_converged,
                stats.n_point
            );
        }
        Ok(stats)
    }

    /// Copies the new state into the old state of all points (end of a converged step)
    ///
    /// Must not run concurrently with updates; calling it twice without an update
    /// in between simply copies the same values again.
    pub fn commit_step(&mut self) -> Result<(), StrError> {
        self.lifecycle.register_commit()?;
        match &mut self.actual {
            SolidVariant::ElasticIsotropic(m) => m.save_converged_state(),
            SolidVariant::DruckerPrager(m) => m.save_converged_state(),
        }
        log::debug!("{} model: committed step {}", self.model_name(), self.lifecycle.n_step());
        Ok(())
    }

    /// Returns the old (converged) stress of the (k, q) point
    pub fn stress_old(&self, k: usize, q: usize) -> Result<Voigt, StrError> {
        self.lifecycle.check_allocated()?;
        self.stress_array().old(k, q)
    }

    /// Returns the new (current iterate) stress of the (k, q) point
    pub fn stress_new(&self, k: usize, q: usize) -> Result<Voigt, StrError> {
        self.lifecycle.check_allocated()?;
        self.stress_array().new_value(k, q)
    }

    /// Returns the old (converged) cohesion of the (k, q) point
    pub fn cohesion_old(&self, k: usize, q: usize) -> Result<f64, StrError> {
        self.lifecycle.check_allocated()?;
        match &self.actual {
            SolidVariant::ElasticIsotropic(..) => Err("cohesion is not available in the ElasticIsotropic model"),
            SolidVariant::DruckerPrager(m) => m.cohesion().old(k, q),
        }
    }

    /// Returns the new (current iterate) cohesion of the (k, q) point
    pub fn cohesion_new(&self, k: usize, q: usize) -> Result<f64, StrError> {
        self.lifecycle.check_allocated()?;
        match &self.actual {
            SolidVariant::ElasticIsotropic(..) => Err("cohesion is not available in the ElasticIsotropic model"),
            SolidVariant::DruckerPrager(m) => m.cohesion().new_value(k, q),
        }
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.stress_array().n_element()
    }

    /// Returns the number of integration points per element
    pub fn n_integ_point(&self) -> usize {
        self.stress_array().n_integ_point()
    }

    /// Returns the total number of points
    pub fn n_point(&self) -> usize {
        self.stress_array().n_point()
    }

    /// Returns the number of committed steps
    pub fn n_step(&self) -> usize {
        self.lifecycle.n_step()
    }

    /// Returns the number of point updates since the last commit
    pub fn n_update_since_commit(&self) -> usize {
        self.lifecycle.n_update()
    }

    /// Returns the stress arrays
    fn stress_array(&self) -> &StateArray<Voigt> {
        match &self.actual {
            SolidVariant::ElasticIsotropic(m) => m.stress(),
            SolidVariant::DruckerPrager(m) => m.elastic().stress(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
