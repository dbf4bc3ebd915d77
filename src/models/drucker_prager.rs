use super::{stress_decomposition, stress_recomposition, ElasticIsotropic, ElasticIsotropicUpdates, UpdateInfo};
use crate::base::{identity_voigt, ElementParameters, ParamSolid, Stiffness, Voigt};
use crate::base::{RETURN_MAPPING_MAX_IT, RETURN_MAPPING_TOL, YIELD_TOL};
use crate::state::StateArray;
use crate::StrError;
use nalgebra::{Matrix3, Vector3};
use russell_tensor::SQRT_2_BY_3;

/// Implements the Drucker-Prager elastoplastic model
///
/// The yield function and the plastic potential are written in terms of the
/// mean stress P and the von Mises stress Q:
///
/// ```text
/// F = Q + friction P - c
/// G = Q + dilation P
/// c = max(0, c_old + hardening Λ)
/// ```
///
/// The elastic behavior is given by [ElasticIsotropic].
pub struct DruckerPrager {
    /// Elastic model (holds the moduli and the stress)
    elastic: ElasticIsotropic,

    /// Default parameters of all elements
    defaults: ElementParameters,

    /// Default initial cohesion
    default_cohesion: f64,

    /// Slope of the yield surface of each element
    friction: Vec<f64>,

    /// Slope of the plastic potential of each element
    dilation: Vec<f64>,

    /// Hardening rate of each element
    hardening: Vec<f64>,

    /// Cohesion of each integration point
    cohesion: StateArray<f64>,
}

/// Implements the Drucker-Prager updates of a single integration point
///
/// This is a light, copyable view into the arrays of a [DruckerPrager] instance.
#[derive(Clone, Copy)]
pub struct DruckerPragerUpdates<'a> {
    /// Elastic updates (predictor)
    elastic: ElasticIsotropicUpdates<'a>,

    /// Slope of the yield surface of each element
    friction: &'a [f64],

    /// Slope of the plastic potential of each element
    dilation: &'a [f64],

    /// Hardening rate of each element
    hardening: &'a [f64],

    /// Old cohesion of each integration point
    old_cohesion: &'a [f64],
}

impl DruckerPrager {
    /// Allocates a new instance with default parameters (arrays are not sized yet)
    pub fn new(param: &ParamSolid) -> Result<Self, StrError> {
        if param.plasticity.is_none() {
            return Err("the DruckerPrager model requires plasticity parameters");
        }
        let defaults = param.element_parameters()?;
        defaults.validate_plastic()?;
        Ok(DruckerPrager {
            elastic: ElasticIsotropic::new(param)?,
            defaults,
            default_cohesion: param.initial_cohesion()?,
            friction: Vec::new(),
            dilation: Vec::new(),
            hardening: Vec::new(),
            cohesion: StateArray::new(),
        })
    }

    /// Sizes the arrays and sets the default parameters and the initial cohesion
    pub fn allocate(&mut self, n_element: usize, n_integ_point: usize) {
        self.elastic.allocate(n_element, n_integ_point);
        self.friction = vec![self.defaults.friction; n_element];
        self.dilation = vec![self.defaults.dilation; n_element];
        self.hardening = vec![self.defaults.hardening; n_element];
        self.cohesion.allocate(n_element, n_integ_point, self.default_cohesion);
    }

    /// Sets the parameters of an element
    ///
    /// Nothing is changed if any value is invalid.
    pub fn set_element_parameters(&mut self, k: usize, param: &ElementParameters) -> Result<(), StrError> {
        param.validate_plastic()?;
        self.elastic.set_element_parameters(k, param)?;
        self.friction[k] = param.friction;
        self.dilation[k] = param.dilation;
        self.hardening[k] = param.hardening;
        Ok(())
    }

    /// Returns the parameters of an element
    pub fn element_parameters(&self, k: usize) -> Result<ElementParameters, StrError> {
        let (bulk, shear) = self.elastic.moduli(k)?;
        Ok(ElementParameters {
            bulk,
            shear,
            friction: self.friction[k],
            dilation: self.dilation[k],
            hardening: self.hardening[k],
        })
    }

    /// Returns access to the elastic model
    pub fn elastic(&self) -> &ElasticIsotropic {
        &self.elastic
    }

    /// Returns mutable access to the elastic model
    pub fn elastic_mut(&mut self) -> &mut ElasticIsotropic {
        &mut self.elastic
    }

    /// Returns access to the cohesion arrays
    pub fn cohesion(&self) -> &StateArray<f64> {
        &self.cohesion
    }

    /// Returns mutable access to the cohesion arrays
    pub fn cohesion_mut(&mut self) -> &mut StateArray<f64> {
        &mut self.cohesion
    }

    /// Creates the update view and returns it together with the new-stress and new-cohesion slots
    pub fn kernel_updates(&mut self) -> (DruckerPragerUpdates<'_>, &mut [Voigt], &mut [f64]) {
        let (elastic, new_stress) = self.elastic.kernel_updates();
        let (old_cohesion, new_cohesion) = self.cohesion.split_mut();
        let updates = DruckerPragerUpdates {
            elastic,
            friction: &self.friction,
            dilation: &self.dilation,
            hardening: &self.hardening,
            old_cohesion,
        };
        (updates, new_stress, new_cohesion)
    }

    /// Copies the new stress and cohesion into the old values
    pub fn save_converged_state(&mut self) {
        self.elastic.save_converged_state();
        self.cohesion.commit();
    }
}

impl<'a> DruckerPragerUpdates<'a> {
    /// Returns the elastic updates
    pub fn elastic(&self) -> &ElasticIsotropicUpdates<'a> {
        &self.elastic
    }

    /// Evaluates the yield function using the old cohesion of the (k, q) point
    pub fn yield_function(&self, k: usize, q: usize, sigma: &Voigt) -> f64 {
        let (p, qq, _) = stress_decomposition(sigma);
        qq + self.friction[k] * p - self.old_cohesion[self.elastic.point_index(k, q)]
    }

    /// Updates the stress and cohesion of the (k, q) point given the strain increment
    ///
    /// The trial (elastic) stress is returned to the yield surface by solving
    /// for x = (P, Q, Λ) with Newton's method:
    ///
    /// ```text
    /// r₀ = P - P_trial + Λ K dilation
    /// r₁ = Q - Q_trial + Λ 3 G
    /// r₂ = Q + friction P - c(Λ)
    /// ```
    ///
    /// **Notes:**
    ///
    /// 1. The iterations stop silently at the iteration cap; see [UpdateInfo::converged]
    /// 2. A singular Jacobian makes the iterates non-finite and the iterations run up to the cap
    /// 3. The tangent is undefined (non-finite) if the trial von Mises stress is zero
    pub fn small_strain_update(
        &self,
        k: usize,
        q: usize,
        delta_strain: &Voigt,
        new_stress: &mut Voigt,
        new_cohesion: &mut f64,
        stiffness: &mut Stiffness,
    ) -> UpdateInfo {
        // elastic predictor
        self.elastic.small_strain_update(k, q, delta_strain, new_stress, stiffness);

        // check the yield function with the old cohesion
        let old_cohesion = self.old_cohesion[self.elastic.point_index(k, q)];
        if self.yield_function(k, q, new_stress) < YIELD_TOL {
            *new_cohesion = old_cohesion;
            return UpdateInfo::elastic();
        }

        // return mapping
        let (trial_p, trial_q, direction) = stress_decomposition(new_stress);
        let kk = self.elastic.bulk_modulus(k);
        let gg = self.elastic.shear_modulus(k);
        let friction = self.friction[k];
        let dilation = self.dilation[k];
        let hardening = self.hardening[k];
        let mut x = Vector3::new(trial_p, trial_q, 0.0);
        #[rustfmt::skip]
        let mut jj = Matrix3::new(
            1.0,      0.0, kk * dilation,
            0.0,      1.0, 3.0 * gg,
            friction, 1.0, 0.0, // the last entry depends on the cohesion branch
        );
        let mut jj_inv = Matrix3::zeros();
        let mut norm_zero = 0.0;
        let mut iterations = RETURN_MAPPING_MAX_IT;
        let mut converged = false;
        for it in 0..RETURN_MAPPING_MAX_IT {
            let (cohesion, d_cohesion) = cohesion_and_derivative(old_cohesion, hardening, x[2]);
            let r = Vector3::new(
                x[0] - trial_p + x[2] * kk * dilation,
                x[1] - trial_q + x[2] * 3.0 * gg,
                x[1] + friction * x[0] - cohesion,
            );
            jj[(2, 2)] = -d_cohesion;
            jj_inv = jj.try_inverse().unwrap_or_else(|| Matrix3::repeat(f64::NAN));
            let norm = r.norm();
            if it == 0 {
                norm_zero = norm;
            }
            if norm < RETURN_MAPPING_TOL * (norm_zero + 1.0) {
                iterations = it;
                converged = true;
                break;
            }
            x -= jj_inv * r;
        }
        *new_cohesion = cohesion_and_derivative(old_cohesion, hardening, x[2]).0;

        // σ = P I + √(2/3) Q n̂
        stress_recomposition(new_stress, x[0], x[1], &direction);

        // consistent tangent stiffness
        let c1 = 2.0 * gg * x[1] / trial_q;
        let c2 = jj_inv[(0, 0)] * kk - c1 / 3.0;
        let c3 = SQRT_2_BY_3 * 3.0 * gg * jj_inv[(0, 1)];
        let c4 = SQRT_2_BY_3 * kk * jj_inv[(1, 0)];
        let c5 = 2.0 * gg * jj_inv[(1, 1)] - c1;
        let id = identity_voigt();
        let n = &direction;
        let diagonal = Voigt::new(c1, c1, c1, 0.5 * c1, 0.5 * c1, 0.5 * c1);
        *stiffness = c2 * id * id.transpose()
            + c3 * id * n.transpose()
            + c4 * n * id.transpose()
            + c5 * n * n.transpose()
            + Stiffness::from_diagonal(&diagonal);
        UpdateInfo {
            plastic: true,
            iterations,
            converged,
        }
    }
}

/// Returns the cohesion and its derivative with respect to Λ
///
/// The cohesion cannot be negative; once exhausted, the derivative is zero.
#[inline]
fn cohesion_and_derivative(old_cohesion: f64, hardening: f64, lambda: f64) -> (f64, f64) {
    let cohesion = old_cohesion + lambda * hardening;
    if cohesion < 0.0 {
        (0.0, 0.0)
    } else {
        (cohesion, hardening)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
