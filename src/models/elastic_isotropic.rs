use crate::base::{elastic_stiffness, ElementParameters, ParamSolid, Stiffness, Voigt};
use crate::state::StateArray;
use crate::StrError;

/// Implements the isotropic linear elastic model
///
/// The bulk and shear moduli are given per element, whereas the stress is
/// stored per integration point (old and new values).
pub struct ElasticIsotropic {
    /// Default bulk modulus
    default_bulk: f64,

    /// Default shear modulus
    default_shear: f64,

    /// Bulk modulus K of each element
    bulk: Vec<f64>,

    /// Shear modulus G of each element
    shear: Vec<f64>,

    /// Elastic rigidity matrix of each element
    rigidity: Vec<Stiffness>,

    /// Stress of each integration point
    stress: StateArray<Voigt>,
}

/// Implements the elastic updates of a single integration point
///
/// This is a light, copyable view into the arrays of an [ElasticIsotropic] instance.
/// It reads the parameters and the old stress only; the new stress is written into
/// the slot given by the caller.
#[derive(Clone, Copy)]
pub struct ElasticIsotropicUpdates<'a> {
    /// Bulk modulus of each element
    bulk: &'a [f64],

    /// Shear modulus of each element
    shear: &'a [f64],

    /// Elastic rigidity matrix of each element
    rigidity: &'a [Stiffness],

    /// Old stress of each integration point
    old_stress: &'a [Voigt],

    /// Number of integration points per element
    n_integ_point: usize,
}

impl ElasticIsotropic {
    /// Allocates a new instance with default parameters (arrays are not sized yet)
    pub fn new(param: &ParamSolid) -> Result<Self, StrError> {
        let (bulk, shear) = param.elasticity.bulk_shear()?;
        Ok(ElasticIsotropic {
            default_bulk: bulk,
            default_shear: shear,
            bulk: Vec::new(),
            shear: Vec::new(),
            rigidity: Vec::new(),
            stress: StateArray::new(),
        })
    }

    /// Sizes the arrays, sets the default parameters, and zeroes the stress
    pub fn allocate(&mut self, n_element: usize, n_integ_point: usize) {
        self.bulk = vec![self.default_bulk; n_element];
        self.shear = vec![self.default_shear; n_element];
        self.rigidity = vec![elastic_stiffness(self.default_bulk, self.default_shear); n_element];
        self.stress.allocate(n_element, n_integ_point, Voigt::zeros());
    }

    /// Sets the elastic parameters of an element
    pub fn set_element_parameters(&mut self, k: usize, param: &ElementParameters) -> Result<(), StrError> {
        if k >= self.bulk.len() {
            return Err("element index is out of range");
        }
        param.validate_elastic()?;
        self.bulk[k] = param.bulk;
        self.shear[k] = param.shear;
        self.rigidity[k] = elastic_stiffness(param.bulk, param.shear);
        Ok(())
    }

    /// Returns the bulk and shear moduli of an element
    pub fn moduli(&self, k: usize) -> Result<(f64, f64), StrError> {
        if k >= self.bulk.len() {
            return Err("element index is out of range");
        }
        Ok((self.bulk[k], self.shear[k]))
    }

    /// Returns access to the stress arrays
    pub fn stress(&self) -> &StateArray<Voigt> {
        &self.stress
    }

    /// Returns mutable access to the stress arrays
    pub fn stress_mut(&mut self) -> &mut StateArray<Voigt> {
        &mut self.stress
    }

    /// Creates the update view and returns it together with the new-stress slots
    pub fn kernel_updates(&mut self) -> (ElasticIsotropicUpdates<'_>, &mut [Voigt]) {
        let n_integ_point = self.stress.n_integ_point();
        let (old_stress, new_stress) = self.stress.split_mut();
        let updates = ElasticIsotropicUpdates {
            bulk: &self.bulk,
            shear: &self.shear,
            rigidity: &self.rigidity,
            old_stress,
            n_integ_point,
        };
        (updates, new_stress)
    }

    /// Copies the new stress into the old stress
    pub fn save_converged_state(&mut self) {
        self.stress.commit();
    }
}

impl<'a> ElasticIsotropicUpdates<'a> {
    /// Returns the number of integration points per element
    pub fn n_integ_point(&self) -> usize {
        self.n_integ_point
    }

    /// Returns the flat index of the (k, q) point
    #[inline]
    pub fn point_index(&self, k: usize, q: usize) -> usize {
        k * self.n_integ_point + q
    }

    /// Returns the bulk modulus of element k
    #[inline]
    pub fn bulk_modulus(&self, k: usize) -> f64 {
        self.bulk[k]
    }

    /// Returns the shear modulus of element k
    #[inline]
    pub fn shear_modulus(&self, k: usize) -> f64 {
        self.shear[k]
    }

    /// Returns the old stress of the (k, q) point
    #[inline]
    pub fn old_stress(&self, k: usize, q: usize) -> &Voigt {
        &self.old_stress[self.point_index(k, q)]
    }

    /// Returns the elastic stiffness of element k
    #[inline]
    pub fn elastic_stiffness(&self, k: usize) -> &Stiffness {
        &self.rigidity[k]
    }

    /// Calculates the stress from the total strain without reading or writing any state
    ///
    /// ```text
    /// σ = D · ε
    /// ```
    pub fn small_strain_no_state_update(
        &self,
        k: usize,
        strain: &Voigt,
        stress: &mut Voigt,
        stiffness: &mut Stiffness,
    ) {
        *stiffness = *self.elastic_stiffness(k);
        *stress = *stiffness * strain;
    }

    /// Updates the stress of the (k, q) point given the strain increment
    ///
    /// ```text
    /// σ_new = σ_old + D · Δε
    /// ```
    ///
    /// The result is written into `new_stress`; the old stress is not modified.
    #[inline]
    pub fn small_strain_update(
        &self,
        k: usize,
        q: usize,
        delta_strain: &Voigt,
        new_stress: &mut Voigt,
        stiffness: &mut Stiffness,
    ) {
        *stiffness = *self.elastic_stiffness(k);
        *new_stress = self.old_stress(k, q) + *stiffness * delta_strain;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElasticIsotropic;
    use crate::base::{elastic_stiffness, stiffness_is_symmetric, ElementParameters, ParamSolid, Stiffness, Voigt};
    use russell_lab::{approx_eq, array_approx_eq};

    #[test]
    fn allocate_and_set_parameters_work() {
        let param = ParamSolid::sample_linear_elastic();
        let mut model = ElasticIsotropic::new(&param).unwrap();
        model.allocate(2, 3);
        assert_eq!(model.stress().n_point(), 6);
        assert_eq!(model.moduli(1), Ok((10_000.0, 6_000.0)));
        let p = ElementParameters {
            bulk: 200.0,
            shear: 100.0,
            friction: 0.0,
            dilation: 0.0,
            hardening: 0.0,
        };
        model.set_element_parameters(1, &p).unwrap();
        assert_eq!(model.moduli(1), Ok((200.0, 100.0)));
        assert_eq!(model.moduli(0), Ok((10_000.0, 6_000.0)));
        assert_eq!(model.moduli(2).err(), Some("element index is out of range"));
        assert_eq!(
            model.set_element_parameters(2, &p).err(),
            Some("element index is out of range")
        );

        // the cached rigidity follows the new moduli
        let (kernel, _) = model.kernel_updates();
        assert_eq!(*kernel.elastic_stiffness(1), elastic_stiffness(200.0, 100.0));
        assert_eq!(*kernel.elastic_stiffness(0), elastic_stiffness(10_000.0, 6_000.0));
    }

    #[test]
    fn set_element_parameters_ignores_plastic_values() {
        let param = ParamSolid::sample_linear_elastic();
        let mut model = ElasticIsotropic::new(&param).unwrap();
        model.allocate(1, 1);
        let mut p = ElementParameters {
            bulk: 300.0,
            shear: 150.0,
            friction: -1.0,
            dilation: -2.0,
            hardening: f64::NAN,
        };
        model.set_element_parameters(0, &p).unwrap();
        assert_eq!(model.moduli(0), Ok((300.0, 150.0)));
        p.shear = 0.0;
        assert_eq!(
            model.set_element_parameters(0, &p).err(),
            Some("shear modulus must be > 0.0")
        );
        assert_eq!(model.moduli(0), Ok((300.0, 150.0)));
    }

    #[test]
    fn small_strain_update_works() {
        let param = ParamSolid::sample_linear_elastic();
        let mut model = ElasticIsotropic::new(&param).unwrap();
        model.allocate(1, 2);
        let initial = Voigt::new(-10.0, -10.0, -20.0, 0.0, 0.0, 1.0);
        model.stress_mut().set_initial(0, 1, initial).unwrap();

        let delta_strain = Voigt::new(0.001, 0.0, 0.0, 0.0, 0.0, 0.002);
        let mut stiffness = Stiffness::zeros();
        {
            let (kernel, new_stress) = model.kernel_updates();
            let p = kernel.point_index(0, 1);
            kernel.small_strain_update(0, 1, &delta_strain, &mut new_stress[p], &mut stiffness);
        }

        // λ = K - 2G/3 = 6000, λ + 2G = 18000
        let correct = [-10.0 + 18.0, -10.0 + 6.0, -20.0 + 6.0, 0.0, 0.0, 1.0 + 12.0];
        array_approx_eq(model.stress().new_value(0, 1).unwrap().as_slice(), &correct, 1e-12);
        assert_eq!(model.stress().old(0, 1).unwrap(), initial);
        assert!(stiffness_is_symmetric(&stiffness, 1e-15));
        approx_eq(stiffness[(0, 0)], 18_000.0, 1e-12);

        model.save_converged_state();
        array_approx_eq(model.stress().old(0, 1).unwrap().as_slice(), &correct, 1e-12);
    }

    #[test]
    fn small_strain_no_state_update_works() {
        let param = ParamSolid::sample_linear_elastic();
        let mut model = ElasticIsotropic::new(&param).unwrap();
        model.allocate(1, 1);
        model.stress_mut().set_initial(0, 0, Voigt::repeat(1.0)).unwrap();
        let (kernel, _) = model.kernel_updates();
        let strain = Voigt::new(0.0, 0.0, 0.0, 0.001, 0.0, 0.0);
        let mut stress = Voigt::zeros();
        let mut stiffness = Stiffness::zeros();
        kernel.small_strain_no_state_update(0, &strain, &mut stress, &mut stiffness);
        array_approx_eq(stress.as_slice(), &[0.0, 0.0, 0.0, 6.0, 0.0, 0.0], 1e-12);
    }
}
