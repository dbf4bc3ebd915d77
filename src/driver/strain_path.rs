use crate::base::{voigt_to_tensor2, DriverInput, Stiffness, Voigt};
use crate::models::{SolidModel, SolidVariant, UpdateStats};
use crate::StrError;
use std::fmt;

/// Holds the state of the monitored point at the end of a step
#[derive(Clone, Copy, Debug)]
pub struct PathRecord {
    /// Stress (Voigt components)
    pub stress: Voigt,

    /// Mean stress P = tr(σ)/3
    pub p: f64,

    /// von Mises stress Q
    pub q: f64,

    /// Cohesion (None for models without cohesion)
    pub cohesion: Option<f64>,

    /// Indicates plastic loading in this step
    pub plastic: bool,
}

/// Applies a sequence of strain increments to all points of a solid model
///
/// Each step runs the batch update followed by the commit. The same increment
/// is applied to every point, and the history of point (0, 0) is recorded
/// (the first record holds the initial state).
pub struct StrainPathDriver {
    /// Holds the solid model
    model: SolidModel,

    /// Auxiliary strain increments (n_point)
    delta_strains: Vec<Voigt>,

    /// Holds the updated stresses (n_point)
    stresses: Vec<Voigt>,

    /// Holds the consistent tangent stiffnesses (n_point)
    stiffnesses: Vec<Stiffness>,

    /// Holds the history of point (0, 0)
    pub history: Vec<PathRecord>,

    /// Holds the statistics of each step
    pub stats: Vec<UpdateStats>,
}

impl StrainPathDriver {
    /// Allocates a new instance from the input data
    pub fn new(input: &DriverInput) -> Result<Self, StrError> {
        let mut model = SolidModel::from_config(&input.config)?;
        let n_point = input.n_element * input.n_integ_point;
        model.allocate(n_point, input.n_element)?;
        if let Some(sigma) = input.initial_stress() {
            for k in 0..input.n_element {
                for q in 0..input.n_integ_point {
                    model.set_initial_stress(k, q, &sigma)?;
                }
            }
        }
        StrainPathDriver::from_model(model)
    }

    /// Allocates a new instance given an allocated model
    pub fn from_model(model: SolidModel) -> Result<Self, StrError> {
        let n_point = model.n_point();
        if n_point == 0 {
            return Err("model arrays must be allocated before use");
        }
        let mut driver = StrainPathDriver {
            model,
            delta_strains: vec![Voigt::zeros(); n_point],
            stresses: vec![Voigt::zeros(); n_point],
            stiffnesses: vec![Stiffness::zeros(); n_point],
            history: Vec::new(),
            stats: Vec::new(),
        };
        let stress = driver.model.stress_old(0, 0)?;
        driver.record(stress, false)?;
        Ok(driver)
    }

    /// Applies one strain increment to all points and commits the step
    pub fn step(&mut self, delta_strain: &Voigt) -> Result<UpdateStats, StrError> {
        self.delta_strains.iter_mut().for_each(|d| *d = *delta_strain);
        let stats = self
            .model
            .update_all(&self.delta_strains, &mut self.stresses, &mut self.stiffnesses)?;
        self.model.commit_step()?;
        let stress = self.stresses[0];
        self.record(stress, stats.n_plastic > 0)?;
        self.stats.push(stats);
        Ok(stats)
    }

    /// Applies all strain increments
    pub fn run(&mut self, increments: &[Voigt]) -> Result<(), StrError> {
        for delta_strain in increments {
            self.step(delta_strain)?;
        }
        Ok(())
    }

    /// Returns access to the model
    pub fn model(&self) -> &SolidModel {
        &self.model
    }

    /// Appends a record computing the invariants with the tensor representation
    fn record(&mut self, stress: Voigt, plastic: bool) -> Result<(), StrError> {
        let tt = voigt_to_tensor2(&stress)?;
        let cohesion = match self.model.actual {
            SolidVariant::DruckerPrager(..) => Some(self.model.cohesion_old(0, 0)?),
            SolidVariant::ElasticIsotropic(..) => None,
        };
        self.history.push(PathRecord {
            stress,
            p: tt.invariant_sigma_m(),
            q: tt.invariant_sigma_d(),
            cohesion,
            plastic,
        });
        Ok(())
    }
}

impl fmt::Display for StrainPathDriver {
    /// Returns a table with the history of point (0, 0)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>13} {:>13} {:>13} {:>13} {:>13} {:>8} {:>13}",
            "step", "σxx", "σyy", "σzz", "P", "Q", "plastic", "cohesion"
        )?;
        for (i, r) in self.history.iter().enumerate() {
            let cohesion = match r.cohesion {
                Some(c) => format!("{:>13.6e}", c),
                None => format!("{:>13}", "-"),
            };
            writeln!(
                f,
                "{:>5} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>8} {}",
                i, r.stress[0], r.stress[1], r.stress[2], r.p, r.q, r.plastic, cohesion
            )?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
