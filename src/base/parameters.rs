use crate::StrError;
use russell_tensor::LinElasticity;
use serde::{Deserialize, Serialize};

/// Holds parameters for isotropic linear elasticity
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamElasticity {
    /// Bulk and shear moduli
    BulkShear {
        /// Bulk modulus K
        bulk: f64,

        /// Shear modulus G
        shear: f64,
    },

    /// Young's modulus and Poisson's coefficient
    YoungPoisson {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },
}

/// Holds parameters for Drucker-Prager plasticity
///
/// The yield function and the plastic potential are written in terms of the
/// mean stress P (tension positive) and the von Mises stress Q:
///
/// ```text
/// F = Q + friction P - cohesion
/// G = Q + dilation P
/// cohesion = max(0, cohesion₀ + hardening Λ)
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamPlasticity {
    /// Mohr-Coulomb-like angles matching the compression meridian
    ///
    /// ```text
    /// friction = 6 sin(φ) / (3 - sin(φ))
    /// dilation = 6 sin(ψ) / (3 - sin(ψ))
    /// cohesion = 6 c cos(φ) / (3 - sin(φ))
    /// ```
    Angles {
        /// Friction angle φ in degrees
        friction_angle: f64,

        /// Dilation angle ψ in degrees
        dilation_angle: f64,

        /// Mohr-Coulomb cohesion c
        cohesion: f64,

        /// Hardening rate (negative for softening)
        hardening: f64,
    },

    /// Slopes of the yield surface and plastic potential in the P-Q plane
    Slopes {
        /// Slope of the yield surface
        friction: f64,

        /// Slope of the plastic potential
        dilation: f64,

        /// Initial cohesion (Q-intercept of the yield surface)
        cohesion: f64,

        /// Hardening rate (negative for softening)
        hardening: f64,
    },
}

/// Holds parameters for solid models
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamSolid {
    /// Elastic parameters (all models)
    pub elasticity: ParamElasticity,

    /// Plastic parameters (required by the Drucker-Prager model)
    pub plasticity: Option<ParamPlasticity>,
}

/// Holds the parameters shared by all integration points of an element
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ElementParameters {
    /// Bulk modulus K
    pub bulk: f64,

    /// Shear modulus G
    pub shear: f64,

    /// Slope of the yield surface
    pub friction: f64,

    /// Slope of the plastic potential
    pub dilation: f64,

    /// Hardening rate of the cohesion
    pub hardening: f64,
}

impl ParamElasticity {
    /// Returns the bulk and shear moduli (K, G)
    pub fn bulk_shear(&self) -> Result<(f64, f64), StrError> {
        let (bulk, shear) = match *self {
            ParamElasticity::BulkShear { bulk, shear } => (bulk, shear),
            ParamElasticity::YoungPoisson { young, poisson } => {
                if young <= 0.0 {
                    return Err("Young's modulus must be > 0.0");
                }
                if poisson <= -1.0 || poisson >= 0.5 {
                    return Err("Poisson's coefficient must be in (-1.0, 0.5)");
                }
                LinElasticity::new(young, poisson, false, false).get_bulk_shear()
            }
        };
        if !(bulk > 0.0) {
            return Err("bulk modulus must be > 0.0");
        }
        if !(shear > 0.0) {
            return Err("shear modulus must be > 0.0");
        }
        Ok((bulk, shear))
    }
}

impl ParamPlasticity {
    /// Returns the slopes, the initial cohesion, and the hardening rate
    ///
    /// Returns `(friction, dilation, cohesion, hardening)`
    pub fn slopes(&self) -> Result<(f64, f64, f64, f64), StrError> {
        match *self {
            ParamPlasticity::Angles {
                friction_angle,
                dilation_angle,
                cohesion,
                hardening,
            } => {
                if friction_angle < 0.0 || friction_angle >= 90.0 {
                    return Err("friction angle must be in [0.0, 90.0)");
                }
                if dilation_angle < 0.0 || dilation_angle > friction_angle {
                    return Err("dilation angle must be in [0.0, friction angle]");
                }
                if cohesion < 0.0 {
                    return Err("cohesion must be ≥ 0.0");
                }
                let sin_phi = f64::sin(friction_angle.to_radians());
                let cos_phi = f64::cos(friction_angle.to_radians());
                let sin_psi = f64::sin(dilation_angle.to_radians());
                Ok((
                    6.0 * sin_phi / (3.0 - sin_phi),
                    6.0 * sin_psi / (3.0 - sin_psi),
                    6.0 * cohesion * cos_phi / (3.0 - sin_phi),
                    hardening,
                ))
            }
            ParamPlasticity::Slopes {
                friction,
                dilation,
                cohesion,
                hardening,
            } => {
                if friction < 0.0 {
                    return Err("friction slope must be ≥ 0.0");
                }
                if dilation < 0.0 {
                    return Err("dilation slope must be ≥ 0.0");
                }
                if cohesion < 0.0 {
                    return Err("cohesion must be ≥ 0.0");
                }
                Ok((friction, dilation, cohesion, hardening))
            }
        }
    }
}

impl ParamSolid {
    /// Returns the element parameters derived from these (default) parameters
    ///
    /// The plastic entries are zero if the plastic parameters are not given.
    pub fn element_parameters(&self) -> Result<ElementParameters, StrError> {
        let (bulk, shear) = self.elasticity.bulk_shear()?;
        let (friction, dilation, hardening) = match self.plasticity {
            Some(p) => {
                let (friction, dilation, _, hardening) = p.slopes()?;
                (friction, dilation, hardening)
            }
            None => (0.0, 0.0, 0.0),
        };
        Ok(ElementParameters {
            bulk,
            shear,
            friction,
            dilation,
            hardening,
        })
    }

    /// Returns the initial cohesion (zero if the plastic parameters are not given)
    pub fn initial_cohesion(&self) -> Result<f64, StrError> {
        match self.plasticity {
            Some(p) => Ok(p.slopes()?.2),
            None => Ok(0.0),
        }
    }

    /// Returns sample parameters for the linear elastic model
    pub fn sample_linear_elastic() -> Self {
        ParamSolid {
            elasticity: ParamElasticity::BulkShear {
                bulk: 10_000.0, // kPa
                shear: 6_000.0, // kPa
            },
            plasticity: None,
        }
    }

    /// Returns sample parameters for the Drucker-Prager model (with softening)
    pub fn sample_drucker_prager() -> Self {
        ParamSolid {
            elasticity: ParamElasticity::BulkShear {
                bulk: 10_000.0, // kPa
                shear: 6_000.0, // kPa
            },
            plasticity: Some(ParamPlasticity::Slopes {
                friction: 0.5,
                dilation: 0.5,
                cohesion: 50.0,    // kPa
                hardening: -100.0, // kPa
            }),
        }
    }
}

impl ElementParameters {
    /// Checks the elastic values
    pub fn validate_elastic(&self) -> Result<(), StrError> {
        if !(self.bulk > 0.0) {
            return Err("bulk modulus must be > 0.0");
        }
        if !(self.shear > 0.0) {
            return Err("shear modulus must be > 0.0");
        }
        Ok(())
    }

    /// Checks the plastic values (ignored by the elastic model)
    pub fn validate_plastic(&self) -> Result<(), StrError> {
        if !(self.friction >= 0.0) {
            return Err("friction slope must be ≥ 0.0");
        }
        if !(self.dilation >= 0.0) {
            return Err("dilation slope must be ≥ 0.0");
        }
        if !self.hardening.is_finite() {
            return Err("hardening rate must be finite");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
