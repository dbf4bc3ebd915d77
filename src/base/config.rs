use super::{ParamSolid, Voigt, N_VOIGT};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds the configuration of a solid model as given in input files
///
/// # Example (JSON)
///
/// ```json
/// {
///   "model": "DruckerPrager",
///   "param": {
///     "elasticity": { "BulkShear": { "bulk": 10000.0, "shear": 6000.0 } },
///     "plasticity": { "Slopes": { "friction": 0.5, "dilation": 0.5, "cohesion": 50.0, "hardening": -100.0 } }
///   }
/// }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Name of the model in the catalog
    pub model: String,

    /// Default parameters applied to all elements
    pub param: ParamSolid,
}

/// Holds the input data for the material-point driver
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DriverInput {
    /// Model configuration
    pub config: ModelConfig,

    /// Number of elements
    pub n_element: usize,

    /// Number of integration points per element
    pub n_integ_point: usize,

    /// Initial stress applied to all points
    #[serde(default)]
    pub initial_stress: Option<[f64; N_VOIGT]>,

    /// Strain increments (engineering shear strains), one per step
    pub increments: Vec<[f64; N_VOIGT]>,
}

impl ModelConfig {
    /// Parses the configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, StrError> {
        serde_json::from_str(json).map_err(|_| "cannot parse JSON model configuration")
    }

    /// Reads the configuration from a JSON file
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open JSON file")?;
        let buffered = BufReader::new(input);
        serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON model configuration")
    }
}

impl DriverInput {
    /// Parses the driver input from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, StrError> {
        let input: DriverInput = serde_json::from_str(json).map_err(|_| "cannot parse JSON driver input")?;
        input.validate()?;
        Ok(input)
    }

    /// Reads the driver input from a JSON file
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open JSON file")?;
        let buffered = BufReader::new(input);
        let input: DriverInput =
            serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON driver input")?;
        input.validate()?;
        Ok(input)
    }

    /// Returns the initial stress as a Voigt vector
    pub fn initial_stress(&self) -> Option<Voigt> {
        self.initial_stress.map(Voigt::from)
    }

    /// Returns the strain increments as Voigt vectors
    pub fn delta_strains(&self) -> Vec<Voigt> {
        self.increments.iter().map(|d| Voigt::from(*d)).collect()
    }

    /// Checks the mesh sizes
    fn validate(&self) -> Result<(), StrError> {
        if self.n_element == 0 {
            return Err("n_element must be ≥ 1");
        }
        if self.n_integ_point == 0 {
            return Err("n_integ_point must be ≥ 1");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{DriverInput, ModelConfig};
    use crate::base::{ParamElasticity, ParamPlasticity, ParamSolid, Voigt};

    const CONFIG: &str = r#"{
        "model": "DruckerPrager",
        "param": {
            "elasticity": { "BulkShear": { "bulk": 10000.0, "shear": 6000.0 } },
            "plasticity": { "Slopes": { "friction": 0.5, "dilation": 0.5, "cohesion": 50.0, "hardening": -100.0 } }
        }
    }"#;

    #[test]
    fn from_json_str_works() {
        let config = ModelConfig::from_json_str(CONFIG).unwrap();
        assert_eq!(config.model, "DruckerPrager");
        match config.param.elasticity {
            ParamElasticity::BulkShear { bulk, shear } => assert_eq!((bulk, shear), (10_000.0, 6_000.0)),
            _ => panic!("BulkShear expected"),
        }
        match config.param.plasticity {
            Some(ParamPlasticity::Slopes { hardening, .. }) => assert_eq!(hardening, -100.0),
            _ => panic!("Slopes expected"),
        }
    }

    #[test]
    fn from_json_str_captures_errors() {
        assert_eq!(
            ModelConfig::from_json_str("{ \"model\": 1 }").err(),
            Some("cannot parse JSON model configuration")
        );
        assert_eq!(
            ModelConfig::read_json("/tmp/solidpoint/__not_found__.json").err(),
            Some("cannot open JSON file")
        );
    }

    #[test]
    fn serialize_and_parse_work() {
        let config = ModelConfig {
            model: "ElasticIsotropic".to_string(),
            param: ParamSolid::sample_linear_elastic(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back = ModelConfig::from_json_str(&json).unwrap();
        assert_eq!(back.model, "ElasticIsotropic");
        assert!(back.param.plasticity.is_none());
    }

    #[test]
    fn driver_input_works() {
        let json = format!(
            r#"{{ "config": {}, "n_element": 2, "n_integ_point": 4,
                 "increments": [[0.001, 0.0, 0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0, 0.0, 0.002]] }}"#,
            CONFIG
        );
        let input = DriverInput::from_json_str(&json).unwrap();
        assert_eq!(input.n_element, 2);
        assert_eq!(input.n_integ_point, 4);
        assert_eq!(
            input.delta_strains(),
            vec![
                Voigt::new(0.001, 0.0, 0.0, 0.0, 0.0, 0.0),
                Voigt::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.002)
            ]
        );
        assert!(input.initial_stress().is_none());

        let json = format!(
            r#"{{ "config": {}, "n_element": 1, "n_integ_point": 1,
                 "initial_stress": [-10.0, -10.0, -10.0, 0.0, 0.0, 1.0], "increments": [] }}"#,
            CONFIG
        );
        let input = DriverInput::from_json_str(&json).unwrap();
        assert_eq!(
            input.initial_stress(),
            Some(Voigt::new(-10.0, -10.0, -10.0, 0.0, 0.0, 1.0))
        );
        assert!(input.delta_strains().is_empty());

        let json = format!(
            r#"{{ "config": {}, "n_element": 0, "n_integ_point": 4, "increments": [] }}"#,
            CONFIG
        );
        assert_eq!(DriverInput::from_json_str(&json).err(), Some("n_element must be ≥ 1"));
    }
}
