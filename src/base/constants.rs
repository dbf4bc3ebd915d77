/// Holds the number of components of a symmetric second-order tensor in Voigt notation
pub const N_VOIGT: usize = 6;

/// Holds the yield function tolerance below which the trial state is regarded as elastic
pub const YIELD_TOL: f64 = 1e-9;

/// Holds the maximum number of Newton iterations of the return mapping
pub const RETURN_MAPPING_MAX_IT: usize = 20;

/// Holds the relative tolerance of the return mapping
///
/// The iterations stop when:
///
/// ```text
/// ‖r‖ < TOL · (‖r₀‖ + 1)
/// ```
pub const RETURN_MAPPING_TOL: f64 = 1e-8;

/// Holds the name of the linear elastic model in the catalog
pub const NAME_ELASTIC_ISOTROPIC: &str = "ElasticIsotropic";

/// Holds the name of the Drucker-Prager model in the catalog
pub const NAME_DRUCKER_PRAGER: &str = "DruckerPrager";
