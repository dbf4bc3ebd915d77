use russell_lab::approx_eq;
use russell_tensor::SQRT_3_BY_2;
use solidpoint::base::{stiffness_is_symmetric, RETURN_MAPPING_MAX_IT};
use solidpoint::models::stress_decomposition;
use solidpoint::prelude::*;

const BULK: f64 = 10_000.0;
const SHEAR: f64 = 6_000.0;

/// Returns the strain increment leading to the trial (P, Q) from zero stress
///
/// The deviatoric part is aligned with (2, -1, -1)/√6.
fn strain_for_trial(p: f64, q: f64) -> Voigt {
    let vol = p / BULK / 3.0;
    let a = q / (6.0 * SHEAR);
    Voigt::new(vol + 2.0 * a, vol - a, vol - a, 0.0, 0.0, 0.0)
}

/// Returns the von Mises stress with the sign of the projection onto (2, -1, -1)/√6
fn signed_q(sigma: &Voigt) -> f64 {
    let axis = Voigt::new(2.0, -1.0, -1.0, 0.0, 0.0, 0.0) / f64::sqrt(6.0);
    SQRT_3_BY_2 * sigma.dot(&axis)
}

fn param_dp(cohesion: f64, hardening: f64) -> ParamSolid {
    ParamSolid {
        elasticity: ParamElasticity::BulkShear {
            bulk: BULK,
            shear: SHEAR,
        },
        plasticity: Some(ParamPlasticity::Slopes {
            friction: 0.5,
            dilation: 0.5,
            cohesion,
            hardening,
        }),
    }
}

fn model_with_cohesion(cohesion: f64) -> Result<SolidModel, StrError> {
    let param = param_dp(cohesion, -100.0);
    let mut model = SolidModel::new("DruckerPrager", &param)?;
    model.allocate(4, 1)?;
    Ok(model)
}

#[test]
fn test_drucker_prager_zero_trial_is_elastic() -> Result<(), StrError> {
    let mut model = model_with_cohesion(50.0)?;
    let (stress, stiffness, info) = model.update_with_info(0, 2, &strain_for_trial(0.0, 0.0))?;
    assert_eq!(info, UpdateInfo::elastic());
    assert_eq!(stress, Voigt::zeros());
    assert_eq!(model.cohesion_new(0, 2)?, 50.0);
    assert!(stiffness_is_symmetric(&stiffness, 1e-15));
    approx_eq(stiffness[(0, 0)], BULK + 4.0 * SHEAR / 3.0, 1e-12);
    Ok(())
}

#[test]
fn test_drucker_prager_elastic_branch_matches_elastic_model() -> Result<(), StrError> {
    let mut plastic = model_with_cohesion(50.0)?;
    let mut elastic = SolidModel::new("ElasticIsotropic", &ParamSolid::sample_linear_elastic())?;
    elastic.allocate(4, 1)?;
    let initial = Voigt::new(-30.0, -20.0, -25.0, 1.0, -2.0, 3.0);
    plastic.set_initial_stress(0, 1, &initial)?;
    elastic.set_initial_stress(0, 1, &initial)?;

    let delta_strain = Voigt::new(1e-4, -2e-4, 5e-5, 1e-4, 0.0, -1e-4);
    let (sigma_a, dd_a, info) = plastic.update_with_info(0, 1, &delta_strain)?;
    let (sigma_b, dd_b) = elastic.update(0, 1, &delta_strain)?;
    assert!(!info.plastic);
    assert_eq!(sigma_a, sigma_b);
    assert_eq!(dd_a, dd_b);
    assert!(stiffness_is_symmetric(&dd_a, 1e-15));
    Ok(())
}

#[test]
fn test_drucker_prager_softening_engages() -> Result<(), StrError> {
    // trial P = 200 and Q = 300 give f = 300 + 0.5·200 - 50 = 350 > 0
    let mut model = model_with_cohesion(50.0)?;
    let delta_strain = strain_for_trial(200.0, 300.0);
    let (stress, _, info) = model.update_with_info(0, 0, &delta_strain)?;
    assert!(info.plastic);
    assert!(info.converged);
    let cohesion = model.cohesion_new(0, 0)?;
    assert!(cohesion < 50.0);
    assert!(cohesion >= 0.0);

    // the return mapping path: P = P_trial - Λ K dilation and c = c_old + Λ h
    let lambda = (50.0 - cohesion) / 100.0;
    let (p, _, _) = stress_decomposition(&stress);
    approx_eq(p, 200.0 - lambda * BULK * 0.5, 1e-9);

    // the final state lies on the yield surface (Q may change sign along the trial direction)
    approx_eq(signed_q(&stress) + 0.5 * p - cohesion, 0.0, 1e-9);
    approx_eq(signed_q(&stress), 300.0 - lambda * 3.0 * SHEAR, 1e-9);

    // the old state is untouched
    assert_eq!(model.cohesion_old(0, 0)?, 50.0);
    assert_eq!(model.stress_old(0, 0)?, Voigt::zeros());
    Ok(())
}

#[test]
fn test_drucker_prager_cohesion_floor() -> Result<(), StrError> {
    let mut model = model_with_cohesion(1.0)?;
    let (stress, _, info) = model.update_with_info(0, 3, &strain_for_trial(200.0, 300.0))?;
    assert!(info.plastic);
    assert!(info.converged);
    assert_eq!(model.cohesion_new(0, 3)?, 0.0);
    let (p, _, _) = stress_decomposition(&stress);
    approx_eq(signed_q(&stress) + 0.5 * p, 0.0, 1e-9);
    Ok(())
}

#[test]
fn test_drucker_prager_returns_to_yield_surface() -> Result<(), StrError> {
    let mut model = model_with_cohesion(50.0)?;
    for trial_q in [60.0, 100.0, 150.0] {
        let (stress, _, info) = model.update_with_info(0, 0, &strain_for_trial(0.0, trial_q))?;
        assert!(info.plastic);
        assert!(info.converged);
        let cohesion = model.cohesion_new(0, 0)?;
        let (p, q, _) = stress_decomposition(&stress);
        assert!(q > 0.0);
        approx_eq(q + 0.5 * p - cohesion, 0.0, 1e-9);
    }
    Ok(())
}

#[test]
fn test_drucker_prager_iteration_cap_is_reported() -> Result<(), StrError> {
    // hardening = -(3G + K·dilation·friction) gives a singular return-mapping Jacobian
    let hardening = -(3.0 * SHEAR + BULK * 0.5 * 0.5);
    let mut model = SolidModel::new("DruckerPrager", &param_dp(50.0, hardening))?;
    model.allocate(4, 2)?;
    let delta_strain = strain_for_trial(0.0, 180.0);

    // the update itself succeeds
    let (_, _, info) = model.update_with_info(1, 0, &delta_strain)?;
    assert!(info.plastic);
    assert!(!info.converged);
    assert_eq!(info.iterations, RETURN_MAPPING_MAX_IT);
    assert!(model.update(1, 1, &delta_strain).is_ok());

    // the batch update counts all points
    let deltas = vec![delta_strain; 4];
    let mut stresses = vec![Voigt::zeros(); 4];
    let mut stiffnesses = vec![Stiffness::zeros(); 4];
    let stats = model.update_all(&deltas, &mut stresses, &mut stiffnesses)?;
    assert_eq!(stats.n_point, 4);
    assert_eq!(stats.n_not_converged, 4);
    assert_eq!(stats.max_iterations, RETURN_MAPPING_MAX_IT);
    Ok(())
}
