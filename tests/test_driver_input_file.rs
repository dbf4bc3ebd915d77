use russell_lab::{approx_eq, array_approx_eq};
use solidpoint::models::stress_decomposition;
use solidpoint::prelude::*;

#[test]
fn test_driver_input_file() -> Result<(), StrError> {
    let input = DriverInput::read_json("data/drucker_prager_shear.json")?;
    assert_eq!(input.config.model, "DruckerPrager");
    assert_eq!(input.increments.len(), 7);

    let mut driver = StrainPathDriver::new(&input)?;
    driver.run(&input.delta_strains())?;
    assert_eq!(driver.history.len(), 8);
    assert_eq!(driver.model().n_step(), 7);

    // all points follow the same path
    let model = driver.model();
    for k in 0..4 {
        for q in 0..4 {
            array_approx_eq(model.stress_old(k, q)?.as_slice(), driver.history[7].stress.as_slice(), 1e-15);
        }
    }

    // the first step is elastic, the following ones are plastic
    assert!(!driver.history[1].plastic);
    assert!(driver.history[2..].iter().all(|r| r.plastic));
    for stats in &driver.stats {
        assert_eq!(stats.n_not_converged, 0);
    }

    // plastic states lie on the yield surface
    for r in &driver.history[2..] {
        let (p, q, _) = stress_decomposition(&r.stress);
        approx_eq(r.p, p, 1e-10);
        approx_eq(r.q, q, 1e-10);
        let cohesion = r.cohesion.unwrap_or(f64::NAN);
        approx_eq(q + 0.5 * p - cohesion, 0.0, 1e-8);
        assert!(cohesion < 50.0);
    }
    Ok(())
}

#[test]
fn test_driver_input_file_missing() {
    assert_eq!(
        DriverInput::read_json("data/__not_there__.json").err(),
        Some("cannot open JSON file")
    );
}
