use crate::base::{identity_voigt, Voigt};
use russell_tensor::{SQRT_2_BY_3, SQRT_3_BY_2};

/// Decomposes the stress into the mean stress, the von Mises stress, and the deviatoric direction
///
/// ```text
/// P = tr(σ) / 3
/// s = σ - P I
/// Q = √(3/2) ‖s‖
/// n̂ = s / ‖s‖
/// ```
///
/// The norm accounts for the shear components twice. If `‖s‖ = 0`, the direction is returned as zero.
///
/// Returns `(P, Q, n̂)`
#[inline]
pub fn stress_decomposition(sigma: &Voigt) -> (f64, f64, Voigt) {
    let p = sigma.fixed_rows::<3>(0).sum() / 3.0;
    let dev = sigma - p * identity_voigt();
    let norm = f64::sqrt(dev.fixed_rows::<3>(0).norm_squared() + 2.0 * dev.fixed_rows::<3>(3).norm_squared());
    let direction = if norm > 0.0 { dev / norm } else { Voigt::zeros() };
    (p, SQRT_3_BY_2 * norm, direction)
}

/// Re-composes the stress from the mean stress, the von Mises stress, and the deviatoric direction
///
/// ```text
/// σ = P I + √(2/3) Q n̂
/// ```
#[inline]
pub fn stress_recomposition(sigma: &mut Voigt, p: f64, q: f64, direction: &Voigt) {
    *sigma = p * identity_voigt() + (SQRT_2_BY_3 * q) * direction;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
