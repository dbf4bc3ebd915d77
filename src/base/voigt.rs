use super::N_VOIGT;
use crate::StrError;
use nalgebra::{SMatrix, SVector};
use russell_tensor::{Mandel, Tensor2};

/// Defines a symmetric second-order tensor in Voigt notation
///
/// The components are ordered as follows:
///
/// ```text
/// [xx, yy, zz, yz, xz, xy]
/// ```
///
/// Stresses store the tensor components. Strain increments store the
/// engineering shear strains, i.e., `γij = 2 εij`.
pub type Voigt = SVector<f64, N_VOIGT>;

/// Defines a 6×6 stiffness matrix relating Voigt stresses to Voigt (engineering) strains
pub type Stiffness = SMatrix<f64, N_VOIGT, N_VOIGT>;

/// Returns the second-order identity tensor in Voigt notation
#[inline]
pub fn identity_voigt() -> Voigt {
    Voigt::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0)
}

/// Calculates the isotropic linear elastic stiffness given the bulk and shear moduli
///
/// ```text
/// λ = K - 2 G / 3
///
///     ┌                                    ┐
///     │ λ+2G   λ     λ     0    0    0     │
///     │  λ    λ+2G   λ     0    0    0     │
/// D = │  λ     λ    λ+2G   0    0    0     │
///     │  0     0     0     G    0    0     │
///     │  0     0     0     0    G    0     │
///     │  0     0     0     0    0    G     │
///     └                                    ┘
/// ```
pub fn elastic_stiffness(bulk: f64, shear: f64) -> Stiffness {
    let lambda = bulk - 2.0 * shear / 3.0;
    let ii = identity_voigt();
    let diagonal = Voigt::new(2.0 * shear, 2.0 * shear, 2.0 * shear, shear, shear, shear);
    lambda * ii * ii.transpose() + Stiffness::from_diagonal(&diagonal)
}

/// Returns whether the stiffness matrix is symmetric within a tolerance
pub fn stiffness_is_symmetric(dd: &Stiffness, tol: f64) -> bool {
    (dd - dd.transpose()).amax() <= tol
}

/// Converts a Voigt stress to a (symmetric) second-order tensor
pub fn voigt_to_tensor2(sigma: &Voigt) -> Result<Tensor2, StrError> {
    let (xx, yy, zz) = (sigma[0], sigma[1], sigma[2]);
    let (yz, xz, xy) = (sigma[3], sigma[4], sigma[5]);
    Tensor2::from_matrix(
        &[
            [xx, xy, xz], //
            [xy, yy, yz], //
            [xz, yz, zz], //
        ],
        Mandel::Symmetric,
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
