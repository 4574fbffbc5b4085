//! Miscellaneous helpers and re-exports from `dock_crypto_utils`.

use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_std::{cfg_iter, rand::RngCore, One, UniformRand, Zero};
use digest::Digest;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use utils::hashing_utils::affine_group_elem_from_try_and_incr;
pub use utils::aliases::FullDigest;

use crate::CoconutError;

/// Generates a random element.
pub fn rand<T: UniformRand, R: RngCore>(rng: &mut R) -> T {
    UniformRand::rand(rng)
}

/// Generates an iterator of `count` random elements drawn sequentially from `rng`.
pub fn n_rand<'rng, T: UniformRand, R: RngCore>(
    rng: &'rng mut R,
    count: usize,
) -> impl Iterator<Item = T> + 'rng {
    (0..count).map(move |_| rand(rng))
}

/// Deterministically maps `bytes` to a point of `G1` using try-and-increment.
/// Vulnerable to timing attacks, so must only be applied to public data.
pub fn hash_to_g1<E: Pairing, D: Digest>(bytes: &[u8]) -> E::G1Affine {
    affine_group_elem_from_try_and_incr::<E::G1Affine, D>(bytes)
}

/// `g * exp_{i}` for each of the supplied exponents.
pub(crate) fn points<G: AffineRepr>(g: &G, exps: &[G::ScalarField]) -> Vec<G> {
    let projective: Vec<_> = cfg_iter!(exps)
        .map(|exp| g.mul_bigint(exp.into_bigint()))
        .collect();

    G::Group::normalize_batch(&projective)
}

/// Ensures that `e(a_1, b_1) == e(a_2, b_2)`.
pub(crate) fn pairing_check<E: Pairing>(
    a_1: E::G1Affine,
    b_1: E::G2Affine,
    a_2: E::G1Affine,
    b_2: E::G2Affine,
) -> bool {
    E::multi_pairing(
        [
            E::G1Prepared::from(a_1),
            E::G1Prepared::from(-a_2.into_group()),
        ],
        [E::G2Prepared::from(b_1), E::G2Prepared::from(b_2)],
    )
    .is_zero()
}

/// Lagrange basis evaluated at `at` for the interpolation points `xs`:
///
/// `l_{i} = \prod_{j != i}((at - x_{j}) / (x_{i} - x_{j}))`
///
/// Points must be distinct, and non-zero when interpolating at `0`.
pub fn lagrange_coefficients<F: PrimeField>(xs: &[F], at: &F) -> Result<Vec<F>, CoconutError> {
    let has_duplicates = xs.iter().enumerate().any(|(i, x)| xs[..i].contains(x));
    if has_duplicates || (at.is_zero() && xs.iter().any(Zero::is_zero)) {
        Err(CoconutError::DegenerateInterpolation)?
    }

    cfg_iter!(xs)
        .enumerate()
        .map(|(i, x_i)| {
            let (num, den) = xs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold((F::one(), F::one()), |(num, den), (_, x_j)| {
                    (num * (*at - x_j), den * (*x_i - x_j))
                });

            den.inverse()
                .map(|den_inv| num * den_inv)
                .ok_or(CoconutError::DegenerateInterpolation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;
    use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn lagrange_reconstructs_constant_term() {
        let mut rng = StdRng::seed_from_u64(0u64);

        for degree in 0..6 {
            let poly = DensePolynomial::<Fr>::rand(degree, &mut rng);
            let xs: Vec<Fr> = (1..=degree as u64 + 1).map(|x| Fr::from(x * 3 + 1)).collect();
            let l = lagrange_coefficients(&xs, &Fr::zero()).unwrap();

            let reconstructed: Fr = l.iter().zip(&xs).map(|(l, x)| *l * poly.evaluate(x)).sum();
            assert_eq!(reconstructed, poly.evaluate(&Fr::zero()));

            let at = Fr::from(100u64);
            let l = lagrange_coefficients(&xs, &at).unwrap();
            let interpolated: Fr = l.iter().zip(&xs).map(|(l, x)| *l * poly.evaluate(x)).sum();
            assert_eq!(interpolated, poly.evaluate(&at));
        }
    }

    #[test]
    fn lagrange_single_point() {
        assert_eq!(
            lagrange_coefficients(&[Fr::from(7u64)], &Fr::zero()).unwrap(),
            [Fr::one()]
        );
    }

    #[test]
    fn degenerate_interpolation() {
        let xs = [Fr::from(1u64), Fr::from(2u64), Fr::from(1u64)];
        assert_eq!(
            lagrange_coefficients(&xs, &Fr::zero()),
            Err(CoconutError::DegenerateInterpolation)
        );

        let xs = [Fr::from(0u64), Fr::from(2u64)];
        assert_eq!(
            lagrange_coefficients(&xs, &Fr::zero()),
            Err(CoconutError::DegenerateInterpolation)
        );
        assert!(lagrange_coefficients(&xs, &Fr::from(5u64)).is_ok());
    }
}
