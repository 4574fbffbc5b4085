//! Shamir secret sharing of the Coconut secret key.

use alloc::vec::Vec;

use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use ark_std::{cfg_into_iter, cfg_iter, end_timer, rand::RngCore, start_timer};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{participant_point, Threshold};
use crate::{
    helpers::n_rand,
    setup::{Params, SecretKey, VerificationKey},
    CoconutError,
};

/// Produces secret and verification keys supporting `params.max_attributes()` attributes for
/// all `total` authorities, any `threshold` of which can act as the unshared key.
///
/// One random polynomial of degree `threshold - 1` is generated for `x` and one for each `y_{j}`.
/// The authority with id `i` receives their evaluations at `i`. The evaluations at `0` are never
/// produced.
#[allow(clippy::type_complexity)]
pub fn ttp_keygen<R: RngCore, E: Pairing>(
    rng: &mut R,
    params: &Params<E>,
    Threshold(threshold, total): Threshold,
) -> Result<(Vec<SecretKey<E::ScalarField>>, Vec<VerificationKey<E>>), CoconutError> {
    let q = params.max_attributes();
    if q == 0 || threshold == 0 || threshold > total {
        Err(CoconutError::InvalidParameters)?
    }
    let timer = start_timer!(|| "Trusted dealer keygen");

    let mut v: DensePolynomial<E::ScalarField> = random_polynomial(rng, threshold);
    let mut w: Vec<DensePolynomial<E::ScalarField>> =
        (0..q).map(|_| random_polynomial(rng, threshold)).collect();

    let sks: Vec<_> = cfg_into_iter!(1..=u64::from(total))
        .map(|id| {
            let point = participant_point::<E::ScalarField>(id as u16);

            SecretKey {
                x: v.evaluate(&point),
                y: w.iter().map(|w_j| w_j.evaluate(&point)).collect(),
            }
        })
        .collect();

    v.coeffs.zeroize();
    w.iter_mut().for_each(|w_j| w_j.coeffs.zeroize());

    let vks = cfg_iter!(sks)
        .map(|sk| VerificationKey::new(sk, params))
        .collect();

    end_timer!(timer);
    Ok((sks, vks))
}

/// Random polynomial with `threshold` coefficients.
fn random_polynomial<R: RngCore, F: PrimeField>(rng: &mut R, threshold: u16) -> DensePolynomial<F> {
    DensePolynomial::from_coefficients_vec(n_rand(rng, threshold as usize).collect())
}

#[cfg(test)]
mod shamir_ss_tests {
    use alloc::vec::Vec;

    use ark_bls12_381::Bls12_381;
    use ark_ec::pairing::Pairing;
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        Zero,
    };
    use blake2::Blake2b512;

    use super::*;
    use crate::helpers::lagrange_coefficients;

    type Fr = <Bls12_381 as Pairing>::ScalarField;

    /// Interpolates `x` and every `y_{j}` at `0` from the supplied `(id, key)` pairs.
    fn reconstruct(shares: &[(u16, &SecretKey<Fr>)]) -> (Fr, Vec<Fr>) {
        let xs: Vec<Fr> = shares.iter().map(|(id, _)| participant_point(*id)).collect();
        let l = lagrange_coefficients(&xs, &Fr::zero()).unwrap();

        let x = l.iter().zip(shares).map(|(l, (_, sk))| *l * sk.x).sum();
        let y = (0..shares[0].1.y.len())
            .map(|j| l.iter().zip(shares).map(|(l, (_, sk))| *l * sk.y[j]).sum())
            .collect();

        (x, y)
    }

    #[test]
    fn any_threshold_subset_reconstructs_same_key() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = Params::<Bls12_381>::new::<Blake2b512>(3).unwrap();

        for (threshold, total) in [(1, 1), (1, 3), (2, 3), (3, 5), (5, 5)] {
            let (sks, vks) =
                ttp_keygen(&mut rng, &params, Threshold::new(threshold, total).unwrap()).unwrap();
            assert_eq!(sks.len(), total as usize);
            assert_eq!(vks.len(), total as usize);

            let indexed: Vec<_> = (1..=total).zip(sks.iter()).collect();
            let t = threshold as usize;
            let first = reconstruct(&indexed[..t]);
            let last = reconstruct(&indexed[indexed.len() - t..]);
            assert_eq!(first, last);
            assert_eq!(first.1.len(), 3);

            if t > 1 {
                let below = reconstruct(&indexed[..t - 1]);
                assert_ne!(below, first);
            }
        }
    }

    #[test]
    fn distinct_shares() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = Params::<Bls12_381>::new::<Blake2b512>(2).unwrap();
        let (sks, vks) = ttp_keygen(&mut rng, &params, Threshold::new(2, 4).unwrap()).unwrap();

        for (i, sk) in sks.iter().enumerate() {
            assert_eq!(VerificationKey::new(sk, &params), vks[i]);
            assert!(sks[..i].iter().all(|other| other.x != sk.x));
        }
    }

    #[test]
    fn invalid_threshold() {
        assert_eq!(Threshold::new(0, 3), Err(CoconutError::InvalidParameters));
        assert_eq!(Threshold::new(4, 3), Err(CoconutError::InvalidParameters));
        let threshold = Threshold::new(2, 3).unwrap();
        assert_eq!((threshold.threshold(), threshold.total()), (2, 3));
        assert_eq!(threshold.participant_ids().collect::<Vec<_>>(), [1, 2, 3]);
    }
}
