//! Combining partial signatures and verification keys of several authorities.

use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::{cfg_into_iter, end_timer, start_timer, Zero};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Signature;
use crate::{
    helpers::lagrange_coefficients,
    setup::{
        keygen::{participant_point, ParticipantId},
        VerificationKey,
    },
    CoconutError,
};

/// Points the contributing authorities' polynomials were evaluated at, one per aggregated item
/// and in the same order.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct PolynomialPoints<F: PrimeField>(#[serde_as(as = "Vec<ArkObjectBytes>")] pub Vec<F>);

impl<F: PrimeField> PolynomialPoints<F> {
    /// Points of the authorities with supplied ids.
    pub fn from_ids(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        Self(ids.into_iter().map(participant_point).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lagrange weights at `0` for `count` items.
    fn weights(&self, count: usize) -> Result<Vec<F>, CoconutError> {
        if self.len() != count {
            Err(CoconutError::IncompatibleAggregationSet)?
        }

        lagrange_coefficients(&self.0, &F::zero())
    }
}

/// Combines verification keys. With `points`, the result is the key of the unshared secret
/// the supplied threshold keys were derived from. Without them, alpha and each beta are summed.
pub fn aggregate_verification_keys<E: Pairing>(
    vks: &[VerificationKey<E>],
    points: Option<&PolynomialPoints<E::ScalarField>>,
) -> Result<VerificationKey<E>, CoconutError> {
    let first = vks.first().ok_or(CoconutError::EmptyAggregationSet)?;
    let attribute_count = first.supported_attribute_count();
    if vks
        .iter()
        .any(|vk| vk.supported_attribute_count() != attribute_count)
    {
        Err(CoconutError::IncompatibleAggregationSet)?
    }
    let weights = points.map(|pp| pp.weights(vks.len())).transpose()?;
    let timer = start_timer!(|| "Aggregate verification keys");

    let alpha: Vec<_> = vks.iter().map(|vk| vk.alpha).collect();
    let alpha = combine(&alpha, weights.as_deref());
    let beta: Vec<_> = cfg_into_iter!(0..attribute_count)
        .map(|j| {
            let beta_j: Vec<_> = vks.iter().map(|vk| vk.beta[j]).collect();

            combine(&beta_j, weights.as_deref())
        })
        .collect();

    end_timer!(timer);
    Ok(VerificationKey {
        g2: first.g2,
        alpha: alpha.into_affine(),
        beta: E::G2::normalize_batch(&beta),
    })
}

/// Combines signatures over the same attributes. All of them must share `sig1`, which is taken
/// from the first one. With `points`, `sig2` values are Lagrange-weighted, otherwise summed.
pub fn aggregate_signatures<E: Pairing>(
    sigs: &[Signature<E>],
    points: Option<&PolynomialPoints<E::ScalarField>>,
) -> Result<Signature<E>, CoconutError> {
    let first = sigs.first().ok_or(CoconutError::EmptyAggregationSet)?;
    let weights = points.map(|pp| pp.weights(sigs.len())).transpose()?;
    let timer = start_timer!(|| "Aggregate signatures");

    let sig2: Vec<_> = sigs.iter().map(|sig| sig.sig2).collect();
    let sig = Signature::combine(first.sig1, combine(&sig2, weights.as_deref()));

    end_timer!(timer);
    Ok(sig)
}

/// `\sum_{i}(points_{i} * weights_{i})`, or `\sum_{i}(points_{i})` without weights.
fn combine<G: AffineRepr>(points: &[G], weights: Option<&[G::ScalarField]>) -> G::Group {
    match weights {
        Some(weights) => G::Group::msm_unchecked(points, weights),
        None => points
            .iter()
            .fold(G::Group::zero(), |acc, point| acc + *point),
    }
}
