use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::{cfg_iter, rand::RngCore};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    encoding::scalar_to_bytes,
    helpers::{hash_to_g1, pairing_check, rand},
    setup::{SecretKey, VerificationKey},
    CoconutError,
};

/// Modified Pointcheval-Sanders signature `(h, h * (x + \sum_{i}(y_{i} * m_{i})))`.
/// This signature can be obtained in several ways:
///
/// - Secret key's owner signs public attributes
/// - `BlindedSignature` gets unblinded
/// - Partial signatures get aggregated
#[serde_as]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct Signature<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) sig1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) sig2: E::G1Affine,
}

impl<E: Pairing> Signature<E> {
    /// Signs public attributes. `h` is derived from the attributes themselves, so signing the
    /// same attributes with the same key always produces the same signature.
    pub fn new<D: Digest>(
        pub_m: &[E::ScalarField],
        sk: &SecretKey<E::ScalarField>,
    ) -> Result<Self, CoconutError> {
        if pub_m.len() > sk.y.len() {
            Err(CoconutError::TooManyAttributes {
                received: pub_m.len(),
                max: sk.y.len(),
            })?
        }

        let bytes: Vec<u8> = pub_m.iter().flat_map(scalar_to_bytes).collect();
        let h = hash_to_g1::<E, D>(&bytes);

        Ok(Self::from_sig1(h, pub_m, sk))
    }

    /// Verifies the signature over supplied attributes. An unblinded or aggregated signature
    /// can be verified against private attributes followed by the public ones.
    ///
    /// Returns `false` if there are more attributes than the key supports or `sig1` is zero.
    pub fn verify(
        &self,
        m: &[E::ScalarField],
        VerificationKey { g2, alpha, beta }: &VerificationKey<E>,
    ) -> bool {
        if m.len() > beta.len() {
            return false;
        }

        // `alpha + \sum_{i}(beta_{i} * m_{i})`
        let k = E::G2::msm_unchecked(&beta[..m.len()], m) + *alpha;

        self.verify_pairing(k.into_affine(), *g2)
    }

    /// Produces a signature over the same attributes which can't be linked to this one:
    /// `(sig1 * t, sig2 * t)` for random `t`.
    pub fn randomize<R: RngCore>(&self, rng: &mut R) -> Self {
        let t: E::ScalarField = rand(rng);

        Self::combine(
            self.sig1.mul_bigint(t.into_bigint()),
            self.sig2.mul_bigint(t.into_bigint()),
        )
    }

    /// Checks if a signature has zero elements. A valid signature should not have zero elements.
    pub fn is_zero(&self) -> bool {
        self.sig1.is_zero() || self.sig2.is_zero()
    }

    pub fn sig1(&self) -> &E::G1Affine {
        &self.sig1
    }

    pub fn sig2(&self) -> &E::G1Affine {
        &self.sig2
    }

    /// Ensures that `e(sig1, k) == e(sig2, g2)` and `sig1` isn't zero.
    pub(crate) fn verify_pairing(&self, k: E::G2Affine, g2: E::G2Affine) -> bool {
        !self.sig1.is_zero() && pairing_check::<E>(self.sig1, k, self.sig2, g2)
    }

    pub(crate) fn combine<S1, S2>(sig1: S1, sig2: S2) -> Self
    where
        S1: Into<E::G1Affine>,
        S2: Into<E::G1Affine>,
    {
        Self {
            sig1: sig1.into(),
            sig2: sig2.into(),
        }
    }

    /// `h * (x + \sum_{j}(y_{j} * m_{j}))`
    fn from_sig1(
        h: E::G1Affine,
        m: &[E::ScalarField],
        SecretKey { x, y }: &SecretKey<E::ScalarField>,
    ) -> Self {
        let k = cfg_iter!(y)
            .zip(m)
            .map(|(y, m)| *y * m)
            .sum::<E::ScalarField>()
            + x;

        Self::combine(h, h.mul_bigint(k.into_bigint()))
    }
}
