//! Showing a credential while hiding some of its attributes.
//!
//! The hidden attributes always come first, the public ones are verified against
//! `beta_{k}..` where `k` is the amount of hidden attributes.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::{end_timer, rand::RngCore, start_timer};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;
use zeroize::Zeroize;

use super::Signature;
use crate::{
    helpers::{pairing_check, rand},
    proof::{VerifierProof, VerifierStatement},
    setup::{Params, VerificationKey},
    CoconutError,
};

/// Material presented to a verifier. Must be produced anew for every verification since nothing
/// prevents a verifier from replaying it.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindShowMats<E: Pairing> {
    /// `kappa = g2 * t + alpha + \sum_{i}(beta_{i} * m_{i})`
    #[serde_as(as = "ArkObjectBytes")]
    pub kappa: E::G2Affine,
    /// `nu = sig1 * t`
    #[serde_as(as = "ArkObjectBytes")]
    pub nu: E::G1Affine,
    pub proof: VerifierProof<E>,
}

/// Produces material proving possession of `sig` over `priv_m` followed by some public
/// attributes, without revealing `priv_m`.
pub fn show_blind_signature<R: RngCore, E: Pairing, D: Digest>(
    rng: &mut R,
    params: &Params<E>,
    vk: &VerificationKey<E>,
    sig: &Signature<E>,
    priv_m: &[E::ScalarField],
) -> Result<BlindShowMats<E>, CoconutError> {
    let VerificationKey { g2, alpha, beta } = vk;
    if priv_m.is_empty() || priv_m.len() > beta.len() {
        Err(CoconutError::InvalidAttributeCount {
            received: priv_m.len(),
            max: beta.len(),
        })?
    }
    let timer = start_timer!(|| "Show blind signature");

    let mut t: E::ScalarField = rand(rng);
    let kappa = (g2.mul_bigint(t.into_bigint())
        + E::G2::msm_unchecked(&beta[..priv_m.len()], priv_m)
        + *alpha)
        .into_affine();
    let nu = sig.sig1.mul_bigint(t.into_bigint()).into_affine();

    let proof = VerifierProof::new::<R, D>(
        rng,
        params,
        &VerifierStatement {
            vk,
            sig1: &sig.sig1,
            kappa: &kappa,
            nu: &nu,
        },
        &t,
        priv_m,
    );
    t.zeroize();

    end_timer!(timer);
    Ok(BlindShowMats {
        kappa,
        nu,
        proof: proof?,
    })
}

/// Verifies shown credential against public attributes `pub_m`.
///
/// Returns `false` if the proof is invalid, there are more attributes than `vk` supports,
/// or `sig1` is zero.
pub fn blind_verify<E: Pairing, D: Digest>(
    params: &Params<E>,
    vk: &VerificationKey<E>,
    sig: &Signature<E>,
    BlindShowMats { kappa, nu, proof }: &BlindShowMats<E>,
    pub_m: &[E::ScalarField],
) -> bool {
    let hidden = proof.hidden_attribute_count();
    if hidden + pub_m.len() > vk.beta.len() || sig.sig1.is_zero() {
        return false;
    }

    let statement = VerifierStatement {
        vk,
        sig1: &sig.sig1,
        kappa,
        nu,
    };
    if !proof.verify::<D>(params, &statement) {
        return false;
    }
    let timer = start_timer!(|| "Blind verify");

    // `kappa + \sum_{i}(beta_{i + k} * m_{i})`
    let t1 = E::G2::msm_unchecked(&vk.beta[hidden..hidden + pub_m.len()], pub_m) + *kappa;
    // `sig2 + nu`
    let t2 = sig.sig2.into_group() + *nu;

    let res = pairing_check::<E>(sig.sig1, t1.into_affine(), t2.into_affine(), vk.g2);
    end_timer!(timer);

    res
}
