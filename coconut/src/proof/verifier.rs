//! Proof that `kappa` and `nu` were derived from the hidden attributes of a credential.

use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::rand::RngCore;
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;

use super::{challenge, responses};
use crate::{
    helpers::{n_rand, rand},
    setup::{Params, VerificationKey},
    CoconutError,
};

/// Public inputs of the `VerifierProof`.
#[derive(Clone, Copy, Debug)]
pub struct VerifierStatement<'a, E: Pairing> {
    pub vk: &'a VerificationKey<E>,
    /// `sig1` of the credential being shown.
    pub sig1: &'a E::G1Affine,
    /// `kappa = g2 * t + alpha + \sum_{i}(beta_{i} * m_{i})`
    pub kappa: &'a E::G2Affine,
    /// `nu = sig1 * t`
    pub nu: &'a E::G1Affine,
}

/// Proves knowledge of `t` and the hidden `m_{i}` such that
/// `kappa = g2 * t + alpha + \sum_{i}(beta_{i} * m_{i})` and `nu = sig1 * t`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct VerifierProof<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub challenge: E::ScalarField,
    /// Responses for the hidden `m_{i}`.
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub rm: Vec<E::ScalarField>,
    /// Response for `t`.
    #[serde_as(as = "ArkObjectBytes")]
    pub rt: E::ScalarField,
}

/// `Aw`, `Bw`
struct VerifierCommitments<E: Pairing> {
    aw: E::G2Affine,
    bw: E::G1Affine,
}

impl<E: Pairing> VerifierProof<E> {
    /// Builds the proof for the blinding `t` and hidden attributes `m`.
    pub(crate) fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        params: &Params<E>,
        statement: &VerifierStatement<E>,
        t: &E::ScalarField,
        m: &[E::ScalarField],
    ) -> Result<Self, CoconutError> {
        let VerificationKey { g2, beta, .. } = statement.vk;
        if m.len() > beta.len() {
            Err(CoconutError::InvalidAttributeCount {
                received: m.len(),
                max: beta.len(),
            })?
        }

        let wt: E::ScalarField = rand(rng);
        let wm: Vec<E::ScalarField> = n_rand(rng, m.len()).collect();

        let aw = g2.mul_bigint(wt.into_bigint()) + E::G2::msm_unchecked(&beta[..wm.len()], &wm);
        let bw = statement.sig1.mul_bigint(wt.into_bigint());

        let challenge = VerifierCommitments {
            aw: aw.into_affine(),
            bw: bw.into_affine(),
        }
        .challenge::<D>(params, statement)?;

        Ok(Self {
            challenge,
            rm: responses(&wm, m, &challenge).collect(),
            rt: wt + challenge * t,
        })
    }

    /// Verifies the proof against supplied statement.
    pub fn verify<D: Digest>(&self, params: &Params<E>, statement: &VerifierStatement<E>) -> bool {
        let Self {
            challenge: c,
            rm,
            rt,
        } = self;
        let VerificationKey { g2, alpha, beta } = statement.vk;

        if rm.len() > beta.len() {
            return false;
        }

        let aw = *g2 * *rt + E::G2::msm_unchecked(&beta[..rm.len()], rm)
            - (statement.kappa.into_group() - alpha.into_group()) * *c;
        let bw = *statement.sig1 * *rt - *statement.nu * *c;

        VerifierCommitments {
            aw: aw.into_affine(),
            bw: bw.into_affine(),
        }
        .challenge::<D>(params, statement)
        .map_or(false, |expected| expected == *c)
    }

    /// Amount of attributes hidden by the show.
    pub fn hidden_attribute_count(&self) -> usize {
        self.rm.len()
    }
}

impl<E: Pairing> VerifierCommitments<E> {
    /// `c = H(g1, g2, alpha, beta, hs, kappa, nu, sig1, Aw, Bw)`
    fn challenge<D: Digest>(
        &self,
        Params { g1, hs, .. }: &Params<E>,
        VerifierStatement {
            vk: VerificationKey { g2, alpha, beta },
            sig1,
            kappa,
            nu,
        }: &VerifierStatement<E>,
    ) -> Result<E::ScalarField, SerializationError> {
        challenge::<_, D, _>(|mut writer| {
            g1.serialize_compressed(&mut writer)?;
            g2.serialize_compressed(&mut writer)?;
            alpha.serialize_compressed(&mut writer)?;
            beta.serialize_compressed(&mut writer)?;
            hs.serialize_compressed(&mut writer)?;
            kappa.serialize_compressed(&mut writer)?;
            nu.serialize_compressed(&mut writer)?;
            sig1.serialize_compressed(&mut writer)?;
            self.aw.serialize_compressed(&mut writer)?;
            self.bw.serialize_compressed(&mut writer)
        })
    }
}
