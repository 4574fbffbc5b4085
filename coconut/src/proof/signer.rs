//! Proof that the ciphertexts sent for blind signing encrypt the attributes committed by `cm`.

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
    elgamal::Encryption,
    helpers::{n_rand, points, rand},
    setup::Params,
    CoconutError,
};

/// Public inputs of the `SignerProof`.
#[derive(Clone, Copy, Debug)]
pub struct SignerStatement<'a, E: Pairing> {
    /// ElGamal public key of the holder.
    pub gamma: &'a E::G1Affine,
    /// `cm = g1 * r + \sum_{j}(hs_{j} * m_{j})`
    pub cm: &'a E::G1Affine,
    /// `h = H(cm)`
    pub h: &'a E::G1Affine,
    /// One ciphertext per private attribute.
    pub enc: &'a [Encryption<E>],
}

/// Witnesses of the `SignerProof`.
pub(crate) struct SignerWitnesses<'a, F> {
    /// Randomness of `cm`.
    pub r: &'a F,
    /// Encryption randomness, one per private attribute.
    pub k: &'a [F],
    /// Private attributes followed by the public ones.
    pub m: &'a [F],
}

/// Proves knowledge of `r`, `k_{i}` and `m_{j}` such that
/// - `cm = g1 * r + \sum_{j}(hs_{j} * m_{j})`
/// - `c1_{i} = g1 * k_{i}`
/// - `c2_{i} = gamma * k_{i} + h * m_{i}`
///
/// where `i` ranges over private attributes and `j` over all attributes.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct SignerProof<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub challenge: E::ScalarField,
    /// Response for `r`.
    #[serde_as(as = "ArkObjectBytes")]
    pub rr: E::ScalarField,
    /// Responses for `k_{i}`.
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub rk: Vec<E::ScalarField>,
    /// Responses for `m_{j}`.
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub rm: Vec<E::ScalarField>,
}

/// `Cw`, `Aw_{i}`, `Bw_{i}`
struct SignerCommitments<E: Pairing> {
    cw: E::G1Affine,
    aw: Vec<E::G1Affine>,
    bw: Vec<E::G1Affine>,
}

impl<E: Pairing> SignerProof<E> {
    /// Builds the proof. `witnesses.k` must be aligned with `statement.enc`, and `witnesses.m`
    /// must start with the private attributes.
    pub(crate) fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        params: &Params<E>,
        statement: &SignerStatement<E>,
        SignerWitnesses { r, k, m }: SignerWitnesses<E::ScalarField>,
    ) -> Result<Self, CoconutError> {
        if k.len() != statement.enc.len() || k.len() > m.len() || m.len() > params.hs.len() {
            Err(CoconutError::InvalidAttributeCount {
                received: m.len(),
                max: params.hs.len(),
            })?
        }

        let wr: E::ScalarField = rand(rng);
        let wk: Vec<E::ScalarField> = n_rand(rng, k.len()).collect();
        let wm: Vec<E::ScalarField> = n_rand(rng, m.len()).collect();

        let aw = points(&params.g1, &wk);
        let bw_projective: Vec<_> = wk
            .iter()
            .zip(&wm)
            .map(|(wk, wm)| {
                statement.gamma.mul_bigint(wk.into_bigint())
                    + statement.h.mul_bigint(wm.into_bigint())
            })
            .collect();
        let cw = params.g1.mul_bigint(wr.into_bigint())
            + E::G1::msm_unchecked(&params.hs[..wm.len()], &wm);

        let commitments = SignerCommitments {
            cw: cw.into_affine(),
            aw,
            bw: E::G1::normalize_batch(&bw_projective),
        };
        let challenge = commitments.challenge::<D>(params, statement)?;

        Ok(Self {
            challenge,
            rr: wr + challenge * r,
            rk: responses(&wk, k, &challenge).collect(),
            rm: responses(&wm, m, &challenge).collect(),
        })
    }

    /// Verifies the proof against supplied statement. Returns `false` if the response lengths
    /// don't match the statement.
    pub fn verify<D: Digest>(&self, params: &Params<E>, statement: &SignerStatement<E>) -> bool {
        let Self {
            challenge: c,
            rr,
            rk,
            rm,
        } = self;

        if rk.len() != statement.enc.len()
            || rm.len() < statement.enc.len()
            || rm.len() > params.hs.len()
        {
            return false;
        }

        let aw: Vec<_> = rk
            .iter()
            .zip(statement.enc)
            .map(|(rk, Encryption { c1, .. })| params.g1 * *rk - *c1 * *c)
            .collect();
        let bw: Vec<_> = rk
            .iter()
            .zip(rm)
            .zip(statement.enc)
            .map(|((rk, rm), Encryption { c2, .. })| {
                *statement.gamma * *rk + *statement.h * *rm - *c2 * *c
            })
            .collect();
        let cw = params.g1 * *rr + E::G1::msm_unchecked(&params.hs[..rm.len()], rm)
            - *statement.cm * *c;

        let commitments = SignerCommitments {
            cw: cw.into_affine(),
            aw: E::G1::normalize_batch(&aw),
            bw: E::G1::normalize_batch(&bw),
        };

        commitments
            .challenge::<D>(params, statement)
            .map_or(false, |expected| expected == *c)
    }

    /// Amount of private attributes the proof was built for.
    pub fn private_attribute_count(&self) -> usize {
        self.rk.len()
    }

    /// Amount of attributes the proof was built for.
    pub fn attribute_count(&self) -> usize {
        self.rm.len()
    }
}

impl<E: Pairing> SignerCommitments<E> {
    /// `c = H(g1, g2, gamma, cm, h, hs, enc, Cw, Aw, Bw)`
    fn challenge<D: Digest>(
        &self,
        Params { g1, g2, hs }: &Params<E>,
        SignerStatement { gamma, cm, h, enc }: &SignerStatement<E>,
    ) -> Result<E::ScalarField, SerializationError> {
        challenge::<_, D, _>(|mut writer| {
            g1.serialize_compressed(&mut writer)?;
            g2.serialize_compressed(&mut writer)?;
            gamma.serialize_compressed(&mut writer)?;
            cm.serialize_compressed(&mut writer)?;
            h.serialize_compressed(&mut writer)?;
            hs.serialize_compressed(&mut writer)?;
            enc.serialize_compressed(&mut writer)?;
            self.cw.serialize_compressed(&mut writer)?;
            self.aw.serialize_compressed(&mut writer)?;
            self.bw.serialize_compressed(&mut writer)
        })
    }
}
