use alloc::{format, vec::Vec};

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::cfg_into_iter;
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{helpers::hash_to_g1, CoconutError};

/// Public parameters shared by all authorities, holders and verifiers.
///
/// `hs[i] = H("h" || i)` for `i` in `0..q`, where `q` is the maximum amount of attributes
/// a credential can carry.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Params<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub hs: Vec<E::G1Affine>,
}

impl<E: Pairing> Params<E> {
    /// Generates params supporting up to `q` attributes. Deterministic given `q` and `D`.
    pub fn new<D: Digest>(q: usize) -> Result<Self, CoconutError> {
        if q == 0 {
            Err(CoconutError::InvalidParameters)?
        }

        let hs = cfg_into_iter!(0..q)
            .map(|i| hash_to_g1::<E, D>(format!("h{}", i).as_bytes()))
            .collect();

        Ok(Self {
            g1: E::G1Affine::generator(),
            g2: E::G2Affine::generator(),
            hs,
        })
    }

    /// Order `p` of the groups.
    pub fn order() -> <E::ScalarField as PrimeField>::BigInt {
        E::ScalarField::MODULUS
    }

    /// Returns max amount of attributes supported by these params.
    pub fn max_attributes(&self) -> usize {
        self.hs.len()
    }
}
