use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::PrimeField;
use ark_serialize::*;
use core::iter::once;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::serde_utils::ArkObjectBytes;

use crate::{helpers::points, setup::Params};

use super::SecretKey;

/// `VerificationKey` of an authority, or an aggregate of several authorities' keys.
///
/// `alpha = g2 * x`, `beta_{i} = g2 * y_{i}`
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct VerificationKey<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub alpha: E::G2Affine,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub beta: Vec<E::G2Affine>,
}

impl<E: Pairing> VerificationKey<E> {
    /// Derives `VerificationKey` from supplied secret key and params.
    pub fn new(
        SecretKey { x, y }: &SecretKey<E::ScalarField>,
        &Params { g2, .. }: &Params<E>,
    ) -> Self {
        Self {
            g2,
            alpha: g2.mul_bigint(x.into_bigint()).into(),
            beta: points(&g2, y),
        }
    }

    /// Returns max amount of attributes supported by this verification key.
    pub fn supported_attribute_count(&self) -> usize {
        self.beta.len()
    }

    /// Returns `true` if the key doesn't contain identity elements.
    pub fn valid(&self) -> bool {
        !once(&self.g2)
            .chain(once(&self.alpha))
            .chain(&self.beta)
            .any(AffineRepr::is_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::keygen;
    use ark_bls12_381::Bls12_381;
    use ark_ec::CurveGroup;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;

    #[test]
    fn derived_from_secret_key() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = Params::<Bls12_381>::new::<Blake2b512>(3).unwrap();
        let (sk, vk) = keygen(&mut rng, &params).unwrap();

        assert!(vk.valid());
        assert_eq!(vk.supported_attribute_count(), 3);
        assert_eq!(vk.g2, params.g2);
        assert_eq!(vk.alpha, (params.g2 * sk.x).into_affine());
        for (beta, y) in vk.beta.iter().zip(&sk.y) {
            assert_eq!(*beta, (params.g2 * *y).into_affine());
        }

        let mut invalid = vk.clone();
        invalid.beta[1] = <Bls12_381 as Pairing>::G2Affine::zero();
        assert!(!invalid.valid());
    }
}
