use alloc::vec::Vec;
use core::fmt;

use ark_ff::{
    field_hashers::{DefaultFieldHasher, HashToField},
    PrimeField,
};
use ark_serialize::*;
use ark_std::rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::helpers::{n_rand, rand, FullDigest};

/// `SecretKey` of an authority: `x` and one `y_{i}` per supported attribute.
#[derive(Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey<F: PrimeField> {
    pub(crate) x: F,
    pub(crate) y: Vec<F>,
}

impl<F: PrimeField> SecretKey<F> {
    const X_SALT: &'static [u8] = b"COCONUT-X-KEYGEN-SALT";
    const Y_SALT: &'static [u8] = b"COCONUT-Y-KEYGEN-SALT";

    /// Generates random secret key compatible with `attribute_count` attributes.
    pub fn rand<R: RngCore>(rng: &mut R, attribute_count: usize) -> Self {
        let x = rand(rng);
        let y = n_rand(rng, attribute_count).collect();

        Self { x, y }
    }

    /// Generates secret key compatible with `attribute_count` attributes from supplied seed.
    pub fn from_seed<D: FullDigest>(seed: &[u8], attribute_count: usize) -> Self {
        let hasher = <DefaultFieldHasher<D> as HashToField<F>>::new;

        let mut x = hasher(Self::X_SALT).hash_to_field(seed, 1);
        let y = hasher(Self::Y_SALT).hash_to_field(seed, attribute_count);
        let sk = Self { x: x[0], y };
        x.zeroize();

        sk
    }

    /// Returns max amount of attributes supported by this secret key.
    pub fn supported_attribute_count(&self) -> usize {
        self.y.len()
    }
}

impl<F: PrimeField> fmt::Debug for SecretKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("supported_attribute_count", &self.y.len())
            .finish_non_exhaustive()
    }
}
