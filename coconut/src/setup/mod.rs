//! Coconut setup.
//! Defines public params, secret/verification keys, and keygen based on Shamir's secret sharing.

use alloc::vec::Vec;

pub mod keygen;
pub mod keypair;
pub mod params;

pub use keypair::*;
pub use params::*;

/// **Not intended to be used anywhere except for tests.**
/// Initializes params for `attribute_count` attributes along with secret/verification keys
/// and random attributes.
#[cfg(test)]
#[allow(clippy::type_complexity)]
pub fn test_setup<E, D, R>(
    rng: &mut R,
    attribute_count: usize,
) -> (
    SecretKey<E::ScalarField>,
    VerificationKey<E>,
    Params<E>,
    Vec<E::ScalarField>,
)
where
    E: ark_ec::pairing::Pairing,
    D: digest::Digest,
    R: ark_std::rand::RngCore,
{
    use crate::helpers::n_rand;

    let params = Params::new::<D>(attribute_count).unwrap();
    let (secret, public) = keygen(rng, &params).unwrap();
    let attributes = n_rand(rng, attribute_count).collect();

    (secret, public, params, attributes)
}
