//! Secret and verification keys of a single authority.

mod public;
mod secret;

pub use public::*;
pub use secret::*;

use ark_ec::pairing::Pairing;
use ark_std::rand::RngCore;

use super::Params;
use crate::CoconutError;

/// Generates an independent keypair supporting `params.max_attributes()` attributes.
/// Keys produced this way aren't suitable for threshold issuance: aggregating `n` of them
/// without Lagrange weights acts as an `n`-out-of-`n` authority.
pub fn keygen<R: RngCore, E: Pairing>(
    rng: &mut R,
    params: &Params<E>,
) -> Result<(SecretKey<E::ScalarField>, VerificationKey<E>), CoconutError> {
    let q = params.max_attributes();
    if q == 0 {
        Err(CoconutError::InvalidParameters)?
    }

    let sk = SecretKey::rand(rng, q);
    let vk = VerificationKey::new(&sk, params);

    Ok((sk, vk))
}
