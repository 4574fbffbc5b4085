//! Non-interactive proofs of knowledge used by the blind issuance and the credential show.
//!
//! Both proofs follow the same Schnorr pattern: the prover commits to random blindings `w`,
//! derives the challenge `c` by hashing the statement together with the commitments, and
//! responds with `s = w + c * witness`. The verifier recomputes the commitments as
//! `\sum_{i}(base_{i} * s_{i}) - y * c` and checks that hashing them yields the same `c`.

use alloc::vec::Vec;

use ark_ff::PrimeField;
use ark_serialize::SerializationError;
use digest::Digest;
use schnorr_pok::compute_random_oracle_challenge;

pub mod signer;
pub mod verifier;

pub use signer::*;
pub use verifier::*;

/// Hashes bytes written by `contribute` into a challenge.
pub(crate) fn challenge<F, D, C>(contribute: C) -> Result<F, SerializationError>
where
    F: PrimeField,
    D: Digest,
    C: FnOnce(&mut Vec<u8>) -> Result<(), SerializationError>,
{
    let mut bytes = Vec::new();
    contribute(&mut bytes)?;

    Ok(compute_random_oracle_challenge::<F, D>(&bytes))
}

/// `w + c * witness` for each of the supplied pairs.
pub(crate) fn responses<'a, F: PrimeField>(
    blindings: &'a [F],
    witnesses: &'a [F],
    challenge: &'a F,
) -> impl Iterator<Item = F> + 'a {
    blindings
        .iter()
        .zip(witnesses)
        .map(move |(w, witness)| *w + *challenge * witness)
}
