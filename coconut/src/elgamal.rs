//! ElGamal encryption of attributes in the exponent: `Enc(m) = (g1 * k, gamma * k + h * m)`.
//!
//! Decryption yields `h * m` rather than `m`, all consumers operate on the group element.

use core::fmt;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utils::{elgamal::Ciphertext, serde_utils::ArkObjectBytes};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::setup::Params;

/// ElGamal private key `d`, generated by the holder per request.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, CanonicalSerialize, CanonicalDeserialize)]
pub struct PrivateKey<F: PrimeField>(pub(crate) F);

/// ElGamal public key `gamma = g1 * d`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct PublicKey<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub gamma: E::G1Affine,
}

/// ElGamal ciphertext of `h * m`.
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
pub struct Encryption<E: Pairing> {
    /// `g1 * k`
    #[serde_as(as = "ArkObjectBytes")]
    pub c1: E::G1Affine,
    /// `gamma * k + h * m`
    #[serde_as(as = "ArkObjectBytes")]
    pub c2: E::G1Affine,
}

/// Generates ElGamal keypair over `params.g1`.
pub fn keygen<R: RngCore, E: Pairing>(
    rng: &mut R,
    params: &Params<E>,
) -> (PrivateKey<E::ScalarField>, PublicKey<E>) {
    let sk = PrivateKey::new(rng);
    let pk = PublicKey::new(&sk, &params.g1);

    (sk, pk)
}

impl<F: PrimeField> PrivateKey<F> {
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        Self(utils::elgamal::SecretKey::new(rng).0)
    }

    /// `c2 - c1 * d`, i.e. `h * m`.
    pub fn decrypt<E: Pairing<ScalarField = F>>(&self, enc: &Encryption<E>) -> E::G1Affine {
        Ciphertext::from(*enc).decrypt(&self.0)
    }
}

impl<F: PrimeField> fmt::Debug for PrivateKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl<E: Pairing> PublicKey<E> {
    pub fn new(secret_key: &PrivateKey<E::ScalarField>, g1: &E::G1Affine) -> Self {
        Self {
            g1: *g1,
            gamma: g1.mul_bigint(secret_key.0.into_bigint()).into_affine(),
        }
    }

    /// Encrypts `h * m`. Returns the ciphertext and the randomness `k` used for encryption,
    /// which the caller needs to prove correctness of the ciphertext and must never reveal.
    pub fn encrypt<R: RngCore>(
        &self,
        rng: &mut R,
        m: &E::ScalarField,
        h: &E::G1Affine,
    ) -> (Encryption<E>, E::ScalarField) {
        let msg = h.mul_bigint(m.into_bigint()).into_affine();
        let (ct, k) = Ciphertext::new(rng, &msg, &self.gamma, &self.g1);

        (ct.into(), k)
    }
}

impl<E: Pairing> Encryption<E> {
    pub fn new(c1: E::G1Affine, c2: E::G1Affine) -> Self {
        Self { c1, c2 }
    }
}

impl<E: Pairing> From<Ciphertext<E::G1Affine>> for Encryption<E> {
    fn from(ct: Ciphertext<E::G1Affine>) -> Self {
        Self {
            c1: ct.eph_pk,
            c2: ct.encrypted,
        }
    }
}

impl<E: Pairing> From<Encryption<E>> for Ciphertext<E::G1Affine> {
    fn from(Encryption { c1, c2 }: Encryption<E>) -> Self {
        Self { encrypted: c2, eph_pk: c1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::rand;
    use alloc::format;
    use ark_bls12_381::{Bls12_381, Fr, G1Projective};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;

    #[test]
    fn encrypt_decrypt() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = Params::<Bls12_381>::new::<Blake2b512>(1).unwrap();
        let (sk, pk) = keygen(&mut rng, &params);

        let h = <G1Projective as ark_std::UniformRand>::rand(&mut rng).into_affine();
        let m: Fr = rand(&mut rng);
        let (enc, k) = pk.encrypt(&mut rng, &m, &h);

        assert_eq!(enc.c1, (params.g1 * k).into_affine());
        assert_eq!(sk.decrypt(&enc), (h * m).into_affine());

        let ct: Ciphertext<_> = enc.into();
        assert_eq!(ct.eph_pk, enc.c1);
        assert_eq!(ct.decrypt(&sk.0), (h * m).into_affine());

        let (_, other_pk) = keygen(&mut rng, &params);
        let (other_enc, _) = other_pk.encrypt(&mut rng, &m, &h);
        assert_ne!(sk.decrypt(&other_enc), (h * m).into_affine());
    }

    #[test]
    fn fresh_randomness_per_encryption() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = Params::<Bls12_381>::new::<Blake2b512>(1).unwrap();
        let (sk, pk) = keygen(&mut rng, &params);
        let m: Fr = rand(&mut rng);

        let (first, _) = pk.encrypt(&mut rng, &m, &params.hs[0]);
        let (second, _) = pk.encrypt(&mut rng, &m, &params.hs[0]);
        assert_ne!(first, second);
        assert_eq!(sk.decrypt(&first), sk.decrypt(&second));
        assert_eq!(format!("{:?}", sk), "PrivateKey(..)");
    }
}
