//! Blind issuance: the holder commits to and encrypts the private attributes, an authority signs
//! them without learning their values, and the holder decrypts the result.

use alloc::vec::Vec;

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
    elgamal::{Encryption, PrivateKey, PublicKey},
    helpers::{hash_to_g1, points, rand},
    proof::{SignerProof, SignerStatement, SignerWitnesses},
    setup::{Params, SecretKey},
    CoconutError,
};

/// Request for a blind signature sent by the holder to each authority.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindSignMats<E: Pairing> {
    /// `cm = g1 * r + \sum_{j}(hs_{j} * m_{j})` over private attributes followed by public ones.
    #[serde_as(as = "ArkObjectBytes")]
    pub cm: E::G1Affine,
    /// Encryptions of `h * m_{i}` for each private attribute.
    pub enc: Vec<Encryption<E>>,
    pub proof: SignerProof<E>,
}

/// Signature with `sig2` encrypted under the holder's ElGamal public key.
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
pub struct BlindedSignature<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub sig1: E::G1Affine,
    pub sig2_tilde: Encryption<E>,
}

/// Builds a blind signature request for attributes `priv_m || pub_m`.
///
/// The private attributes get ElGamal-encrypted under `eg_pub` with `h = H(cm)` as the base,
/// the encryptions draw from `rng` one after another in attribute order.
pub fn prepare_blind_sign<R: RngCore, E: Pairing, D: Digest>(
    rng: &mut R,
    params: &Params<E>,
    eg_pub: &PublicKey<E>,
    pub_m: &[E::ScalarField],
    priv_m: &[E::ScalarField],
) -> Result<BlindSignMats<E>, CoconutError> {
    if priv_m.is_empty() {
        Err(CoconutError::NoPrivateAttributes)?
    }
    let received = priv_m.len() + pub_m.len();
    if received > params.max_attributes() {
        Err(CoconutError::TooManyAttributes {
            received,
            max: params.max_attributes(),
        })?
    }
    let timer = start_timer!(|| "Prepare blind sign");

    let mut attributes: Vec<_> = priv_m.iter().chain(pub_m).copied().collect();
    let mut r: E::ScalarField = rand(rng);
    let cm = (params.g1.mul_bigint(r.into_bigint())
        + E::G1::msm_unchecked(&params.hs[..attributes.len()], &attributes))
    .into_affine();
    let h = commitment_hash::<E, D>(&cm)?;

    let (enc, mut k): (Vec<_>, Vec<_>) = priv_m
        .iter()
        .map(|m| eg_pub.encrypt(rng, m, &h))
        .unzip();

    let proof = SignerProof::new::<R, D>(
        rng,
        params,
        &SignerStatement {
            gamma: &eg_pub.gamma,
            cm: &cm,
            h: &h,
            enc: &enc,
        },
        SignerWitnesses {
            r: &r,
            k: &k,
            m: &attributes,
        },
    );
    r.zeroize();
    k.zeroize();
    attributes.zeroize();

    end_timer!(timer);
    Ok(BlindSignMats {
        cm,
        enc,
        proof: proof?,
    })
}

/// Blindly signs the request after verifying its `SignerProof`. `pub_m` must be the same public
/// attributes the request was prepared for.
///
/// `sig1 = h`, `sig2_tilde = (\sum_{i}(c1_{i} * y_{i}), h * x + \sum_{j}(b_{j} * y_{j}))` where
/// `b` holds `c2_{i}` of the private attributes followed by `h * m_{j}` of the public ones.
pub fn blind_sign<E: Pairing, D: Digest>(
    params: &Params<E>,
    SecretKey { x, y }: &SecretKey<E::ScalarField>,
    BlindSignMats { cm, enc, proof }: &BlindSignMats<E>,
    eg_pub: &PublicKey<E>,
    pub_m: &[E::ScalarField],
) -> Result<BlindedSignature<E>, CoconutError> {
    let received = enc.len() + pub_m.len();
    let max = params.max_attributes().min(y.len());
    if received > max {
        Err(CoconutError::TooManyAttributes { received, max })?
    }

    let h = commitment_hash::<E, D>(cm)?;
    let statement = SignerStatement {
        gamma: &eg_pub.gamma,
        cm,
        h: &h,
        enc,
    };
    if proof.attribute_count() != received || !proof.verify::<D>(params, &statement) {
        Err(CoconutError::InvalidProof)?
    }
    let timer = start_timer!(|| "Blind sign");

    let y_priv = &y[..enc.len()];
    let c1: Vec<_> = enc.iter().map(|Encryption { c1, .. }| *c1).collect();
    let b: Vec<_> = enc
        .iter()
        .map(|Encryption { c2, .. }| *c2)
        .chain(points(&h, pub_m))
        .collect();

    let t2 = E::G1::msm_unchecked(&c1, y_priv);
    let t3 = h.mul_bigint(x.into_bigint()) + E::G1::msm_unchecked(&b, &y[..received]);

    end_timer!(timer);
    Ok(BlindedSignature {
        sig1: h,
        sig2_tilde: Encryption::new(t2.into_affine(), t3.into_affine()),
    })
}

impl<E: Pairing> BlindedSignature<E> {
    /// Decrypts `sig2_tilde` producing a signature over `priv_m || pub_m`.
    pub fn unblind(&self, eg_priv: &PrivateKey<E::ScalarField>) -> Signature<E> {
        Signature::combine(self.sig1, eg_priv.decrypt(&self.sig2_tilde))
    }
}

/// `h = H(cm)` over the compressed form of `cm`.
pub(crate) fn commitment_hash<E: Pairing, D: Digest>(
    cm: &E::G1Affine,
) -> Result<E::G1Affine, SerializationError> {
    let mut bytes = Vec::new();
    cm.serialize_compressed(&mut bytes)?;

    Ok(hash_to_g1::<E, D>(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{elgamal, helpers::n_rand, setup::test_setup};
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_std::{
        cfg_into_iter,
        rand::{rngs::StdRng, SeedableRng},
    };
    use blake2::Blake2b512;

    #[cfg(feature = "parallel")]
    use rayon::prelude::*;

    #[test]
    fn blind_sign_unblind() {
        cfg_into_iter!(1..5).for_each(|attribute_count| {
            cfg_into_iter!(1..=attribute_count).for_each(|private_count| {
                let mut rng = StdRng::seed_from_u64(0u64);
                let (sk, vk, params, attributes) =
                    test_setup::<Bls12_381, Blake2b512, _>(&mut rng, attribute_count);
                let (eg_priv, eg_pub) = elgamal::keygen(&mut rng, &params);
                let (priv_m, pub_m) = attributes.split_at(private_count);

                let mats = prepare_blind_sign::<_, _, Blake2b512>(
                    &mut rng, &params, &eg_pub, pub_m, priv_m,
                )
                .unwrap();
                assert_eq!(mats.enc.len(), private_count);
                assert_eq!(mats.proof.private_attribute_count(), private_count);
                assert_eq!(mats.proof.attribute_count(), attribute_count);

                let blinded =
                    blind_sign::<_, Blake2b512>(&params, &sk, &mats, &eg_pub, pub_m).unwrap();
                assert_eq!(
                    blinded.sig1,
                    commitment_hash::<Bls12_381, Blake2b512>(&mats.cm).unwrap()
                );

                let sig = blinded.unblind(&eg_priv);
                assert!(sig.verify(&attributes, &vk));

                let (other_priv, _) = elgamal::keygen(&mut rng, &params);
                assert!(!blinded.unblind(&other_priv).verify(&attributes, &vk));
            })
        })
    }

    #[test]
    fn prepare_blind_sign_boundaries() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (_, _, params, attributes) = test_setup::<Bls12_381, Blake2b512, _>(&mut rng, 3);
        let (_, eg_pub) = elgamal::keygen(&mut rng, &params);

        assert_eq!(
            prepare_blind_sign::<_, _, Blake2b512>(&mut rng, &params, &eg_pub, &attributes, &[]),
            Err(CoconutError::NoPrivateAttributes)
        );

        let extra: Vec<Fr> = n_rand(&mut rng, 2).collect();
        assert_eq!(
            prepare_blind_sign::<_, _, Blake2b512>(&mut rng, &params, &eg_pub, &extra, &attributes),
            Err(CoconutError::TooManyAttributes {
                received: 5,
                max: 3
            })
        );
    }

    #[test]
    fn rejects_invalid_requests() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (sk, vk, params, attributes) = test_setup::<Bls12_381, Blake2b512, _>(&mut rng, 4);
        let (eg_priv, eg_pub) = elgamal::keygen(&mut rng, &params);
        let (priv_m, pub_m) = attributes.split_at(2);

        let mats =
            prepare_blind_sign::<_, _, Blake2b512>(&mut rng, &params, &eg_pub, pub_m, priv_m)
                .unwrap();

        assert_eq!(
            blind_sign::<_, Blake2b512>(&params, &sk, &mats, &eg_pub, &pub_m[..1]),
            Err(CoconutError::InvalidProof)
        );

        let (_, other_eg_pub) = elgamal::keygen(&mut rng, &params);
        assert_eq!(
            blind_sign::<_, Blake2b512>(&params, &sk, &mats, &other_eg_pub, pub_m),
            Err(CoconutError::InvalidProof)
        );

        let mut tampered = mats.clone();
        tampered.enc.swap(0, 1);
        assert_eq!(
            blind_sign::<_, Blake2b512>(&params, &sk, &tampered, &eg_pub, pub_m),
            Err(CoconutError::InvalidProof)
        );

        let mut tampered = mats.clone();
        tampered.cm = (tampered.cm.into_group() + params.g1).into_affine();
        assert_eq!(
            blind_sign::<_, Blake2b512>(&params, &sk, &tampered, &eg_pub, pub_m),
            Err(CoconutError::InvalidProof)
        );

        let mut tampered = mats.clone();
        tampered.proof.rm[3] += Fr::from(1u64);
        assert_eq!(
            blind_sign::<_, Blake2b512>(&params, &sk, &tampered, &eg_pub, pub_m),
            Err(CoconutError::InvalidProof)
        );

        // The authority signs whatever public attributes it is given.
        let mut other_pub_m = pub_m.to_vec();
        other_pub_m[0] += Fr::from(1u64);
        let sig = blind_sign::<_, Blake2b512>(&params, &sk, &mats, &eg_pub, &other_pub_m)
            .unwrap()
            .unblind(&eg_priv);
        let other_attributes: Vec<_> = priv_m.iter().chain(&other_pub_m).copied().collect();
        assert!(sig.verify(&other_attributes, &vk));
        assert!(!sig.verify(&attributes, &vk));
    }
}
