//! # Threshold anonymous credentials using Coconut
//!
//! - Based on the paper [Coconut: Threshold Issuance Selective Disclosure Credentials with Applications to Distributed Ledgers](https://arxiv.org/abs/1802.07344).
//! - Credentials are Pointcheval-Sanders style signatures `(h, h * (x + \sum_{i}(y_{i} * m_{i})))` over
//! scalar attributes, issued by `n` authorities of which any `t` suffice.
//! - Private attributes are committed to and ElGamal-encrypted by the holder so that authorities
//! blindly sign them (`prepare_blind_sign` / `blind_sign` / `BlindedSignature::unblind`).
//! - Partial credentials and verification keys are combined by Lagrange interpolation at `0`
//! (`aggregate_signatures` / `aggregate_verification_keys`).
//! - A credential is presented by `show_blind_signature`, which hides the private attributes
//! behind a proof of knowledge, and checked with `blind_verify`.
//!
//! Every operation drawing randomness takes the random source as an explicit `&mut R` argument.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod elgamal;
pub mod encoding;
mod error;
mod helpers;
pub mod proof;
pub mod setup;
pub mod signature;


pub use error::CoconutError;
pub use helpers::{hash_to_g1, lagrange_coefficients};
pub use proof::*;
pub use setup::{
    keygen,
    keygen::{ttp_keygen, Threshold},
    Params, SecretKey, VerificationKey,
};
pub use signature::*;
