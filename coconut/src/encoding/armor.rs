//! Labeled text blocks for storing keys:
//!
//! ```text
//! -----BEGIN COCONUT SECRET KEY-----
//! <base64 of the binary encoding, 64 columns>
//! -----END COCONUT SECRET KEY-----
//! ```

use alloc::{string::String, vec::Vec};

use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use base64::{engine::general_purpose::STANDARD, Engine};

use super::{EncodingError, FromBytes, ToBytes};
use crate::{
    elgamal::{PrivateKey, PublicKey},
    setup::{SecretKey, VerificationKey},
};

const DASHES: &str = "-----";
const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const LINE_WIDTH: usize = 64;

/// A key which can be stored in a labeled block.
pub trait Armored: ToBytes + FromBytes {
    /// Label of the block.
    const TAG: &'static str;

    fn to_armored(&self) -> Result<String, EncodingError> {
        Ok(armor(Self::TAG, &self.to_bytes()?))
    }

    /// Decodes the block. Only one line terminator may follow the end line.
    fn from_armored(armored: &str) -> Result<Self, EncodingError> {
        Self::from_bytes(&dearmor(Self::TAG, armored)?)
    }
}

impl<F: PrimeField> Armored for SecretKey<F> {
    const TAG: &'static str = "COCONUT SECRET KEY";
}

impl<E: Pairing> Armored for VerificationKey<E> {
    const TAG: &'static str = "COCONUT VERIFICATION KEY";
}

impl<E: Pairing> Armored for PublicKey<E> {
    const TAG: &'static str = "ELGAMAL PUBLIC KEY";
}

impl<F: PrimeField> Armored for PrivateKey<F> {
    const TAG: &'static str = "ELGAMAL PRIVATE KEY";
}

/// Wraps `bytes` into a block labeled with `tag`.
pub fn armor(tag: &str, bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut armored = String::with_capacity(encoded.len() + 2 * (tag.len() + 20));

    armored.push_str(BEGIN);
    armored.push_str(tag);
    armored.push_str(DASHES);
    armored.push('\n');

    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(LINE_WIDTH.min(rest.len()));
        armored.push_str(line);
        armored.push('\n');
        rest = tail;
    }

    armored.push_str(END);
    armored.push_str(tag);
    armored.push_str(DASHES);
    armored.push('\n');

    armored
}

/// Extracts bytes from a block labeled with `expected_tag`.
pub fn dearmor(expected_tag: &'static str, armored: &str) -> Result<Vec<u8>, EncodingError> {
    let armored = armored
        .strip_suffix("\r\n")
        .or_else(|| armored.strip_suffix('\n'))
        .unwrap_or(armored);
    let mut lines = armored
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let tag = lines
        .next()
        .and_then(|line| line.strip_prefix(BEGIN))
        .and_then(|line| line.strip_suffix(DASHES))
        .ok_or(EncodingError::InvalidArmor)?;
    if tag != expected_tag {
        Err(EncodingError::WrongKeyType {
            expected: expected_tag,
            found: tag.into(),
        })?
    }

    let mut encoded = String::new();
    loop {
        let line = lines.next().ok_or(EncodingError::InvalidArmor)?;
        if let Some(end) = line.strip_prefix(END) {
            if end.strip_suffix(DASHES) != Some(tag) {
                Err(EncodingError::InvalidArmor)?
            }
            break;
        }
        encoded.push_str(line);
    }

    let trailing: usize = lines.map(|line| line.len() + 1).sum();
    if trailing != 0 {
        Err(EncodingError::TrailingData(trailing))?
    }

    STANDARD
        .decode(encoded)
        .map_err(|_| EncodingError::InvalidArmor)
}
