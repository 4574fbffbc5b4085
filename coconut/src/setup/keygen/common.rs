use core::ops::RangeInclusive;

use ark_ff::PrimeField;
use ark_serialize::*;
use serde::{Deserialize, Serialize};

use crate::CoconutError;

/// Index of an authority, `1..=n`. Never `0`: the polynomials' value at `0` is the unshared key.
pub type ParticipantId = u16;

/// Numbers relation `threshold` / `total` where `1 <= threshold <= total`.
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
pub struct Threshold(
    /// `threshold`
    pub(super) u16,
    /// `total`
    pub(super) u16,
);

impl Threshold {
    /// Constructs new `Threshold` if `1 <= threshold <= total`.
    pub fn new(threshold: u16, total: u16) -> Result<Self, CoconutError> {
        if threshold == 0 || threshold > total {
            Err(CoconutError::InvalidParameters)
        } else {
            Ok(Self(threshold, total))
        }
    }

    /// Amount of shares required to act as the unshared key.
    pub fn threshold(&self) -> u16 {
        self.0
    }

    /// Amount of authorities which receive a share.
    pub fn total(&self) -> u16 {
        self.1
    }

    /// Ids of all authorities, `1..=total`.
    pub fn participant_ids(&self) -> RangeInclusive<ParticipantId> {
        1..=self.1
    }
}

/// Converts an authority id into the point it is evaluated at.
pub fn participant_point<F: PrimeField>(id: ParticipantId) -> F {
    F::from(u64::from(id))
}
