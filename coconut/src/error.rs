use alloc::{format, string::String};

use ark_serialize::SerializationError;

/// An error originated from the Coconut scheme operations.
/// None of the variants carry secret scalars, attribute values or randomizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoconutError {
    /// `q`, `t` or `n` is out of the supported range.
    InvalidParameters,
    TooManyAttributes {
        received: usize,
        max: usize,
    },
    NoPrivateAttributes,
    InvalidAttributeCount {
        received: usize,
        max: usize,
    },
    /// A signer or verifier proof of knowledge failed to verify.
    InvalidProof,
    /// Duplicate interpolation points, or a zero point while interpolating at `0`.
    DegenerateInterpolation,
    EmptyAggregationSet,
    /// Items to be combined don't have matching shapes, e.g. keys of different length.
    IncompatibleAggregationSet,
    ProofConstruction(String),
}

impl From<SerializationError> for CoconutError {
    fn from(err: SerializationError) -> Self {
        Self::ProofConstruction(format!("{:?}", err))
    }
}
