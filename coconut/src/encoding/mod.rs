//! Stable binary encodings of keys, signatures, and protocol messages.
//!
//! Scalars take `scalar_len::<F>()` big-endian bytes, points use the compressed canonical form.
//! Keys consist of fixed-size parts one after another, so their length determines the
//! attribute count. Protocol messages with several variable-length parts prefix each of them with
//! a big-endian `u32` count.

use alloc::{string::String, vec::Vec};

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::{BigInteger, PrimeField};

use crate::{
    elgamal::{Encryption, PrivateKey, PublicKey},
    proof::{SignerProof, VerifierProof},
    setup::{Params, SecretKey, VerificationKey},
    BlindShowMats, BlindSignMats, BlindedSignature, PolynomialPoints, Signature,
};

pub mod armor;

pub use armor::Armored;

/// An error produced while decoding.
/// None of the variants carry the decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    TruncatedInput {
        needed: usize,
        available: usize,
    },
    /// Amount of bytes left after the decoded item.
    TrailingData(usize),
    /// Bytes don't represent a canonical scalar or a valid point.
    InvalidEncoding,
    WrongKeyType {
        expected: &'static str,
        found: String,
    },
    InvalidArmor,
}

/// Produces stable binary encoding.
pub trait ToBytes {
    /// Appends encoding of `self` to `out`.
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), EncodingError>;

    fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut out = Vec::new();
        self.write_bytes(&mut out)?;

        Ok(out)
    }
}

/// Restores item from its binary encoding produced by `ToBytes`.
pub trait FromBytes: Sized {
    /// Reads `Self` from the reader, leaving the rest of its bytes untouched.
    fn read_bytes(reader: &mut Reader<'_>) -> Result<Self, EncodingError>;

    /// Decodes `Self` requiring all of `bytes` to be consumed.
    fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let mut reader = Reader::new(bytes);
        let item = Self::read_bytes(&mut reader)?;
        reader.finish()?;

        Ok(item)
    }
}

/// Amount of bytes taken by an encoded scalar: `ceil(MODULUS_BIT_SIZE / 8)`.
pub fn scalar_len<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE as usize + 7) / 8
}

/// Amount of bytes taken by an encoded point.
pub fn point_len<G: AffineRepr>() -> usize {
    G::zero().compressed_size()
}

/// Fixed-width big-endian encoding of a scalar.
pub fn scalar_to_bytes<F: PrimeField>(scalar: &F) -> Vec<u8> {
    let bytes = scalar.into_bigint().to_bytes_be();

    bytes[bytes.len() - scalar_len::<F>()..].to_vec()
}

/// Cursor over encoded bytes.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Amount of bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Ensures that all bytes were consumed.
    pub fn finish(self) -> Result<(), EncodingError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(EncodingError::TrailingData(self.remaining()))
        }
    }

    /// Consumes `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], EncodingError> {
        if len > self.bytes.len() {
            Err(EncodingError::TruncatedInput {
                needed: len,
                available: self.bytes.len(),
            })?
        }
        let (taken, rest) = self.bytes.split_at(len);
        self.bytes = rest;

        Ok(taken)
    }

    /// Reads a big-endian `u32` count.
    pub fn count(&mut self) -> Result<usize, EncodingError> {
        let mut count = [0u8; 4];
        count.copy_from_slice(self.take(4)?);

        Ok(u32::from_be_bytes(count) as usize)
    }

    pub fn scalar<F: PrimeField>(&mut self) -> Result<F, EncodingError> {
        let bytes = self.take(scalar_len::<F>())?;
        let scalar = F::from_be_bytes_mod_order(bytes);

        // Values not below the modulus would be reduced silently.
        if scalar_to_bytes(&scalar) == bytes {
            Ok(scalar)
        } else {
            Err(EncodingError::InvalidEncoding)
        }
    }

    pub fn point<G: AffineRepr>(&mut self) -> Result<G, EncodingError> {
        let bytes = self.take(point_len::<G>())?;

        G::deserialize_compressed(bytes).map_err(|_| EncodingError::InvalidEncoding)
    }

    /// Reads `count` scalars. Fails before allocating if there aren't enough bytes.
    pub fn scalars<F: PrimeField>(&mut self, count: usize) -> Result<Vec<F>, EncodingError> {
        self.ensure_available(count, scalar_len::<F>())?;

        (0..count).map(|_| self.scalar()).collect()
    }

    /// Reads `count` points. Fails before allocating if there aren't enough bytes.
    pub fn points<G: AffineRepr>(&mut self, count: usize) -> Result<Vec<G>, EncodingError> {
        self.ensure_available(count, point_len::<G>())?;

        (0..count).map(|_| self.point()).collect()
    }

    /// Reads scalars until the input is exhausted.
    pub fn remaining_scalars<F: PrimeField>(&mut self) -> Result<Vec<F>, EncodingError> {
        let count = self.remaining().div_ceil(scalar_len::<F>());

        self.scalars(count)
    }

    /// Reads points until the input is exhausted.
    pub fn remaining_points<G: AffineRepr>(&mut self) -> Result<Vec<G>, EncodingError> {
        let count = self.remaining().div_ceil(point_len::<G>());

        self.points(count)
    }

    fn ensure_available(&self, count: usize, item_len: usize) -> Result<(), EncodingError> {
        let needed = count.saturating_mul(item_len);
        if needed > self.remaining() {
            Err(EncodingError::TruncatedInput {
                needed,
                available: self.remaining(),
            })
        } else {
            Ok(())
        }
    }
}

fn write_point<G: AffineRepr>(point: &G, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    point
        .serialize_compressed(out)
        .map_err(|_| EncodingError::InvalidEncoding)
}

fn write_count(count: usize, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    let count = u32::try_from(count).map_err(|_| EncodingError::InvalidEncoding)?;
    out.extend_from_slice(&count.to_be_bytes());

    Ok(())
}

fn write_scalars<'a, F: PrimeField>(scalars: impl IntoIterator<Item = &'a F>, out: &mut Vec<u8>) {
    for scalar in scalars {
        out.extend(scalar_to_bytes(scalar));
    }
}

/// Implements `ToBytes` and `FromBytes` for a type consisting of the listed parts.
/// A part is a `scalar`, a `point`, an encodable `item`, or a vector of them (`scalars` etc).
/// Vectors get a `u32` count prefix unless marked as `remaining_*`, which must be the last part.
macro_rules! impl_bytes {
    ($ty: ident<$param: ident: $bound: ident> { $($part: ident $field: ident),+ $(,)? }) => {
        impl<$param: $bound> ToBytes for $ty<$param> {
            fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
                $(impl_bytes!(@write $part, self.$field, out);)+

                Ok(())
            }
        }

        impl<$param: $bound> FromBytes for $ty<$param> {
            fn read_bytes(reader: &mut Reader<'_>) -> Result<Self, EncodingError> {
                Ok(Self {
                    $($field: impl_bytes!(@read $part, reader),)+
                })
            }
        }
    };
    (@write scalar, $value: expr, $out: ident) => {
        $out.extend(scalar_to_bytes(&$value))
    };
    (@write point, $value: expr, $out: ident) => {
        write_point(&$value, $out)?
    };
    (@write item, $value: expr, $out: ident) => {
        $value.write_bytes($out)?
    };
    (@write scalars, $value: expr, $out: ident) => {{
        write_count($value.len(), $out)?;
        write_scalars(&$value, $out);
    }};
    (@write points, $value: expr, $out: ident) => {{
        write_count($value.len(), $out)?;
        for point in &$value {
            write_point(point, $out)?;
        }
    }};
    (@write items, $value: expr, $out: ident) => {{
        write_count($value.len(), $out)?;
        for item in &$value {
            item.write_bytes($out)?;
        }
    }};
    (@write remaining_scalars, $value: expr, $out: ident) => {
        write_scalars(&$value, $out)
    };
    (@write remaining_points, $value: expr, $out: ident) => {
        for point in &$value {
            write_point(point, $out)?;
        }
    };
    (@read scalar, $reader: ident) => {
        $reader.scalar()?
    };
    (@read point, $reader: ident) => {
        $reader.point()?
    };
    (@read item, $reader: ident) => {
        FromBytes::read_bytes($reader)?
    };
    (@read scalars, $reader: ident) => {{
        let count = $reader.count()?;
        $reader.scalars(count)?
    }};
    (@read points, $reader: ident) => {{
        let count = $reader.count()?;
        $reader.points(count)?
    }};
    (@read items, $reader: ident) => {{
        let count = $reader.count()?;
        (0..count)
            .map(|_| FromBytes::read_bytes($reader))
            .collect::<Result<_, _>>()?
    }};
    (@read remaining_scalars, $reader: ident) => {
        $reader.remaining_scalars()?
    };
    (@read remaining_points, $reader: ident) => {
        $reader.remaining_points()?
    };
}

impl_bytes!(Params<E: Pairing> {
    point g1,
    point g2,
    remaining_points hs,
});
impl_bytes!(VerificationKey<E: Pairing> {
    point g2,
    point alpha,
    remaining_points beta,
});
impl_bytes!(PublicKey<E: Pairing> { point g1, point gamma });
impl_bytes!(Encryption<E: Pairing> { point c1, point c2 });
impl_bytes!(Signature<E: Pairing> { point sig1, point sig2 });
impl_bytes!(BlindedSignature<E: Pairing> { point sig1, item sig2_tilde });
impl_bytes!(SignerProof<E: Pairing> {
    scalar challenge,
    scalar rr,
    scalars rk,
    scalars rm,
});
impl_bytes!(VerifierProof<E: Pairing> {
    scalar challenge,
    scalars rm,
    scalar rt,
});
impl_bytes!(BlindSignMats<E: Pairing> {
    point cm,
    items enc,
    item proof,
});
impl_bytes!(BlindShowMats<E: Pairing> {
    point kappa,
    point nu,
    item proof,
});
impl_bytes!(SecretKey<F: PrimeField> {
    scalar x,
    remaining_scalars y,
});

impl<F: PrimeField> ToBytes for PrivateKey<F> {
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        out.extend(scalar_to_bytes(&self.0));

        Ok(())
    }
}

impl<F: PrimeField> FromBytes for PrivateKey<F> {
    fn read_bytes(reader: &mut Reader<'_>) -> Result<Self, EncodingError> {
        reader.scalar().map(Self)
    }
}

impl<F: PrimeField> ToBytes for PolynomialPoints<F> {
    fn write_bytes(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_count(self.0.len(), out)?;
        write_scalars(&self.0, out);

        Ok(())
    }
}

impl<F: PrimeField> FromBytes for PolynomialPoints<F> {
    fn read_bytes(reader: &mut Reader<'_>) -> Result<Self, EncodingError> {
        let count = reader.count()?;

        reader.scalars(count).map(Self)
    }
}
