use crate::prelude::*;
use ark_ff::FftField;
pub use ark_ff::LegendreSymbol;
use ark_std::fmt::Debug;
use serde::{Deserialize, Serialize};

/// Prime field elements.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + One
    + Zero
    + Add<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Sync
    + Send
{
    /// Sample a uniformly random element.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// The generator of the multiplicative group, a quadratic non-residue.
    fn multiplicative_generator() -> Self;

    /// The modulus as little-endian bytes.
    fn get_field_size_le_bytes() -> Vec<u8>;

    /// Length of the canonical encoding.
    fn bytes_len() -> usize;

    /// Canonical little-endian encoding of `bytes_len()` bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode at most `bytes_len()` little-endian bytes, reducing modulo the field size.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Multiplicative inverse, failing on zero.
    fn inv(&self) -> Result<Self>;

    /// Legendre symbol.
    fn legendre(&self) -> LegendreSymbol;

    /// `self^exponent`, the exponent given as u64 limbs, least significant first.
    fn pow(&self, exponent: &[u64]) -> Self;
}

/// Scalars backed by an arkworks field with large two-adic subgroups, so that
/// radix-2 FFTs can run on the underlying representation.
pub trait Domain: Scalar {
    /// The arkworks field.
    type Field: FftField;

    /// Return the arkworks representation.
    fn get_field(&self) -> Self::Field;

    /// Wrap an arkworks element.
    fn from_field(field: Self::Field) -> Self;
}

/// Elliptic curve groups, written additively.
pub trait Group:
    Debug
    + Default
    + Copy
    + PartialEq
    + Eq
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Neg<Output = Self>
    + Serialize
    + for<'de> Deserialize<'de>
{
    /// The scalar field acting on the group.
    type ScalarType: Scalar;

    /// Length of the compressed encoding.
    const COMPRESSED_LEN: usize;

    /// The point at infinity.
    fn get_identity() -> Self;

    /// The fixed generator.
    fn get_base() -> Self;

    /// Sample a uniformly random element.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Compressed encoding.
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Decode a compressed point, checking that it lies in the prime-order subgroup.
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Uncompressed affine coordinates, for trusted local storage.
    fn to_unchecked_bytes(&self) -> Vec<u8>;

    /// Decode uncompressed coordinates without any validation.
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self>;

    /// Length of the uncompressed encoding.
    fn unchecked_size() -> usize;

    /// Multi-scalar multiplication `sum scalars[i] * points[i]`, the identity when empty.
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self;
}

/// A bilinear pairing `e: G1 x G2 -> Gt`.
pub trait Pairing {
    /// The common scalar field.
    type ScalarField: Domain;

    /// Source group on the left.
    type G1: Group<ScalarType = Self::ScalarField>;

    /// Source group on the right.
    type G2: Group<ScalarType = Self::ScalarField>;

    /// Target group, only compared for equality.
    type Gt: Debug + Copy + PartialEq + Eq;

    /// Compute `e(a, b)`.
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// Return whether `e(a, b) * e(c, d)` is the identity of the target group,
    /// sharing the final exponentiation.
    fn pairing_check(a: &Self::G1, b: &Self::G2, c: &Self::G1, d: &Self::G2) -> bool;
}
