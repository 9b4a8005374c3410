use crate::bn254::BN254Scalar;
use crate::prelude::*;
use ark_bn254::{G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{CurveGroup, Group as ArkGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use ark_std::fmt::{Debug, Formatter};

/// Serialize an arkworks value into a fresh buffer.
fn ark_to_bytes<T: CanonicalSerialize>(value: &T, compress: Compress) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.serialized_size(compress));
    // Writing into a `Vec` cannot fail.
    let _ = value.serialize_with_mode(&mut buf, compress);
    buf
}

fn ark_from_bytes<T: CanonicalDeserialize>(
    bytes: &[u8],
    compress: Compress,
    validate: Validate,
) -> Result<T> {
    T::deserialize_with_mode(bytes, compress, validate)
        .map_err(|_| AlgebraError::DeserializationError)
}

/// Wrap an arkworks projective curve group as a `Group` over `BN254Scalar`.
macro_rules! bn254_group {
    ($name:ident, $projective:ty, $affine:ty, $compressed_len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Default, PartialEq, Eq)]
        pub struct $name(pub(crate) $projective);

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0.into_affine())
            }
        }

        impl Group for $name {
            type ScalarType = BN254Scalar;
            const COMPRESSED_LEN: usize = $compressed_len;

            #[inline]
            fn get_identity() -> Self {
                Self(<$projective>::zero())
            }

            #[inline]
            fn get_base() -> Self {
                Self(<$projective>::generator())
            }

            #[inline]
            fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
                Self(<$projective>::rand(rng))
            }

            fn to_compressed_bytes(&self) -> Vec<u8> {
                ark_to_bytes(&self.0.into_affine(), Compress::Yes)
            }

            fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
                let affine: $affine = ark_from_bytes(bytes, Compress::Yes, Validate::Yes)?;
                Ok(Self(affine.into()))
            }

            fn to_unchecked_bytes(&self) -> Vec<u8> {
                ark_to_bytes(&self.0.into_affine(), Compress::No)
            }

            fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
                let affine: $affine = ark_from_bytes(bytes, Compress::No, Validate::No)?;
                Ok(Self(affine.into()))
            }

            #[inline]
            fn unchecked_size() -> usize {
                <$affine>::default().serialized_size(Compress::No)
            }

            fn multi_exp(scalars: &[&BN254Scalar], points: &[&Self]) -> Self {
                let bases = <$projective>::normalize_batch(
                    &points.iter().map(|p| p.0).collect::<Vec<_>>(),
                );
                let scalars: Vec<_> = scalars.iter().map(|s| s.0).collect();
                Self(<$projective>::msm_unchecked(&bases, &scalars))
            }
        }

        impl<'a> Add<&'a $name> for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: &Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> Sub<&'a $name> for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: &Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl<'a> Mul<&'a BN254Scalar> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: &BN254Scalar) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        impl<'a> AddAssign<&'a $name> for $name {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                self.0 += rhs.0;
            }
        }

        impl<'a> SubAssign<&'a $name> for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: &Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }
    };
}

bn254_group!(
    BN254G1,
    G1Projective,
    G1Affine,
    32,
    "A point of the BN254 G1 group, in projective coordinates."
);

bn254_group!(
    BN254G2,
    G2Projective,
    G2Affine,
    64,
    "A point of the BN254 G2 group, over the quadratic extension."
);
