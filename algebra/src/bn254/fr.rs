use crate::bn254::BN254_SCALAR_LEN;
use crate::prelude::*;
use crate::traits::Domain;
use ark_bn254::Fr;
use ark_ff::{BigInteger, FftField, Field, LegendreSymbol, PrimeField};
use ark_std::fmt::{Debug, Formatter};

/// An element of the BN254 scalar field `Fr`.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

impl Debug for BN254Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "BN254Scalar({})", self.0)
    }
}

impl One for BN254Scalar {
    #[inline]
    fn one() -> Self {
        Self(Fr::one())
    }
}

impl Zero for BN254Scalar {
    #[inline]
    fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for BN254Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul for BN254Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl<'a> Add<&'a BN254Scalar> for BN254Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a BN254Scalar> for BN254Scalar {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0;
    }
}

impl<'a> SubAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= rhs.0;
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= rhs.0;
    }
}

impl Neg for BN254Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum<BN254Scalar> for BN254Scalar {
    fn sum<I: Iterator<Item = BN254Scalar>>(iter: I) -> Self {
        Self(iter.map(|x| x.0).sum())
    }
}

impl<'a> Sum<&'a BN254Scalar> for BN254Scalar {
    fn sum<I: Iterator<Item = &'a BN254Scalar>>(iter: I) -> Self {
        Self(iter.map(|x| x.0).sum())
    }
}

impl From<u32> for BN254Scalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self(Fr::from(value))
    }
}

impl From<u64> for BN254Scalar {
    #[inline]
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl Scalar for BN254Scalar {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(Fr::GENERATOR)
    }

    fn get_field_size_le_bytes() -> Vec<u8> {
        Fr::MODULUS.to_bytes_le()
    }

    #[inline]
    fn bytes_len() -> usize {
        BN254_SCALAR_LEN
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > BN254_SCALAR_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        Ok(Self(Fr::from_le_bytes_mod_order(bytes)))
    }

    #[inline]
    fn inv(&self) -> Result<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(AlgebraError::GroupInversionError)
    }

    #[inline]
    fn legendre(&self) -> LegendreSymbol {
        self.0.legendre()
    }

    #[inline]
    fn pow(&self, exponent: &[u64]) -> Self {
        Self(self.0.pow(exponent))
    }
}

impl Domain for BN254Scalar {
    type Field = Fr;

    #[inline]
    fn get_field(&self) -> Fr {
        self.0
    }

    #[inline]
    fn from_field(field: Fr) -> Self {
        Self(field)
    }
}
