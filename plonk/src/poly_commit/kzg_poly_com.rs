use crate::errors::{PlonkError, Result};
use crate::poly_commit::{
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, PolyComScheme, ToBytes},
};
use legend_algebra::{bn254::BN254PairingEngine, prelude::*};

/// A KZG commitment: one point of the first source group.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct KZGCommitment<G>(pub G);

impl<G: Group> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed_bytes()
    }
}

impl<G: Group> KZGCommitment<G> {
    /// Decode a commitment from its compressed encoding.
    pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        G::from_compressed_bytes(bytes)
            .map(KZGCommitment)
            .map_err(|_| PlonkError::DeserializationError)
    }
}

impl<G: Group> HomomorphicPolyComElem for KZGCommitment<G> {
    type Scalar = G::ScalarType;

    fn get_base() -> Self {
        Self(G::get_base())
    }

    fn get_identity() -> Self {
        Self(G::get_identity())
    }

    fn add(&self, other: &Self) -> Self {
        Self(self.0 + &other.0)
    }

    fn add_assign(&mut self, other: &Self) {
        self.0 += &other.0;
    }

    fn sub(&self, other: &Self) -> Self {
        Self(self.0 - &other.0)
    }

    fn sub_assign(&mut self, other: &Self) {
        self.0 -= &other.0;
    }

    fn mul(&self, exp: &G::ScalarType) -> Self {
        Self(self.0 * exp)
    }

    fn mul_assign(&mut self, exp: &G::ScalarType) {
        self.0 = self.0 * exp;
    }
}

/// A KZG key over a pairing: `[s^i]` in the first group for `i <= max_degree`,
/// and `[1], [s]` in the second group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// `[1, s, s^2, ..., s^d]` in G1.
    pub powers_g1: Vec<P::G1>,
    /// `[1, s]` in G2.
    pub powers_g2: Vec<P::G2>,
}

/// KZG over BN254.
pub type KZGCommitmentSchemeBN254 = KZGCommitmentScheme<BN254PairingEngine>;

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Sample a key supporting polynomials of degree up to `max_degree`.
    /// The trapdoor is drawn from `prng` and dropped, so this is for tests and benches only.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> Self {
        let s = P::ScalarField::random(prng);

        let mut powers_g1 = Vec::with_capacity(max_degree + 1);
        let mut acc = P::G1::get_base();
        for _ in 0..=max_degree {
            powers_g1.push(acc);
            acc = acc * &s;
        }
        let base_g2 = P::G2::get_base();

        Self {
            powers_g1,
            powers_g2: vec![base_g2, base_g2 * &s],
        }
    }

    /// Raw encoding for trusted storage: the two lengths as little-endian `u32`,
    /// then every point uncompressed.
    pub fn to_unchecked_bytes(&self) -> Result<Vec<u8>> {
        let len_g1 = u32::try_from(self.powers_g1.len()).map_err(|_| PlonkError::SetupError)?;
        let len_g2 = u32::try_from(self.powers_g2.len()).map_err(|_| PlonkError::SetupError)?;

        let mut bytes = Vec::with_capacity(
            8 + self.powers_g1.len() * P::G1::unchecked_size()
                + self.powers_g2.len() * P::G2::unchecked_size(),
        );
        bytes.extend_from_slice(&len_g1.to_le_bytes());
        bytes.extend_from_slice(&len_g2.to_le_bytes());
        for point in self.powers_g1.iter() {
            bytes.extend(point.to_unchecked_bytes());
        }
        for point in self.powers_g2.iter() {
            bytes.extend(point.to_unchecked_bytes());
        }
        Ok(bytes)
    }

    /// Decode the output of `to_unchecked_bytes`. Points are not validated.
    pub fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let read_len = |range: core::ops::Range<usize>| -> Result<usize> {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(bytes.get(range).ok_or(PlonkError::DeserializationError)?);
            Ok(u32::from_le_bytes(buf) as usize)
        };
        let len_g1 = read_len(0..4)?;
        let len_g2 = read_len(4..8)?;
        if len_g1 == 0 || len_g2 != 2 {
            return Err(PlonkError::DeserializationError);
        }

        let size_g1 = P::G1::unchecked_size();
        let size_g2 = P::G2::unchecked_size();
        let (g1_bytes, g2_bytes) = bytes[8..].split_at(
            len_g1
                .checked_mul(size_g1)
                .filter(|n| *n <= bytes.len() - 8)
                .ok_or(PlonkError::DeserializationError)?,
        );
        if g2_bytes.len() != len_g2 * size_g2 {
            return Err(PlonkError::DeserializationError);
        }

        let powers_g1 = g1_bytes
            .chunks(size_g1)
            .map(P::G1::from_unchecked_bytes)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        let powers_g2 = g2_bytes
            .chunks(size_g2)
            .map(P::G2::from_unchecked_bytes)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            powers_g1,
            powers_g2,
        })
    }

    /// Check `e(w, [s]) = e(c, [1])`, the common shape of every KZG check once
    /// the openings have been moved to one side.
    fn pairing_equation(&self, w: &P::G1, c: &P::G1) -> Result<()> {
        let (g2, s_g2) = match self.powers_g2.as_slice() {
            [g2, s_g2, ..] => (g2, s_g2),
            _ => return Err(PlonkError::SetupError),
        };
        if P::pairing_check(w, s_g2, &-*c, g2) {
            Ok(())
        } else {
            Err(PlonkError::VerificationError)
        }
    }

    fn g1_base(&self) -> Result<P::G1> {
        self.powers_g1.first().copied().ok_or(PlonkError::SetupError)
    }
}

impl<P: Pairing> PolyComScheme for KZGCommitmentScheme<P> {
    type Field = P::ScalarField;
    type Commitment = KZGCommitment<P::G1>;

    fn max_degree(&self) -> usize {
        self.powers_g1.len().saturating_sub(1)
    }

    fn commit(&self, polynomial: &FpPolynomial<P::ScalarField>) -> Result<Self::Commitment> {
        let coefs = polynomial.get_coefs_ref();
        if coefs.len() > self.powers_g1.len() {
            return Err(PlonkError::DegreeError);
        }
        let scalars: Vec<&P::ScalarField> = coefs.iter().collect();
        let bases: Vec<&P::G1> = self.powers_g1.iter().take(coefs.len()).collect();
        Ok(KZGCommitment(P::G1::multi_exp(&scalars, &bases)))
    }

    fn eval(&self, poly: &FpPolynomial<Self::Field>, point: &Self::Field) -> Self::Field {
        poly.eval(point)
    }

    fn prove(
        &self,
        poly: &FpPolynomial<Self::Field>,
        x: &Self::Field,
        max_degree: usize,
    ) -> Result<Self::Commitment> {
        if poly.degree() > max_degree {
            return Err(PlonkError::DegreeError);
        }
        let (quotient, _) = poly.divide_by_linear(x);
        self.commit(&quotient)
    }

    fn verify(
        &self,
        cm: &Self::Commitment,
        _degree: usize,
        point: &Self::Field,
        eval: &Self::Field,
        proof: &Self::Commitment,
    ) -> Result<()> {
        // e(w, [s]) = e(C - [y] + x * w, [1])
        let c = cm.0 - &(self.g1_base()? * eval) + &(proof.0 * point);
        self.pairing_equation(&proof.0, &c)
    }

    fn batch_verify_diff_points(
        &self,
        cm_vec: &[Self::Commitment],
        point_vec: &[Self::Field],
        eval_vec: &[Self::Field],
        proofs: &[Self::Commitment],
        challenge: &Self::Field,
    ) -> Result<()> {
        let n = proofs.len();
        if n == 0 || cm_vec.len() != n || point_vec.len() != n || eval_vec.len() != n {
            return Err(PlonkError::VerificationError);
        }

        // Fold the single-point equations with powers of `challenge`:
        // sum r^i w_i against sum r^i (C_i - [y_i] + x_i w_i).
        let mut folded_w = P::G1::get_identity();
        let mut folded_c = P::G1::get_identity();
        let mut folded_eval = Self::Field::zero();
        let mut r = Self::Field::one();
        for (((cm, point), eval), proof) in cm_vec
            .iter()
            .zip(point_vec)
            .zip(eval_vec)
            .zip(proofs)
        {
            let w = proof.0 * &r;
            folded_w += &w;
            folded_c += &(w * point);
            folded_c += &(cm.0 * &r);
            folded_eval += &(*eval * &r);
            r *= challenge;
        }
        folded_c -= &(self.g1_base()? * &folded_eval);

        self.pairing_equation(&folded_w, &folded_c)
    }

    fn shrink_to_verifier_only(&self) -> Result<Self> {
        if self.powers_g2.len() < 2 {
            return Err(PlonkError::SetupError);
        }
        Ok(Self {
            powers_g1: vec![self.g1_base()?],
            powers_g2: self.powers_g2[..2].to_vec(),
        })
    }
}
