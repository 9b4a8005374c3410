use crate::errors::{PlonkError, Result};
use crate::poly_commit::{field_polynomial::FpPolynomial, transcript::PolyComTranscript};
use legend_algebra::prelude::*;
use merlin::Transcript;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The trait for help serialize to bytes,
/// implement by polynomial commitment.
pub trait ToBytes {
    /// Convert to bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Elements that combine linearly the way the committed polynomials do.
/// Both commitments and plain polynomials implement it, so the same code can
/// build a polynomial on the prover side and its digest on the verifier side.
pub trait HomomorphicPolyComElem: ToBytes + Clone {
    /// This is the scalar field of the polynomial.
    type Scalar;

    /// Get base (generator) of the group.
    fn get_base() -> Self;

    /// Get identity of the group.
    fn get_identity() -> Self;

    /// Add the underlying polynomials.
    fn add(&self, other: &Self) -> Self;

    /// Add assign the underlying polynomials.
    fn add_assign(&mut self, other: &Self);

    /// Subtract the underlying polynomials.
    fn sub(&self, other: &Self) -> Self;

    /// Subtract assign the underlying polynomials.
    fn sub_assign(&mut self, other: &Self);

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul(&self, exp: &Self::Scalar) -> Self;

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul_assign(&mut self, exp: &Self::Scalar);
}

impl<F: Scalar> ToBytes for FpPolynomial<F> {
    fn to_bytes(&self) -> Vec<u8> {
        self.coefs.iter().flat_map(|coef| coef.to_bytes()).collect()
    }
}

impl<F: Scalar> HomomorphicPolyComElem for FpPolynomial<F> {
    type Scalar = F;

    fn get_base() -> Self {
        FpPolynomial::one()
    }

    fn get_identity() -> Self {
        FpPolynomial::zero()
    }

    fn add(&self, other: &Self) -> Self {
        FpPolynomial::add(self, other)
    }

    fn add_assign(&mut self, other: &Self) {
        FpPolynomial::add_assign(self, other)
    }

    fn sub(&self, other: &Self) -> Self {
        FpPolynomial::sub(self, other)
    }

    fn sub_assign(&mut self, other: &Self) {
        FpPolynomial::sub_assign(self, other)
    }

    fn mul(&self, exp: &F) -> Self {
        self.mul_scalar(exp)
    }

    fn mul_assign(&mut self, exp: &F) {
        self.mul_scalar_assign(exp)
    }
}

/// A claim `p(point) = claimed_value` with its opening proof `h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningProof<C, F> {
    /// Commitment to the quotient `(p(X) - p(point)) / (X - point)`.
    pub h: C,
    /// The claimed evaluation.
    pub claimed_value: F,
}

/// Several claims at one shared point, opened through a single folded polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOpeningProof<C, F> {
    /// Commitment to the quotient of the folded polynomial.
    pub h: C,
    /// The claimed evaluations, in the order the polynomials were given.
    pub claimed_values: Vec<F>,
}

/// Trait for polynomial commitment scheme.
pub trait PolyComScheme: Sized {
    /// Type of prime field.
    type Field: Domain;

    /// Type of commitment produces, need to implement `HomomorphicPolyComElem`.
    type Commitment: HomomorphicPolyComElem<Scalar = Self::Field>
        + Debug
        + PartialEq
        + Eq
        + Clone
        + Serialize
        + for<'de> Deserialize<'de>;

    /// Return maximum supported degree.
    fn max_degree(&self) -> usize;

    /// Commit to the polynomial. Fails if the degree exceeds the key capacity.
    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment>;

    /// Evaluate the polynomial.
    fn eval(&self, poly: &FpPolynomial<Self::Field>, point: &Self::Field) -> Self::Field;

    /// Return the commitment to `(poly(X) - poly(x)) / (X - x)`.
    fn prove(
        &self,
        poly: &FpPolynomial<Self::Field>,
        x: &Self::Field,
        max_degree: usize,
    ) -> Result<Self::Commitment>;

    /// Verify that the polynomial committed in `cm` evaluates to `eval` at `point`.
    fn verify(
        &self,
        cm: &Self::Commitment,
        degree: usize,
        point: &Self::Field,
        eval: &Self::Field,
        proof: &Self::Commitment,
    ) -> Result<()>;

    /// Verify openings of different commitments at different points in one check,
    /// combined with powers of `challenge`.
    fn batch_verify_diff_points(
        &self,
        cm_vec: &[Self::Commitment],
        point_vec: &[Self::Field],
        eval_vec: &[Self::Field],
        proofs: &[Self::Commitment],
        challenge: &Self::Field,
    ) -> Result<()>;

    /// Shrink this to only for verifier use.
    fn shrink_to_verifier_only(&self) -> Result<Self>;

    /// Open one polynomial at `point`.
    fn open(
        &self,
        poly: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<OpeningProof<Self::Commitment, Self::Field>> {
        Ok(OpeningProof {
            h: self.prove(poly, point, self.max_degree())?,
            claimed_value: self.eval(poly, point),
        })
    }

    /// Open all `polys` at the shared `point`. The point, the digests and the claims are
    /// bound into `transcript` before the folding challenge is drawn.
    fn batch_open_single_point(
        &self,
        transcript: &mut Transcript,
        polys: &[&FpPolynomial<Self::Field>],
        digests: &[&Self::Commitment],
        point: &Self::Field,
    ) -> Result<BatchOpeningProof<Self::Commitment, Self::Field>> {
        if polys.is_empty() || polys.len() != digests.len() {
            return Err(PlonkError::Message(format!(
                "cannot batch {} polynomials with {} digests",
                polys.len(),
                digests.len()
            )));
        }
        let claimed_values: Vec<Self::Field> =
            polys.iter().map(|poly| self.eval(poly, point)).collect();

        let fold = batch_challenge(transcript, point, digests, &claimed_values);

        let mut folded = FpPolynomial::zero();
        let mut coef = Self::Field::one();
        for poly in polys.iter() {
            folded.add_assign(&poly.mul_scalar(&coef));
            coef.mul_assign(&fold);
        }

        Ok(BatchOpeningProof {
            h: self.prove(&folded, point, self.max_degree())?,
            claimed_values,
        })
    }

    /// Fold a batched opening into a single opening of the folded digest,
    /// replaying the transcript steps of `batch_open_single_point`.
    fn fold_batch_opening(
        &self,
        transcript: &mut Transcript,
        proof: &BatchOpeningProof<Self::Commitment, Self::Field>,
        digests: &[&Self::Commitment],
        point: &Self::Field,
    ) -> Result<(
        Self::Commitment,
        OpeningProof<Self::Commitment, Self::Field>,
    )> {
        if digests.is_empty() || digests.len() != proof.claimed_values.len() {
            return Err(PlonkError::VerificationError);
        }
        let fold = batch_challenge(transcript, point, digests, &proof.claimed_values);

        let mut folded_digest = Self::Commitment::get_identity();
        let mut folded_claim = Self::Field::zero();
        let mut coef = Self::Field::one();
        for (digest, claim) in digests.iter().zip(proof.claimed_values.iter()) {
            folded_digest.add_assign(&digest.mul(&coef));
            folded_claim.add_assign(&claim.mul(&coef));
            coef.mul_assign(&fold);
        }

        Ok((
            folded_digest,
            OpeningProof {
                h: proof.h.clone(),
                claimed_value: folded_claim,
            },
        ))
    }
}

fn batch_challenge<C: ToBytes, F: Scalar>(
    transcript: &mut Transcript,
    point: &F,
    digests: &[&C],
    claimed_values: &[F],
) -> F {
    transcript.append_message(b"Domain Separator", b"Batch Opening");
    transcript.append_field_elem(point);
    for digest in digests.iter() {
        transcript.append_commitment(*digest);
    }
    for value in claimed_values.iter() {
        transcript.append_field_elem(value);
    }
    transcript.get_challenge_field_elem(b"batch_fold")
}

#[cfg(test)]
mod test {
    use crate::poly_commit::{
        field_polynomial::FpPolynomial,
        kzg_poly_com::KZGCommitmentSchemeBN254,
        pcs::{HomomorphicPolyComElem, PolyComScheme},
    };
    use legend_algebra::{bn254::BN254Scalar, prelude::*};
    use merlin::Transcript;
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_batch_open_single_point() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBN254::new(40, &mut prng);

        let polys: Vec<FpPolynomial<BN254Scalar>> = (0..5)
            .map(|i| FpPolynomial::random(&mut prng, 10 + 5 * i))
            .collect();
        let digests: Vec<_> = polys.iter().map(|p| pcs.commit(p).unwrap()).collect();
        let point = BN254Scalar::random(&mut prng);

        let poly_refs: Vec<_> = polys.iter().collect();
        let digest_refs: Vec<_> = digests.iter().collect();
        let batch = {
            let mut transcript = Transcript::new(b"TestPCS");
            pcs.batch_open_single_point(&mut transcript, &poly_refs, &digest_refs, &point)
                .unwrap()
        };

        // Batched claims coincide with individual openings.
        for (poly, claim) in polys.iter().zip(batch.claimed_values.iter()) {
            let single = pcs.open(poly, &point).unwrap();
            assert_eq!(single.claimed_value, *claim);
        }
        for (poly, digest) in polys.iter().zip(digests.iter()) {
            let single = pcs.open(poly, &point).unwrap();
            assert!(pcs
                .verify(digest, poly.degree(), &point, &single.claimed_value, &single.h)
                .is_ok());
        }

        let mut transcript = Transcript::new(b"TestPCS");
        let (folded_digest, folded) = pcs
            .fold_batch_opening(&mut transcript, &batch, &digest_refs, &point)
            .unwrap();
        assert!(pcs
            .verify(&folded_digest, 40, &point, &folded.claimed_value, &folded.h)
            .is_ok());

        // A tampered claim changes the folding challenge and the folded claim.
        let mut bad = batch.clone();
        bad.claimed_values[2].add_assign(&BN254Scalar::one());
        let mut transcript = Transcript::new(b"TestPCS");
        let (folded_digest, folded) = pcs
            .fold_batch_opening(&mut transcript, &bad, &digest_refs, &point)
            .unwrap();
        assert!(pcs
            .verify(&folded_digest, 40, &point, &folded.claimed_value, &folded.h)
            .is_err());

        // Mismatched inputs are rejected.
        let mut transcript = Transcript::new(b"TestPCS");
        assert!(pcs
            .fold_batch_opening(&mut transcript, &batch, &digest_refs[..4], &point)
            .is_err());
        let mut transcript = Transcript::new(b"TestPCS");
        assert!(pcs
            .batch_open_single_point(&mut transcript, &poly_refs[..3], &digest_refs, &point)
            .is_err());
    }

    #[test]
    fn test_polynomials_are_homomorphic_elems() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let p = FpPolynomial::<BN254Scalar>::random(&mut prng, 6);
        let q = FpPolynomial::<BN254Scalar>::random(&mut prng, 9);
        let s = BN254Scalar::random(&mut prng);

        let mut acc = <FpPolynomial<BN254Scalar> as HomomorphicPolyComElem>::get_identity();
        HomomorphicPolyComElem::add_assign(&mut acc, &HomomorphicPolyComElem::mul(&p, &s));
        HomomorphicPolyComElem::sub_assign(&mut acc, &q);

        let x = BN254Scalar::random(&mut prng);
        assert_eq!(acc.eval(&x), p.eval(&x).mul(&s).sub(&q.eval(&x)));
    }
}
