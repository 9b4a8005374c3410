use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{quotient_domain_factor, quotient_piece_len, NUM_QUOTIENT_PIECES, Z_BLINDING_ORDER},
};
use crate::poly_commit::{
    domain::EvaluationDomain,
    field_polynomial::FpPolynomial,
    kzg_poly_com::KZGCommitment,
    pcs::{BatchOpeningProof, OpeningProof, PolyComScheme, ToBytes},
};
use ark_std::{end_timer, start_timer};
use legend_algebra::prelude::*;
use rand_chacha::ChaChaRng;

/// Number of evaluations carried by a batched opening at `zeta`:
/// folded quotient, linearization, three wires and the first two permutations.
pub const NUM_BATCHED_CLAIMS: usize = 7;

/// The data structure of a Plonk proof.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct PlonkProof<C, F> {
    /// Commitments to the blinded left, right and output wire polynomials.
    pub cm_lro: [C; 3],
    /// Commitment to the blinded grand product polynomial.
    pub cm_z: C,
    /// Commitments to the three pieces of the quotient polynomial.
    pub cm_h: [C; NUM_QUOTIENT_PIECES],
    /// Opening at \zeta of (folded h, linearization, l, r, o, s1, s2).
    pub batched_proof: BatchOpeningProof<C, F>,
    /// Opening of z(X) at \zeta * \omega.
    pub z_shifted_opening: OpeningProof<C, F>,
}

/// The type of the Plonk proof with a specific polynomial commitment scheme.
pub type PlonkPf<PCS> =
    PlonkProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

impl<G: Group> PlonkProof<KZGCommitment<G>, G::ScalarType> {
    /// Fixed-size encoding: commitments compressed, scalars little-endian, in the order
    /// `l, r, o, z, h1, h2, h3, batched.h, 7 claims, shifted.h, shifted claim`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::size_in_bytes());
        for cm in self.cm_lro.iter() {
            bytes.extend(cm.to_bytes());
        }
        bytes.extend(self.cm_z.to_bytes());
        for cm in self.cm_h.iter() {
            bytes.extend(cm.to_bytes());
        }
        bytes.extend(self.batched_proof.h.to_bytes());
        for claim in self.batched_proof.claimed_values.iter() {
            bytes.extend(claim.to_bytes());
        }
        bytes.extend(self.z_shifted_opening.h.to_bytes());
        bytes.extend(self.z_shifted_opening.claimed_value.to_bytes());
        bytes
    }

    /// Decode a proof written by `to_bytes`. Rejects wrong lengths, points off the curve
    /// and non-canonical scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::size_in_bytes() {
            return Err(PlonkError::DeserializationError);
        }
        let mut reader = ProofReader { bytes, offset: 0 };
        let cm_lro = [reader.point()?, reader.point()?, reader.point()?];
        let cm_z = reader.point()?;
        let cm_h = [reader.point()?, reader.point()?, reader.point()?];
        let batched_h = reader.point()?;
        let claimed_values = (0..NUM_BATCHED_CLAIMS)
            .map(|_| reader.scalar())
            .collect::<Result<Vec<_>>>()?;
        let shifted_h = reader.point()?;
        let shifted_claim = reader.scalar()?;
        Ok(PlonkProof {
            cm_lro,
            cm_z,
            cm_h,
            batched_proof: BatchOpeningProof {
                h: batched_h,
                claimed_values,
            },
            z_shifted_opening: OpeningProof {
                h: shifted_h,
                claimed_value: shifted_claim,
            },
        })
    }

    /// Length of the encoding returned by `to_bytes`.
    pub fn size_in_bytes() -> usize {
        9 * G::COMPRESSED_LEN + (NUM_BATCHED_CLAIMS + 1) * <G::ScalarType as Scalar>::bytes_len()
    }
}

struct ProofReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ProofReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset + len;
        let chunk = self
            .bytes
            .get(self.offset..end)
            .ok_or(PlonkError::DeserializationError)?;
        self.offset = end;
        Ok(chunk)
    }

    fn point<G: Group>(&mut self) -> Result<KZGCommitment<G>> {
        KZGCommitment::from_compressed_bytes(self.take(G::COMPRESSED_LEN)?)
    }

    fn scalar<F: Scalar>(&mut self) -> Result<F> {
        let chunk = self.take(F::bytes_len())?;
        let value = F::from_bytes(chunk).map_err(|_| PlonkError::DeserializationError)?;
        if value.to_bytes() != chunk {
            return Err(PlonkError::DeserializationError);
        }
        Ok(value)
    }
}

/// Plonk prover parameters.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlonkProverParams<O, C, F> {
    /// The polynomials of the selectors, in the order `ql, qr, qm, qo, qk`.
    pub q_polys: Vec<O>,
    /// The polynomials of perm1, perm2, perm3.
    pub s_polys: Vec<O>,
    /// The encoded permutation over the group, `3 * n` values.
    pub s_lagrange: Vec<F>,
    /// The Plonk verifier parameters.
    pub verifier_params: PlonkVerifierParams<C, F>,
    /// The elements of the group.
    pub group: Vec<F>,
    /// The coset on which the quotient polynomial is computed.
    pub coset_quotient: Vec<F>,
    /// The size of `coset_quotient`.
    pub quot_eval_dom_size: usize,
    /// The first Lagrange polynomial evaluated on `coset_quotient`.
    pub l1_coset_evals: Vec<F>,
    /// The inverses of X^n - 1 on `coset_quotient`. They repeat with period m / n,
    /// so only the first m / n values are kept.
    pub z_h_inv_coset_evals: Vec<F>,
    /// The selector polynomials evaluated on `coset_quotient`.
    pub q_coset_evals: Vec<Vec<F>>,
    /// The permutation polynomials evaluated on `coset_quotient`.
    pub s_coset_evals: Vec<Vec<F>>,
}

/// Prover parameters over a particular polynomial commitment scheme.
pub type PlonkPK<PCS> = PlonkProverParams<
    FpPolynomial<<PCS as PolyComScheme>::Field>,
    <PCS as PolyComScheme>::Commitment,
    <PCS as PolyComScheme>::Field,
>;

impl<O, C, F> PlonkProverParams<O, C, F> {
    /// Return the verifier parameters.
    pub fn get_verifier_params(self) -> PlonkVerifierParams<C, F> {
        self.verifier_params
    }

    /// Return a reference of verifier parameters.
    pub fn get_verifier_params_ref(&self) -> &PlonkVerifierParams<C, F> {
        &self.verifier_params
    }
}

/// Plonk verifier parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlonkVerifierParams<C, F> {
    /// The commitments of the selectors, in the order `ql, qr, qm, qo, qk`.
    pub cm_q_vec: Vec<C>,
    /// The commitments of perm1, perm2, perm3.
    pub cm_s_vec: Vec<C>,
    /// The coset shifters `1, k1, k2` of the three wires.
    pub k: Vec<F>,
    /// The generator of the group of size `cs_size`.
    pub root: F,
    /// The size of constraint system.
    pub cs_size: usize,
    /// The number of public inputs.
    pub nb_public: usize,
}

/// Define the PLONK verifier params by given `PolyComScheme`.
pub type PlonkVK<PCS> =
    PlonkVerifierParams<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// Encode the permutation value, from an index to a group element.
pub fn encode_perm_to_group<F: Scalar>(group: &[F], perm: &[usize], k: &[F]) -> Vec<F> {
    let n = group.len();
    perm.iter()
        .map(|pi| {
            for (i, ki) in k.iter().enumerate().skip(1) {
                if *pi < (i + 1) * n && *pi >= i * n {
                    return ki.mul(&group[pi % n]);
                }
            }
            group[pi % n]
        })
        .collect()
}

/// Find `n_wires_per_gate - 1` quadratic non-residues so that the cosets
/// `k_i * H` of the group `H` of size `n` are pairwise disjoint.
pub fn choose_ks<R: CryptoRng + RngCore, F: Scalar>(
    prng: &mut R,
    n_wires_per_gate: usize,
    n: usize,
) -> Vec<F> {
    let mut k = vec![F::one()];
    let exp = [n as u64];

    for _ in 1..n_wires_per_gate {
        loop {
            let ki = F::random(prng);
            if ki.is_zero() || ki.legendre() != LegendreSymbol::QuadraticNonResidue {
                continue;
            }
            // k_i / k_j must not lie in H.
            let disjoint = k.iter().all(|kj| match kj.inv() {
                Ok(kj_inv) => ki.mul(&kj_inv).pow(&exp) != F::one(),
                Err(_) => false,
            });
            if disjoint {
                k.push(ki);
                break;
            }
        }
    }
    k
}

/// Run the Plonk indexer.
/// The constraint system fixes the domain size `n`; the commitment key must support
/// degree `n + 2`.
pub fn indexer<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    pcs: &PCS,
) -> Result<PlonkPK<PCS>> {
    let indexer_timer = start_timer!(|| "SparsePlonk::Indexer");

    // It's okay to choose a fixed seed to generate quadratic non-residue.
    let mut prng = ChaChaRng::from_seed([0u8; 32]);
    let n_wires_per_gate = CS::n_wires_per_gate();
    let n = cs.size();
    cs.check_shape()?;
    if pcs.max_degree() < n + Z_BLINDING_ORDER {
        return Err(PlonkError::DegreeError);
    }
    let factor = quotient_domain_factor(n);
    let m = n * factor;
    debug_assert!(NUM_QUOTIENT_PIECES * quotient_piece_len(n) <= m);

    let domain = EvaluationDomain::<PCS::Field>::new(n)?;
    let domain_m = EvaluationDomain::<PCS::Field>::new(m)?;
    let group = domain.elements();
    let k = choose_ks::<_, PCS::Field>(&mut prng, n_wires_per_gate, n);
    let coset_quotient = domain_m.coset_elements();

    // Step 1: compute permutation polynomials and commit them.
    let perm_timer = start_timer!(|| "Permutation polynomials");
    let raw_perm = cs.compute_permutation()?;
    let mut encoded_perm = Vec::with_capacity(n_wires_per_gate * n);
    for i in 0..n_wires_per_gate {
        encoded_perm.extend(encode_perm_to_group(
            &group,
            &raw_perm[i * n..(i + 1) * n],
            &k,
        ));
    }
    let mut s_coset_evals = vec![];
    let mut s_polys = vec![];
    let mut cm_s_vec = vec![];
    for i in 0..n_wires_per_gate {
        let s_coefs = FpPolynomial::ifft_with_domain(&domain, &encoded_perm[i * n..(i + 1) * n])?;
        s_coset_evals.push(s_coefs.coset_fft_with_domain(&domain_m)?);
        cm_s_vec.push(pcs.commit(&s_coefs)?);
        s_polys.push(s_coefs);
    }
    end_timer!(perm_timer);

    // Step 2: compute selector polynomials and commit them.
    let selectors_timer = start_timer!(|| "Selector polynomials");
    let mut q_coset_evals = vec![];
    let mut q_polys = vec![];
    let mut cm_q_vec = vec![];
    for i in 0..cs.num_selectors() {
        let q_coefs = FpPolynomial::ifft_with_domain(&domain, &cs.selector(i)?)?;
        q_coset_evals.push(q_coefs.coset_fft_with_domain(&domain_m)?);
        cm_q_vec.push(pcs.commit(&q_coefs)?);
        q_polys.push(q_coefs);
    }
    end_timer!(selectors_timer);

    // Step 3: precompute two helper functions, L1 and 1 / Z_H.
    let mut l1_evals = vec![PCS::Field::zero(); n];
    l1_evals[0] = PCS::Field::one();
    let l1_coefs = FpPolynomial::ifft_with_domain(&domain, &l1_evals)?;
    let l1_coset_evals = l1_coefs.coset_fft_with_domain(&domain_m)?;

    // (shift * w_m^i)^n only depends on i mod (m / n).
    let z_h_inv_coset_evals = coset_quotient[..factor]
        .iter()
        .map(|x| {
            domain
                .vanishing_eval(x)
                .inv()
                .map_err(|_| PlonkError::DivisionByZero)
        })
        .collect::<Result<Vec<_>>>()?;

    let verifier_params = PlonkVerifierParams {
        cm_q_vec,
        cm_s_vec,
        k,
        root: domain.generator(),
        cs_size: n,
        nb_public: cs.nb_public(),
    };

    end_timer!(indexer_timer);

    Ok(PlonkProverParams {
        q_polys,
        s_polys,
        s_lagrange: encoded_perm,
        verifier_params,
        group,
        coset_quotient,
        quot_eval_dom_size: m,
        l1_coset_evals,
        z_h_inv_coset_evals,
        q_coset_evals,
        s_coset_evals,
    })
}
