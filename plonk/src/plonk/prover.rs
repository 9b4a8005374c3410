use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{
        fold_t_polys_or_comms, hide_polynomial, pi_poly, quotient_piece_len, r_poly, split_t,
        t_poly, z_poly, PlonkChallenges, WIRE_BLINDING_ORDER, Z_BLINDING_ORDER,
    },
    indexer::{PlonkPK, PlonkPf, PlonkProof},
    transcript::{
        transcript_get_plonk_challenge_alpha, transcript_get_plonk_challenge_gamma,
        transcript_get_plonk_challenge_zeta, transcript_init_plonk,
    },
};
use crate::poly_commit::{
    domain::EvaluationDomain, field_polynomial::FpPolynomial, pcs::PolyComScheme,
    transcript::PolyComTranscript,
};
use ark_std::{end_timer, start_timer};
use legend_algebra::prelude::*;
use merlin::Transcript;

/// PLONK Prover: it produces a proof that `witness` satisfies the constraint system `cs`,
/// Proof verifier must use a transcript with same state as prover and match the public parameters,
/// It returns [PlonkError] if the witness does not fit `cs`, or if the parameters of the polynomial
/// commitment scheme `pcs` do not match the constraint system parameters.
/// # Example
/// ```
/// use legend_plonk::plonk::{
///     constraint_system::SparseR1CS,
///     verifier::verifier,
///     prover::prover,
///     indexer::indexer
/// };
/// use legend_plonk::poly_commit::kzg_poly_com::KZGCommitmentSchemeBN254;
/// use merlin::Transcript;
/// use rand_chacha::ChaChaRng;
/// use legend_algebra::{prelude::*, bn254::BN254Scalar};
///
/// let mut prng = ChaChaRng::from_seed([0u8; 32]);
/// let pcs = KZGCommitmentSchemeBN254::new(20, &mut prng);
/// let mut cs = SparseR1CS::new();
///
/// // circuit (x_0 + x_1 = x_2), x_2 public;
/// let one = BN254Scalar::one();
/// let two = one.add(&one);
/// let three = two.add(&one);
/// let var_three = cs.new_public_variable(three).unwrap();
/// let var_one = cs.new_variable(one);
/// let var_two = cs.new_variable(two);
/// cs.insert_add_gate(var_one, var_two, var_three);
///
/// let witness = cs.get_witness();
/// let prover_params = indexer(&cs, &pcs).unwrap();
///
/// let proof = {
///     let mut transcript = Transcript::new(b"Test");
///     prover(
///         &mut prng,
///         &mut transcript,
///         &pcs,
///         &cs,
///         &prover_params,
///         &witness,
///     )
///         .unwrap()
/// };
///
/// let mut transcript = Transcript::new(b"Test");
/// assert!(
///     verifier(&mut transcript, &pcs, prover_params.get_verifier_params_ref(), &[three], &proof).is_ok()
/// )
/// ```
pub fn prover<
    R: CryptoRng + RngCore,
    PCS: PolyComScheme,
    CS: ConstraintSystem<Field = PCS::Field>,
>(
    prng: &mut R,
    transcript: &mut Transcript,
    pcs: &PCS,
    cs: &CS,
    prover_params: &PlonkPK<PCS>,
    witness: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    let n = cs.size();
    if n != prover_params.verifier_params.cs_size
        || cs.nb_public() != prover_params.verifier_params.nb_public
    {
        return Err(PlonkError::SetupError);
    }
    cs.verify_witness(witness)?;

    let extended_witness = cs.extend_witness(witness);
    prover_with_wires::<_, _, CS>(
        prng,
        transcript,
        pcs,
        prover_params,
        &witness[..cs.nb_public()],
        &extended_witness,
    )
}

/// Run the proving rounds on the wire values, laid out as `[l | r | o]` with `n`
/// values each. No check is made that the wires satisfy the circuit.
pub(crate) fn prover_with_wires<
    R: CryptoRng + RngCore,
    PCS: PolyComScheme,
    CS: ConstraintSystem<Field = PCS::Field>,
>(
    prng: &mut R,
    transcript: &mut Transcript,
    pcs: &PCS,
    prover_params: &PlonkPK<PCS>,
    public_inputs: &[PCS::Field],
    extended_witness: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    let prover_timer = start_timer!(|| "SparsePlonk::Prover");

    let n_constraints = prover_params.verifier_params.cs_size;
    let n_wires_per_gate = CS::n_wires_per_gate();
    if prover_params.verifier_params.k.len() != n_wires_per_gate {
        return Err(PlonkError::SetupError);
    }
    if extended_witness.len() != n_wires_per_gate * n_constraints {
        return Err(PlonkError::WitnessLengthError {
            expected: n_wires_per_gate * n_constraints,
            actual: extended_witness.len(),
        });
    }
    let domain = EvaluationDomain::<PCS::Field>::new(n_constraints)?;
    let root = domain.generator();
    let pi = pi_poly::<PCS>(prover_params, public_inputs, &domain)?;

    // Init transcript
    transcript_init_plonk(transcript, &prover_params.verifier_params, public_inputs);
    let mut challenges = PlonkChallenges::new();

    // 1. build witness polynomials, hide them and commit
    let w_timer = start_timer!(|| "Round 1: witness polynomials");
    let mut w_polys = vec![];
    let mut cm_w_vec = vec![];
    for i in 0..n_wires_per_gate {
        let mut f_coefs = FpPolynomial::ifft_with_domain(
            &domain,
            &extended_witness[i * n_constraints..(i + 1) * n_constraints],
        )?;
        hide_polynomial(prng, &mut f_coefs, WIRE_BLINDING_ORDER, n_constraints);
        let cm_w = pcs.commit(&f_coefs)?;
        transcript.append_commitment::<PCS::Commitment>(&cm_w);
        w_polys.push(f_coefs);
        cm_w_vec.push(cm_w);
    }
    end_timer!(w_timer);

    // 2. get challenge gamma
    let gamma = transcript_get_plonk_challenge_gamma(transcript, n_constraints);
    challenges.insert_gamma(gamma)?;

    // 3. build the z polynomial, hide it and commit
    let z_timer = start_timer!(|| "Round 2: the grand product polynomial");
    let mut z = z_poly::<PCS>(prover_params, extended_witness, &challenges, &domain)?;
    hide_polynomial(prng, &mut z, Z_BLINDING_ORDER, n_constraints);
    let cm_z = pcs.commit(&z)?;
    transcript.append_commitment::<PCS::Commitment>(&cm_z);
    end_timer!(z_timer);

    // 4. get challenge alpha
    let alpha = transcript_get_plonk_challenge_alpha(transcript, n_constraints);
    challenges.insert_alpha(alpha)?;

    // 5. build the quotient polynomial, split it into pieces and commit
    let t_timer = start_timer!(|| "Round 3: the quotient polynomial");
    let t = t_poly::<PCS, CS>(prover_params, &w_polys, &z, &challenges, &pi)?;
    let piece_len = quotient_piece_len(n_constraints);
    let t_polys = split_t(&t, piece_len)?;
    let mut cm_t_vec = vec![];
    for t_poly in t_polys.iter() {
        let cm_t = pcs.commit(t_poly)?;
        transcript.append_commitment::<PCS::Commitment>(&cm_t);
        cm_t_vec.push(cm_t);
    }
    end_timer!(t_timer);

    // 6. get challenge zeta
    let zeta = transcript_get_plonk_challenge_zeta(transcript, n_constraints);
    challenges.insert_zeta(zeta)?;

    // 7. open z at zeta * omega, build and commit the linearization polynomial
    let r_timer = start_timer!(|| "Round 4: the linearization polynomial");
    let zeta_omega = zeta.mul(&root);
    let z_shifted_opening = pcs.open(&z, &zeta_omega)?;

    let w_polys_eval_zeta: Vec<PCS::Field> =
        w_polys.iter().map(|poly| pcs.eval(poly, &zeta)).collect();
    let s_polys_eval_zeta: Vec<PCS::Field> = prover_params
        .s_polys
        .iter()
        .take(n_wires_per_gate - 1)
        .map(|poly| pcs.eval(poly, &zeta))
        .collect();
    let w_refs: Vec<&PCS::Field> = w_polys_eval_zeta.iter().collect();
    let s_refs: Vec<&PCS::Field> = s_polys_eval_zeta.iter().collect();

    let r = r_poly::<PCS, CS>(
        prover_params,
        &z,
        &w_refs,
        &s_refs,
        &z_shifted_opening.claimed_value,
        &challenges,
    )?;
    let cm_r = pcs.commit(&r)?;
    end_timer!(r_timer);

    // 8. batch open at zeta the folded quotient, r, the wires and the first two permutations
    let open_timer = start_timer!(|| "Round 5: the batched opening");
    let zeta_pow = zeta.pow(&[piece_len as u64]);
    let folded_t = fold_t_polys_or_comms(&t_polys, &zeta_pow);
    let folded_cm_t = fold_t_polys_or_comms(&cm_t_vec, &zeta_pow);

    let mut polys: Vec<&FpPolynomial<PCS::Field>> = vec![&folded_t, &r];
    polys.extend(w_polys.iter());
    polys.extend(prover_params.s_polys.iter().take(n_wires_per_gate - 1));
    let mut digests: Vec<&PCS::Commitment> = vec![&folded_cm_t, &cm_r];
    digests.extend(cm_w_vec.iter());
    digests.extend(
        prover_params
            .verifier_params
            .cm_s_vec
            .iter()
            .take(n_wires_per_gate - 1),
    );
    let batched_proof = pcs.batch_open_single_point(transcript, &polys, &digests, &zeta)?;
    end_timer!(open_timer);

    end_timer!(prover_timer);

    let cm_lro = cm_w_vec
        .try_into()
        .map_err(|_| PlonkError::SetupError)?;
    let cm_h = cm_t_vec
        .try_into()
        .map_err(|_| PlonkError::QuotientSplitError)?;
    Ok(PlonkProof {
        cm_lro,
        cm_z,
        cm_h,
        batched_proof,
        z_shifted_opening,
    })
}

#[cfg(test)]
mod test {
    use crate::errors::PlonkError;
    use crate::plonk::{
        constraint_system::{ConstraintSystem, SparseR1CS},
        helpers::{pi_poly, quotient_piece_len, split_t, t_poly, z_poly, PlonkChallenges},
        indexer::{indexer, PlonkPK, PlonkPf, PlonkProof},
        prover::{prover, prover_with_wires},
        verifier::verifier,
    };
    use crate::poly_commit::{
        domain::EvaluationDomain,
        field_polynomial::FpPolynomial,
        kzg_poly_com::{KZGCommitment, KZGCommitmentSchemeBN254},
    };
    use legend_algebra::{
        bn254::{BN254Scalar, BN254G1},
        prelude::*,
    };
    use merlin::Transcript;
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;
    type PCS = KZGCommitmentSchemeBN254;

    /// out = (x + y) * y, with out public.
    fn simple_circuit(x: u32, y: u32) -> SparseR1CS<F> {
        let mut cs = SparseR1CS::new();
        let x = F::from(x);
        let y = F::from(y);
        let out = cs.new_public_variable(x.add(&y).mul(&y)).unwrap();
        let x = cs.new_variable(x);
        let y = cs.new_variable(y);
        let s = cs.add(x, y);
        let p = cs.mul(s, y);
        cs.insert_equality_assertion(p, out);
        cs
    }

    fn prove_with_seed(
        seed: [u8; 32],
        pcs: &PCS,
        cs: &SparseR1CS<F>,
        params: &PlonkPK<PCS>,
    ) -> Result<PlonkPf<PCS>, PlonkError> {
        let mut prng = ChaChaRng::from_seed(seed);
        let mut transcript = Transcript::new(b"TestPlonk");
        prover(
            &mut prng,
            &mut transcript,
            pcs,
            cs,
            params,
            &cs.get_witness(),
        )
    }

    fn check(pcs: &PCS, params: &PlonkPK<PCS>, pi: &[F], proof: &PlonkPf<PCS>) -> bool {
        let mut transcript = Transcript::new(b"TestPlonk");
        verifier(
            &mut transcript,
            pcs,
            params.get_verifier_params_ref(),
            pi,
            proof,
        )
        .is_ok()
    }

    #[test]
    fn test_plonk_proof() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let cs = simple_circuit(2, 3);
        let pcs = PCS::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let proof = prove_with_seed([1u8; 32], &pcs, &cs, &params).unwrap();

        let pi = cs.public_inputs();
        assert_eq!(pi, vec![F::from(15u32)]);
        assert!(check(&pcs, &params, &pi, &proof));

        // Fixed-size byte encoding.
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), 544);
        assert_eq!(
            bytes.len(),
            PlonkProof::<KZGCommitment<BN254G1>, F>::size_in_bytes()
        );
        let decoded = PlonkProof::<KZGCommitment<BN254G1>, F>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, proof);
        assert!(check(&pcs, &params, &pi, &decoded));
        assert_eq!(
            PlonkProof::<KZGCommitment<BN254G1>, F>::from_bytes(&bytes[1..]).err(),
            Some(PlonkError::DeserializationError)
        );

        // A claim equal to the field modulus is not canonical.
        let mut non_canonical = bytes.clone();
        let claim_offset = 8 * 32;
        non_canonical[claim_offset..claim_offset + 32]
            .copy_from_slice(&F::get_field_size_le_bytes());
        assert!(PlonkProof::<KZGCommitment<BN254G1>, F>::from_bytes(&non_canonical).is_err());

        let json = serde_json::to_string(&proof).unwrap();
        let from_json: PlonkPf<PCS> = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, proof);

        let bin = bincode::serialize(&proof).unwrap();
        let from_bin: PlonkPf<PCS> = bincode::deserialize(&bin).unwrap();
        assert!(check(&pcs, &params, &pi, &from_bin));
    }

    #[test]
    fn test_prover_is_deterministic_per_seed() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let cs = simple_circuit(4, 5);
        let pcs = PCS::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let pi = cs.public_inputs();

        let proof_a = prove_with_seed([3u8; 32], &pcs, &cs, &params).unwrap();
        let proof_b = prove_with_seed([3u8; 32], &pcs, &cs, &params).unwrap();
        let proof_c = prove_with_seed([4u8; 32], &pcs, &cs, &params).unwrap();
        assert_eq!(proof_a.to_bytes(), proof_b.to_bytes());
        assert_ne!(proof_a.cm_lro, proof_c.cm_lro);
        assert!(check(&pcs, &params, &pi, &proof_a));
        assert!(check(&pcs, &params, &pi, &proof_c));
    }

    #[test]
    fn test_prover_rejects_bad_witness() {
        let mut prng = ChaChaRng::from_seed([5u8; 32]);
        let cs = simple_circuit(2, 3);
        let pcs = PCS::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();

        // Rows: public input, add, mul, assertion.
        let mut witness = cs.get_witness();
        witness[2] = F::from(4u32);
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover(&mut prng, &mut transcript, &pcs, &cs, &params, &witness).err(),
            Some(PlonkError::ConstraintUnsatisfied(1))
        );

        let witness = cs.get_witness();
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover(
                &mut prng,
                &mut transcript,
                &pcs,
                &cs,
                &params,
                &witness[..witness.len() - 1]
            )
            .err(),
            Some(PlonkError::WitnessLengthError {
                expected: witness.len(),
                actual: witness.len() - 1
            })
        );

        // The key of a circuit with another public layout.
        let mut other = SparseR1CS::new();
        let a = other.new_variable(F::one());
        other.insert_boolean_assertion(a);
        let other_params = indexer(&other, &pcs).unwrap();
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover(
                &mut prng,
                &mut transcript,
                &pcs,
                &cs,
                &other_params,
                &witness
            )
            .err(),
            Some(PlonkError::SetupError)
        );
    }

    #[test]
    fn test_prover_rejects_malformed_circuit() {
        let mut prng = ChaChaRng::from_seed([9u8; 32]);
        let cs = simple_circuit(2, 3);
        let pcs = PCS::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let witness = cs.get_witness();

        // Same shape as the indexed circuit, but a wire past the last variable.
        let mut malformed = cs.clone();
        malformed.constraints[0].wires[2] = cs.num_vars();
        assert_eq!(malformed.size(), cs.size());
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover(&mut prng, &mut transcript, &pcs, &malformed, &params, &witness).err(),
            Some(PlonkError::SetupError)
        );
    }

    #[test]
    fn test_tampered_wires_do_not_split() {
        let mut prng = ChaChaRng::from_seed([6u8; 32]);
        let cs = simple_circuit(2, 3);
        let n = cs.size();
        let pcs = PCS::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let pi = cs.public_inputs();
        let mut wires = cs.extend_witness(&cs.get_witness());

        let mut transcript = Transcript::new(b"TestPlonk");
        let proof = prover_with_wires::<_, _, SparseR1CS<F>>(
            &mut prng,
            &mut transcript,
            &pcs,
            &params,
            &pi,
            &wires,
        )
        .unwrap();
        assert!(check(&pcs, &params, &pi, &proof));

        // Left wire of the add gate.
        wires[1] = wires[1].add(&F::one());
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover_with_wires::<_, _, SparseR1CS<F>>(
                &mut prng,
                &mut transcript,
                &pcs,
                &params,
                &pi,
                &wires,
            )
            .err(),
            Some(PlonkError::QuotientSplitError)
        );
    }

    #[test]
    fn test_broken_copy_constraint() {
        // a + b = c, c * d = e, no public inputs.
        let mut cs = SparseR1CS::new();
        let a = cs.new_variable(F::from(1u32));
        let b = cs.new_variable(F::from(2u32));
        let d = cs.new_variable(F::from(5u32));
        let c = cs.add(a, b);
        let _ = cs.mul(c, d);
        let n = cs.size();
        assert_eq!(n, 4);

        let mut prng = ChaChaRng::from_seed([7u8; 32]);
        let pcs = PCS::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let mut wires = cs.extend_witness(&cs.get_witness());
        assert_eq!(wires[1], F::from(3u32));
        assert_eq!(wires[2 * n + 1], F::from(15u32));

        // 4 * 5 = 20 satisfies the mul gate but the left wire no longer equals c.
        wires[1] = F::from(4u32);
        wires[2 * n + 1] = F::from(20u32);
        let mut transcript = Transcript::new(b"TestPlonk");
        assert_eq!(
            prover_with_wires::<_, _, SparseR1CS<F>>(
                &mut prng,
                &mut transcript,
                &pcs,
                &params,
                &[],
                &wires,
            )
            .err(),
            Some(PlonkError::QuotientSplitError)
        );
    }

    #[test]
    fn test_boundary_constraint() {
        let mut prng = ChaChaRng::from_seed([8u8; 32]);
        let cs = simple_circuit(6, 7);
        let n = cs.size();
        let pcs = PCS::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let domain = EvaluationDomain::<F>::new(n).unwrap();
        let pi = pi_poly::<PCS>(&params, &cs.public_inputs(), &domain).unwrap();

        let wires = cs.extend_witness(&cs.get_witness());
        let w_polys: Vec<FpPolynomial<F>> = (0..3)
            .map(|i| FpPolynomial::ifft_with_domain(&domain, &wires[i * n..(i + 1) * n]).unwrap())
            .collect();
        let mut challenges = PlonkChallenges::<F>::new();
        challenges.insert_gamma(F::random(&mut prng)).unwrap();
        challenges.insert_alpha(F::random(&mut prng)).unwrap();

        let z = z_poly::<PCS>(&params, &wires, &challenges, &domain).unwrap();
        let piece_len = quotient_piece_len(n);
        let t = t_poly::<PCS, SparseR1CS<F>>(&params, &w_polys, &z, &challenges, &pi).unwrap();
        assert!(split_t(&t, piece_len).is_ok());

        // 2 * z still satisfies the product recursion but starts at 2.
        let doubled = z.mul_scalar(&F::from(2u32));
        let t = t_poly::<PCS, SparseR1CS<F>>(&params, &w_polys, &doubled, &challenges, &pi)
            .unwrap();
        assert_eq!(
            split_t(&t, piece_len).err(),
            Some(PlonkError::QuotientSplitError)
        );
    }

    #[test]
    fn test_larger_circuit() {
        // Fibonacci: f_{i+2} = f_{i+1} + f_i, with f_0 and the last value public.
        let steps = 100;
        let mut values = vec![F::one(), F::one()];
        for i in 0..steps {
            let next = values[i].add(&values[i + 1]);
            values.push(next);
        }

        let mut cs = SparseR1CS::new();
        let first = cs.new_public_variable(values[0]).unwrap();
        let last = cs.new_public_variable(values[steps + 1]).unwrap();
        let mut prev = first;
        let mut cur = cs.new_variable(values[1]);
        cs.insert_constant_gate(cur, F::one());
        for _ in 0..steps {
            let next = cs.add(prev, cur);
            prev = cur;
            cur = next;
        }
        cs.insert_equality_assertion(cur, last);
        assert_eq!(cs.size(), 128);

        let mut prng = ChaChaRng::from_seed([9u8; 32]);
        let pcs = PCS::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let proof = prove_with_seed([10u8; 32], &pcs, &cs, &params).unwrap();
        let pi = cs.public_inputs();
        assert!(check(&pcs, &params, &pi, &proof));
        assert!(!check(&pcs, &params, &[pi[0], pi[0]], &proof));
    }
}
