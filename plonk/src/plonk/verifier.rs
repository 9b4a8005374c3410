use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{
        sparse_r1cs::{N_SELECTORS, N_WIRES_PER_GATE},
        SparseR1CS,
    },
    helpers::{
        eval_pi_poly, fold_t_polys_or_comms, quotient_piece_len, r_commitment, r_eval_zeta,
        PlonkChallenges,
    },
    indexer::{PlonkPf, PlonkVK, NUM_BATCHED_CLAIMS},
    transcript::{
        transcript_get_plonk_challenge_alpha, transcript_get_plonk_challenge_gamma,
        transcript_get_plonk_challenge_u, transcript_get_plonk_challenge_zeta,
        transcript_init_plonk,
    },
};
use crate::poly_commit::{pcs::PolyComScheme, transcript::PolyComTranscript};
use legend_algebra::prelude::*;
use merlin::Transcript;

/// Verify a proof.
/// Any mismatch between the proof, the verifier parameters and the public inputs
/// is reported as [PlonkError::VerificationError].
pub fn verifier<PCS: PolyComScheme>(
    transcript: &mut Transcript,
    pcs: &PCS,
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    verify_proof(transcript, pcs, verifier_params, pi, proof)
        .map_err(|_| PlonkError::VerificationError)
}

fn verify_proof<PCS: PolyComScheme>(
    transcript: &mut Transcript,
    pcs: &PCS,
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    let n = verifier_params.cs_size;
    if pi.len() != verifier_params.nb_public
        || verifier_params.cm_q_vec.len() != N_SELECTORS
        || verifier_params.cm_s_vec.len() != N_WIRES_PER_GATE
        || verifier_params.k.len() != N_WIRES_PER_GATE
        || proof.batched_proof.claimed_values.len() != NUM_BATCHED_CLAIMS
        || log2_exact(n).is_none()
    {
        return Err(PlonkError::VerificationError);
    }

    transcript_init_plonk(transcript, verifier_params, pi);
    let mut challenges = PlonkChallenges::new();
    // 1. compute the challenges gamma, alpha and zeta.
    compute_challenges::<PCS>(&mut challenges, transcript, proof, n)?;
    let zeta = *challenges.get_zeta()?;

    // 2. read the claims: folded quotient, r, l, r, o, s1, s2.
    let claims = &proof.batched_proof.claimed_values;
    let h_eval_zeta = &claims[0];
    let r_eval_claim = &claims[1];
    let w_polys_eval_zeta: Vec<&PCS::Field> = claims[2..5].iter().collect();
    let s_polys_eval_zeta: Vec<&PCS::Field> = claims[5..7].iter().collect();
    let z_eval_zeta_omega = &proof.z_shifted_opening.claimed_value;

    // 3. compute PI(\zeta) and check the quotient identity at \zeta.
    let pi_eval_zeta = eval_pi_poly::<PCS>(verifier_params, pi, &zeta)?;
    let r_eval_expected = r_eval_zeta::<PCS>(
        verifier_params,
        &w_polys_eval_zeta,
        &s_polys_eval_zeta,
        z_eval_zeta_omega,
        h_eval_zeta,
        &challenges,
        &pi_eval_zeta,
    )?;
    if r_eval_expected != *r_eval_claim {
        return Err(PlonkError::VerificationError);
    }

    // 4. derive the linearization polynomial commitment and the folded quotient commitment.
    let cm_r = r_commitment::<PCS, SparseR1CS<PCS::Field>>(
        verifier_params,
        &proof.cm_z,
        &w_polys_eval_zeta,
        &s_polys_eval_zeta,
        z_eval_zeta_omega,
        &challenges,
    )?;
    let zeta_pow = zeta.pow(&[quotient_piece_len(n) as u64]);
    let folded_cm_t = fold_t_polys_or_comms(&proof.cm_h, &zeta_pow);

    // 5. fold the batched opening at \zeta.
    let mut digests: Vec<&PCS::Commitment> = vec![&folded_cm_t, &cm_r];
    digests.extend(proof.cm_lro.iter());
    digests.extend(verifier_params.cm_s_vec.iter().take(N_WIRES_PER_GATE - 1));
    let (folded_digest, folded_opening) =
        pcs.fold_batch_opening(transcript, &proof.batched_proof, &digests, &zeta)?;

    // 6. check both openings at once.
    transcript.append_commitment::<PCS::Commitment>(&proof.batched_proof.h);
    transcript.append_field_elem(z_eval_zeta_omega);
    transcript.append_commitment::<PCS::Commitment>(&proof.z_shifted_opening.h);
    let u = transcript_get_plonk_challenge_u(transcript, n);
    challenges.insert_u(u)?;

    let root = verifier_params.root;
    pcs.batch_verify_diff_points(
        &[folded_digest, proof.cm_z.clone()],
        &[zeta, zeta.mul(&root)],
        &[folded_opening.claimed_value, *z_eval_zeta_omega],
        &[folded_opening.h, proof.z_shifted_opening.h.clone()],
        challenges.get_u()?,
    )
}

fn compute_challenges<PCS: PolyComScheme>(
    challenges: &mut PlonkChallenges<PCS::Field>,
    transcript: &mut Transcript,
    proof: &PlonkPf<PCS>,
    group_order: usize,
) -> Result<()> {
    // 1. compute gamma challenge.
    for cm_w in proof.cm_lro.iter() {
        transcript.append_commitment::<PCS::Commitment>(cm_w);
    }
    let gamma = transcript_get_plonk_challenge_gamma(transcript, group_order);
    challenges.insert_gamma(gamma)?;

    // 2. compute alpha challenge.
    transcript.append_commitment::<PCS::Commitment>(&proof.cm_z);
    let alpha = transcript_get_plonk_challenge_alpha(transcript, group_order);
    challenges.insert_alpha(alpha)?;

    // 3. compute zeta challenge.
    for cm_t in proof.cm_h.iter() {
        transcript.append_commitment::<PCS::Commitment>(cm_t);
    }
    let zeta = transcript_get_plonk_challenge_zeta(transcript, group_order);
    challenges.insert_zeta(zeta)
}
