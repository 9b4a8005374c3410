use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    indexer::{PlonkPK, PlonkVK},
};
use crate::poly_commit::{
    domain::EvaluationDomain,
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, PolyComScheme},
};
use legend_algebra::prelude::*;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Degree of the blinding polynomial added to each wire polynomial.
pub(crate) const WIRE_BLINDING_ORDER: usize = 1;

/// Degree of the blinding polynomial added to the grand product polynomial.
pub(crate) const Z_BLINDING_ORDER: usize = 2;

/// Number of pieces the quotient polynomial is committed in.
pub const NUM_QUOTIENT_PIECES: usize = 3;

/// Number of coefficients of each quotient piece. The quotient has degree `3n + 5`.
pub(crate) fn quotient_piece_len(n: usize) -> usize {
    n + Z_BLINDING_ORDER
}

/// Ratio between the quotient evaluation coset and the group. The coset must have more
/// points than the quotient has coefficients.
pub(crate) fn quotient_domain_factor(n: usize) -> usize {
    let mut factor = 4;
    while factor * n < NUM_QUOTIENT_PIECES * quotient_piece_len(n) {
        factor *= 2;
    }
    factor
}

/// The data structure for challenges in Plonk.
#[derive(Default)]
pub(super) struct PlonkChallenges<F> {
    challenges: Vec<F>,
}

impl<F: Scalar> PlonkChallenges<F> {
    /// Create a challenges with capacity 4.
    pub(super) fn new() -> PlonkChallenges<F> {
        PlonkChallenges {
            challenges: Vec::with_capacity(4),
        }
    }

    fn insert_at(&mut self, position: usize, challenge: F) -> Result<()> {
        if self.challenges.len() == position {
            self.challenges.push(challenge);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    fn get_at(&self, position: usize) -> Result<&F> {
        self.challenges
            .get(position)
            .ok_or(PlonkError::ChallengeError)
    }

    /// Insert gamma.
    pub(super) fn insert_gamma(&mut self, gamma: F) -> Result<()> {
        self.insert_at(0, gamma)
    }

    /// Insert alpha.
    pub(super) fn insert_alpha(&mut self, alpha: F) -> Result<()> {
        self.insert_at(1, alpha)
    }

    /// Insert zeta.
    pub(super) fn insert_zeta(&mut self, zeta: F) -> Result<()> {
        self.insert_at(2, zeta)
    }

    /// Insert u.
    pub(super) fn insert_u(&mut self, u: F) -> Result<()> {
        self.insert_at(3, u)
    }

    /// Return gamma.
    pub(super) fn get_gamma(&self) -> Result<&F> {
        self.get_at(0)
    }

    /// Return alpha.
    pub(super) fn get_alpha(&self) -> Result<&F> {
        self.get_at(1)
    }

    /// Return zeta.
    pub(super) fn get_zeta(&self) -> Result<&F> {
        self.get_at(2)
    }

    /// Return u.
    pub(super) fn get_u(&self) -> Result<&F> {
        self.get_at(3)
    }
}

/// Return the PI polynomial, which takes the public values on the first rows.
pub(super) fn pi_poly<PCS: PolyComScheme>(
    prover_params: &PlonkPK<PCS>,
    pi: &[PCS::Field],
    domain: &EvaluationDomain<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let n = prover_params.verifier_params.cs_size;
    if pi.len() != prover_params.verifier_params.nb_public {
        return Err(PlonkError::PublicInputsError);
    }
    let mut evals = pi.to_vec();
    evals.resize(n, PCS::Field::zero());
    FpPolynomial::ifft_with_domain(domain, &evals)
}

/// Add a random degree `num_hide_points` polynomial multiplied by
/// `X^{zeroing_degree} - 1`. The values of `polynomial` on the group of
/// order `zeroing_degree` are unchanged. Eg, when num_hide_points is 1, then it adds
/// (r1 + r2*X) * (1 - X^zeroing_degree) to `polynomial`.
pub(super) fn hide_polynomial<R: CryptoRng + RngCore, F: Scalar>(
    prng: &mut R,
    polynomial: &mut FpPolynomial<F>,
    num_hide_points: usize,
    zeroing_degree: usize,
) {
    for i in 0..num_hide_points + 1 {
        let blind = F::random(prng);
        polynomial.add_coef_assign(&blind, i);
        polynomial.add_coef_assign(&blind.neg(), zeroing_degree + i);
    }
}

/// Build the z polynomial, by interpolating
/// z(\omega^{i+1}) = z(\omega^i)\prod_{j=1}^{3}(fj(\omega^i)
/// + k_j * \omega^i +\gamma)/(fj(\omega^i) + perm_j(\omega^i) +\gamma)
/// and setting z(1) = 1 for the base case.
/// `w` holds the unblinded wire values, wire by wire.
pub(super) fn z_poly<PCS: PolyComScheme>(
    prover_params: &PlonkPK<PCS>,
    w: &[PCS::Field],
    challenges: &PlonkChallenges<PCS::Field>,
    domain: &EvaluationDomain<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let n = prover_params.verifier_params.cs_size;
    let n_wires_per_gate = prover_params.verifier_params.k.len();
    if w.len() != n_wires_per_gate * n {
        return Err(PlonkError::WitnessLengthError {
            expected: n_wires_per_gate * n,
            actual: w.len(),
        });
    }
    let gamma = challenges.get_gamma()?;
    let k = &prover_params.verifier_params.k;
    let group = &prover_params.group[..];
    let perm = &prover_params.s_lagrange[..];

    let mut z_evals = Vec::with_capacity(n);
    let mut prev = PCS::Field::one();
    z_evals.push(prev);
    for i in 0..n - 1 {
        // 1. numerator = prod_{j=1..3}(fj(\omega^i) + k_j * \omega^i + \gamma)
        // 2. denominator = prod_{j=1..3}(fj(\omega^i) + permj(\omega^i) +\gamma)
        let mut numerator = PCS::Field::one();
        let mut denominator = PCS::Field::one();
        for j in 0..n_wires_per_gate {
            let f_plus_gamma = w[j * n + i].add(gamma);
            numerator.mul_assign(&f_plus_gamma.add(&k[j].mul(&group[i])));
            denominator.mul_assign(&f_plus_gamma.add(&perm[j * n + i]));
        }

        // save z(\omega^{i+1}) = z(\omega^i) * a / b
        let denominator_inv = denominator
            .inv()
            .map_err(|_| PlonkError::DivisionByZero)?;
        prev.mul_assign(&numerator.mul(&denominator_inv));
        z_evals.push(prev);
    }

    FpPolynomial::ifft_with_domain(domain, &z_evals)
}

/// Compute the t polynomial, i.e.
/// ```text
///   (gate(X) + alpha * (z(wX) g1 g2 g3 - z(X) f1 f2 f3) + alpha^2 * L1(X) (z(X) - 1)) / (X^n - 1)
/// ```
/// with `gj = wj(X) + sj(X) + gamma` and `fj = wj(X) + kj X + gamma`.
pub(super) fn t_poly<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    prover_params: &PlonkPK<PCS>,
    w_polys: &[FpPolynomial<PCS::Field>],
    z: &FpPolynomial<PCS::Field>,
    challenges: &PlonkChallenges<PCS::Field>,
    pi: &FpPolynomial<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let n = prover_params.verifier_params.cs_size;
    let m = prover_params.quot_eval_dom_size;
    let factor = m / n;
    if n * factor != m {
        return Err(PlonkError::SetupError);
    }
    let domain_m = EvaluationDomain::new(m)?;
    let k = &prover_params.verifier_params.k;

    // Compute the evaluations of w/pi/z polynomials on the coset.
    let w_polys_coset_evals: Vec<Vec<PCS::Field>> = w_polys
        .iter()
        .map(|poly| poly.coset_fft_with_domain(&domain_m))
        .collect::<Result<_>>()?;
    let pi_coset_evals = pi.coset_fft_with_domain(&domain_m)?;
    let z_coset_evals = z.coset_fft_with_domain(&domain_m)?;

    let gamma = challenges.get_gamma()?;
    let alpha = challenges.get_alpha()?;
    let alpha_sq = alpha.mul(alpha);
    let one = PCS::Field::one();
    let q_coset_evals = &prover_params.q_coset_evals;
    let s_coset_evals = &prover_params.s_coset_evals;
    let l1_coset_evals = &prover_params.l1_coset_evals;
    let z_h_inv_coset_evals = &prover_params.z_h_inv_coset_evals;
    let coset_quotient = &prover_params.coset_quotient;

    let eval_point = |point: usize| -> Result<PCS::Field> {
        let w_vals: Vec<&PCS::Field> = w_polys_coset_evals
            .iter()
            .map(|poly_coset_evals| &poly_coset_evals[point])
            .collect();
        let q_vals: Vec<&PCS::Field> = q_coset_evals
            .iter()
            .map(|poly_coset_evals| &poly_coset_evals[point])
            .collect();
        // q * w + PI
        let term1 = CS::eval_gate_func(&w_vals, &q_vals, &pi_coset_evals[point])?;

        // z(X)\prod_j (fj(X) + kj * X + gamma)
        let x = &coset_quotient[point];
        let mut term2 = z_coset_evals[point];
        for (w_val, kj) in w_vals.iter().zip(k.iter()) {
            term2.mul_assign(&w_val.add(gamma).add(&kj.mul(x)));
        }

        // z(\omega * X)\prod_j (fj(X) + perm_j(X) + gamma)
        let mut term3 = z_coset_evals[(point + factor) % m];
        for (w_val, s_evals) in w_vals.iter().zip(s_coset_evals.iter()) {
            term3.mul_assign(&w_val.add(gamma).add(&s_evals[point]));
        }

        // alpha^2 * (z(X) - 1) * L_1(X)
        let term4 = alpha_sq
            .mul(&l1_coset_evals[point])
            .mul(&z_coset_evals[point].sub(&one));

        let numerator = term1.add(&alpha.mul(&term3.sub(&term2))).add(&term4);
        Ok(numerator.mul(&z_h_inv_coset_evals[point % factor]))
    };

    #[cfg(feature = "parallel")]
    let t_coset_evals = (0..m)
        .into_par_iter()
        .map(eval_point)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let t_coset_evals = (0..m).map(eval_point).collect::<Result<Vec<_>>>()?;

    FpPolynomial::coset_ifft_with_domain(&domain_m, &t_coset_evals)
}

/// Split the t polynomial into three pieces of `piece_len` coefficients,
/// `t = t1 + X^{piece_len} t2 + X^{2 piece_len} t3`.
pub(super) fn split_t<F: Scalar>(
    t: &FpPolynomial<F>,
    piece_len: usize,
) -> Result<Vec<FpPolynomial<F>>> {
    let coefs = t.get_coefs_ref();
    if coefs.len() > NUM_QUOTIENT_PIECES * piece_len {
        return Err(PlonkError::QuotientSplitError);
    }
    Ok((0..NUM_QUOTIENT_PIECES)
        .map(|i| {
            let start = (i * piece_len).min(coefs.len());
            let end = ((i + 1) * piece_len).min(coefs.len());
            FpPolynomial::from_coefs(coefs[start..end].to_vec())
        })
        .collect())
}

/// Recombine the pieces of t, as polynomials or commitments, with
/// `zeta_pow = \zeta^{piece_len}`: `t1 + zeta_pow * t2 + zeta_pow^2 * t3`.
pub(super) fn fold_t_polys_or_comms<F: Scalar, PCSType: HomomorphicPolyComElem<Scalar = F>>(
    t_polys_or_comms: &[PCSType],
    zeta_pow: &F,
) -> PCSType {
    let mut iter = t_polys_or_comms.iter().rev();
    let mut folded = iter.next().cloned().unwrap_or_else(PCSType::get_identity);
    for t in iter {
        folded.mul_assign(zeta_pow);
        folded.add_assign(t);
    }
    folded
}

/// Return L_1(\zeta) = (\zeta^n - 1) / (n (\zeta - 1)).
pub(super) fn first_lagrange_eval<F: Scalar>(zeta: &F, n: usize) -> Result<F> {
    let z_h_eval = zeta.pow(&[n as u64]).sub(&F::one());
    let denominator = F::from(n as u64).mul(&zeta.sub(&F::one()));
    let denominator_inv = denominator
        .inv()
        .map_err(|_| PlonkError::DivisionByZero)?;
    Ok(z_h_eval.mul(&denominator_inv))
}

/// Compute r polynomial or commitment, that is
/// ```text
///   ql(X) a + qr(X) b + qm(X) ab + qo(X) c + qk(X)
///   + alpha z(\zeta\omega) (a + s1 + gamma)(b + s2 + gamma) s3(X)
///   - alpha (a + \zeta + gamma)(b + k1 \zeta + gamma)(c + k2 \zeta + gamma) z(X)
///   + alpha^2 L1(\zeta) z(X)
/// ```
/// where `a, b, c, s1, s2` are the evaluations at \zeta.
fn r_poly_or_comm<F: Scalar, PCSType: HomomorphicPolyComElem<Scalar = F>>(
    w: &[F],
    n: usize,
    q_polys_or_comms: &[PCSType],
    k: &[F],
    last_s_poly_or_comm: &PCSType,
    z_poly_or_comm: &PCSType,
    w_polys_eval_zeta: &[&F],
    s_polys_eval_zeta: &[&F],
    z_eval_zeta_omega: &F,
    challenges: &PlonkChallenges<F>,
) -> Result<PCSType> {
    let gamma = challenges.get_gamma()?;
    let alpha = challenges.get_alpha()?;
    let zeta = challenges.get_zeta()?;

    // 1. sum_{i=1..n_selectors} wi * qi(X)
    let mut l = PCSType::get_identity();
    for (q, wi) in q_polys_or_comms.iter().zip(w.iter()) {
        l.add_assign(&q.mul(wi));
    }

    // 2. perm_3(X) [alpha * z(zeta * omega) * prod_{j=1..2}(fj(zeta) + perm_j(zeta) + gamma)]
    let mut s_last_poly_scalar = alpha.mul(z_eval_zeta_omega);
    for (w_eval, s_eval) in w_polys_eval_zeta.iter().zip(s_polys_eval_zeta.iter()) {
        s_last_poly_scalar.mul_assign(&w_eval.add(*s_eval).add(gamma));
    }
    l.add_assign(&last_s_poly_or_comm.mul(&s_last_poly_scalar));

    // 3. z(X) [alpha^2 * L1(zeta) - alpha * prod_{j=1..3}(fj(zeta) + kj * zeta + gamma)]
    let mut z_scalar = *alpha;
    for (w_eval, kj) in w_polys_eval_zeta.iter().zip(k.iter()) {
        z_scalar.mul_assign(&w_eval.add(&kj.mul(zeta)).add(gamma));
    }
    let l1_term = alpha.mul(alpha).mul(&first_lagrange_eval(zeta, n)?);
    l.add_assign(&z_poly_or_comm.mul(&l1_term.sub(&z_scalar)));
    Ok(l)
}

/// Compute the r polynomial.
pub(super) fn r_poly<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    prover_params: &PlonkPK<PCS>,
    z: &FpPolynomial<PCS::Field>,
    w_polys_eval_zeta: &[&PCS::Field],
    s_polys_eval_zeta: &[&PCS::Field],
    z_eval_zeta_omega: &PCS::Field,
    challenges: &PlonkChallenges<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let w = CS::eval_selector_multipliers(w_polys_eval_zeta)?;
    r_poly_or_comm::<PCS::Field, FpPolynomial<PCS::Field>>(
        &w,
        prover_params.verifier_params.cs_size,
        &prover_params.q_polys,
        &prover_params.verifier_params.k,
        &prover_params.s_polys[CS::n_wires_per_gate() - 1],
        z,
        w_polys_eval_zeta,
        s_polys_eval_zeta,
        z_eval_zeta_omega,
        challenges,
    )
}

/// Commit the r commitment.
pub(super) fn r_commitment<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    verifier_params: &PlonkVK<PCS>,
    cm_z: &PCS::Commitment,
    w_polys_eval_zeta: &[&PCS::Field],
    s_polys_eval_zeta: &[&PCS::Field],
    z_eval_zeta_omega: &PCS::Field,
    challenges: &PlonkChallenges<PCS::Field>,
) -> Result<PCS::Commitment> {
    let w = CS::eval_selector_multipliers(w_polys_eval_zeta)?;
    let last_cm_s = verifier_params
        .cm_s_vec
        .get(CS::n_wires_per_gate() - 1)
        .ok_or(PlonkError::VerificationError)?;
    r_poly_or_comm::<PCS::Field, PCS::Commitment>(
        &w,
        verifier_params.cs_size,
        &verifier_params.cm_q_vec,
        &verifier_params.k,
        last_cm_s,
        cm_z,
        w_polys_eval_zeta,
        s_polys_eval_zeta,
        z_eval_zeta_omega,
        challenges,
    )
}

/// Compute sum_{i} w_i L_i(X) over the public values, where
/// L_i(X) = (\omega^i / n) (X^n-1) / (X - \omega^i) is the i-th lagrange base
/// (zero for every X = \omega^j, except when i == j).
pub(super) fn eval_pi_poly<PCS: PolyComScheme>(
    verifier_params: &PlonkVK<PCS>,
    public_inputs: &[PCS::Field],
    eval_point: &PCS::Field,
) -> Result<PCS::Field> {
    let n = verifier_params.cs_size;
    let n_inv = PCS::Field::from(n as u64)
        .inv()
        .map_err(|_| PlonkError::DivisionByZero)?;
    // compute X ^ n - 1
    let num = eval_point.pow(&[n as u64]).sub(&PCS::Field::one());

    let mut eval = PCS::Field::zero();
    let mut root_to_i = PCS::Field::one();
    for public_value in public_inputs.iter() {
        // X - \omega^i i-th Lagrange denominator
        let denominator = eval_point.sub(&root_to_i);
        let denominator_inv = denominator
            .inv()
            .map_err(|_| PlonkError::DivisionByZero)?;
        let lagrange_i = root_to_i.mul(&n_inv).mul(&denominator_inv);
        eval.add_assign(&lagrange_i.mul(public_value));
        root_to_i.mul_assign(&verifier_params.root);
    }
    Ok(eval.mul(&num))
}

/// Return the value r(\zeta) must take for the proof to be valid:
/// ```text
///   h(\zeta)(\zeta^n - 1) - PI(\zeta)
///   - alpha z(\zeta\omega)(a + s1 + gamma)(b + s2 + gamma)(c + gamma)
///   + alpha^2 L1(\zeta)
/// ```
pub(super) fn r_eval_zeta<PCS: PolyComScheme>(
    verifier_params: &PlonkVK<PCS>,
    w_polys_eval_zeta: &[&PCS::Field],
    s_polys_eval_zeta: &[&PCS::Field],
    z_eval_zeta_omega: &PCS::Field,
    h_eval_zeta: &PCS::Field,
    challenges: &PlonkChallenges<PCS::Field>,
    pi_eval_zeta: &PCS::Field,
) -> Result<PCS::Field> {
    let zeta = challenges.get_zeta()?;
    let alpha = challenges.get_alpha()?;
    let gamma = challenges.get_gamma()?;
    let n = verifier_params.cs_size;

    let (last_w_eval, w_evals) = w_polys_eval_zeta
        .split_last()
        .ok_or(PlonkError::VerificationError)?;
    let mut term1 = alpha.mul(z_eval_zeta_omega);
    for (w_eval, s_eval) in w_evals.iter().zip(s_polys_eval_zeta.iter()) {
        term1.mul_assign(&w_eval.add(*s_eval).add(gamma));
    }
    term1.mul_assign(&last_w_eval.add(gamma));

    let term2 = alpha.mul(alpha).mul(&first_lagrange_eval(zeta, n)?);

    let z_h_eval_zeta = zeta.pow(&[n as u64]).sub(&PCS::Field::one());
    let term0 = h_eval_zeta.mul(&z_h_eval_zeta);

    Ok(term0.sub(pi_eval_zeta).sub(&term1).add(&term2))
}

#[cfg(test)]
mod test {
    use crate::errors::PlonkError;
    use crate::plonk::{
        constraint_system::{ConstraintSystem, SparseR1CS},
        helpers::{
            eval_pi_poly, first_lagrange_eval, fold_t_polys_or_comms, hide_polynomial, pi_poly,
            quotient_domain_factor, quotient_piece_len, r_commitment, r_poly, split_t, z_poly,
            PlonkChallenges,
        },
        indexer::indexer,
    };
    use crate::poly_commit::{
        domain::EvaluationDomain,
        field_polynomial::FpPolynomial,
        kzg_poly_com::KZGCommitmentSchemeBN254,
        pcs::PolyComScheme,
    };
    use legend_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    type F = BN254Scalar;

    /// Four add gates chained through shared variables, two public inputs.
    fn add_chain() -> SparseR1CS<F> {
        let mut cs = SparseR1CS::new();
        let one = F::one();
        let two = one.add(&one);
        let a = cs.new_public_variable(one).unwrap();
        let b = cs.new_public_variable(two).unwrap();
        let c = cs.add(a, b);
        let d = cs.add(c, b);
        let e = cs.add(d, a);
        cs.insert_mul_gate(a, e, e);
        cs
    }

    #[test]
    fn test_quotient_sizes() {
        assert_eq!(quotient_domain_factor(4), 8);
        for log_n in 3..12 {
            let n = 1 << log_n;
            assert_eq!(quotient_domain_factor(n), 4);
            assert!(3 * quotient_piece_len(n) <= 4 * n);
        }
    }

    #[test]
    fn test_z_polynomial() {
        let cs = add_chain();
        let witness = cs.get_witness();
        let n = cs.size();
        assert_eq!(n, 8);

        let mut prng = ChaChaRng::from_seed([0_u8; 32]);
        let pcs = KZGCommitmentSchemeBN254::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let domain = EvaluationDomain::new(n).unwrap();

        let mut challenges = PlonkChallenges::<F>::new();
        challenges.insert_gamma(F::from(5u32)).unwrap();
        let w = cs.extend_witness(&witness);
        let z = z_poly::<KZGCommitmentSchemeBN254>(&params, &w, &challenges, &domain).unwrap();

        // z starts at one and the grand product closes on the last row.
        let group = &params.group;
        assert_eq!(z.eval(&group[0]), F::one());
        let gamma = F::from(5u32);
        let k = &params.verifier_params.k;
        let last = n - 1;
        let mut acc = z.eval(&group[last]);
        for j in 0..3 {
            let f_plus_gamma = w[j * n + last].add(&gamma);
            acc.mul_assign(&f_plus_gamma.add(&k[j].mul(&group[last])));
            acc.mul_assign(
                &f_plus_gamma
                    .add(&params.s_lagrange[j * n + last])
                    .inv()
                    .unwrap(),
            );
        }
        assert_eq!(acc, F::one());

        // A broken copy constraint does not close.
        let mut bad_w = w.clone();
        bad_w[n + 2] = bad_w[n + 2].add(&F::one());
        let z = z_poly::<KZGCommitmentSchemeBN254>(&params, &bad_w, &challenges, &domain).unwrap();
        let mut acc = z.eval(&group[last]);
        for j in 0..3 {
            let f_plus_gamma = bad_w[j * n + last].add(&gamma);
            acc.mul_assign(&f_plus_gamma.add(&k[j].mul(&group[last])));
            acc.mul_assign(
                &f_plus_gamma
                    .add(&params.s_lagrange[j * n + last])
                    .inv()
                    .unwrap(),
            );
        }
        assert_ne!(acc, F::one());

        // gamma cancelling a wire value makes a denominator vanish.
        let mut challenges = PlonkChallenges::<F>::new();
        challenges
            .insert_gamma(w[0].add(&params.s_lagrange[0]).neg())
            .unwrap();
        assert_eq!(
            z_poly::<KZGCommitmentSchemeBN254>(&params, &w, &challenges, &domain).err(),
            Some(PlonkError::DivisionByZero)
        );
    }

    #[test]
    fn test_hide_polynomial() {
        let mut prng = ChaChaRng::from_seed([1_u8; 32]);
        let n = 8;
        let domain = EvaluationDomain::<F>::new(n).unwrap();
        let poly = FpPolynomial::<F>::random(&mut prng, n - 1);
        let mut hidden = poly.clone();
        hide_polynomial(&mut prng, &mut hidden, 2, n);
        assert_eq!(hidden.degree(), n + 2);
        for x in domain.elements() {
            assert_eq!(hidden.eval(&x), poly.eval(&x));
        }
    }

    #[test]
    fn test_public_input_polynomial() {
        let cs = add_chain();
        let n = cs.size();
        let mut prng = ChaChaRng::from_seed([2_u8; 32]);
        let pcs = KZGCommitmentSchemeBN254::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let domain = EvaluationDomain::new(n).unwrap();

        let public_inputs = cs.public_inputs();
        let pi = pi_poly::<KZGCommitmentSchemeBN254>(&params, &public_inputs, &domain).unwrap();
        assert_eq!(pi.eval(&params.group[1]), public_inputs[1]);
        assert_eq!(pi.eval(&params.group[2]), F::zero());

        let zeta = F::random(&mut prng);
        let vk = params.get_verifier_params_ref();
        assert_eq!(
            eval_pi_poly::<KZGCommitmentSchemeBN254>(vk, &public_inputs, &zeta).unwrap(),
            pi.eval(&zeta)
        );
        assert!(pi_poly::<KZGCommitmentSchemeBN254>(&params, &[], &domain).is_err());

        let mut l1 = vec![F::zero(); n];
        l1[0] = F::one();
        let l1 = FpPolynomial::ifft_with_domain(&domain, &l1).unwrap();
        assert_eq!(first_lagrange_eval(&zeta, n).unwrap(), l1.eval(&zeta));
        assert!(first_lagrange_eval(&F::one(), n).is_err());
    }

    #[test]
    fn test_split_and_fold() {
        let mut prng = ChaChaRng::from_seed([3_u8; 32]);
        let n = 8;
        let piece_len = quotient_piece_len(n);
        let t = FpPolynomial::<F>::random(&mut prng, 3 * piece_len - 1);
        let pieces = split_t(&t, piece_len).unwrap();
        assert_eq!(pieces.len(), 3);
        assert!(pieces.iter().all(|p| p.degree() < piece_len));

        let zeta = F::random(&mut prng);
        let zeta_pow = zeta.pow(&[piece_len as u64]);
        let folded = fold_t_polys_or_comms(&pieces, &zeta_pow);
        assert_eq!(folded.eval(&zeta), t.eval(&zeta));

        // Commitments fold the same way.
        let pcs = KZGCommitmentSchemeBN254::new(piece_len, &mut prng);
        let cms: Vec<_> = pieces.iter().map(|p| pcs.commit(p).unwrap()).collect();
        assert_eq!(
            fold_t_polys_or_comms(&cms, &zeta_pow),
            pcs.commit(&folded).unwrap()
        );

        // A short quotient still gives three pieces.
        let short = FpPolynomial::<F>::random(&mut prng, 3);
        let pieces = split_t(&short, piece_len).unwrap();
        assert!(pieces[1].is_zero() && pieces[2].is_zero());

        let long = FpPolynomial::<F>::random(&mut prng, 3 * piece_len);
        assert_eq!(
            split_t(&long, piece_len).err(),
            Some(PlonkError::QuotientSplitError)
        );
    }

    #[test]
    fn test_r_poly_matches_commitment() {
        let cs = add_chain();
        let n = cs.size();
        let mut prng = ChaChaRng::from_seed([4_u8; 32]);
        let pcs = KZGCommitmentSchemeBN254::new(n + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();

        let mut challenges = PlonkChallenges::<F>::new();
        challenges.insert_gamma(F::random(&mut prng)).unwrap();
        challenges.insert_alpha(F::random(&mut prng)).unwrap();
        challenges.insert_zeta(F::random(&mut prng)).unwrap();
        assert_eq!(
            challenges.insert_gamma(F::one()),
            Err(PlonkError::ChallengeError)
        );
        assert!(challenges.get_u().is_err());

        let z = FpPolynomial::<F>::random(&mut prng, n + 2);
        let cm_z = pcs.commit(&z).unwrap();
        let w_evals: Vec<F> = (0..3).map(|_| F::random(&mut prng)).collect();
        let s_evals: Vec<F> = (0..2).map(|_| F::random(&mut prng)).collect();
        let w_refs: Vec<&F> = w_evals.iter().collect();
        let s_refs: Vec<&F> = s_evals.iter().collect();
        let z_omega = F::random(&mut prng);

        let r = r_poly::<KZGCommitmentSchemeBN254, SparseR1CS<F>>(
            &params,
            &z,
            &w_refs,
            &s_refs,
            &z_omega,
            &challenges,
        )
        .unwrap();
        let cm_r = r_commitment::<KZGCommitmentSchemeBN254, SparseR1CS<F>>(
            params.get_verifier_params_ref(),
            &cm_z,
            &w_refs,
            &s_refs,
            &z_omega,
            &challenges,
        )
        .unwrap();
        assert_eq!(pcs.commit(&r).unwrap(), cm_r);
        assert!(r.degree() <= n + 2);
    }
}
