use crate::errors::Result;
use crate::poly_commit::domain::EvaluationDomain;
use legend_algebra::{prelude::*, traits::Domain};

/// Field polynomial in coefficient form, low-order coefficient first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial
    /// # Example
    /// ```
    /// use legend_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use legend_algebra::bn254::BN254Scalar;
    /// use legend_algebra::{Zero, One};
    /// let poly = FpPolynomial::<BN254Scalar>::zero();
    /// let zero = BN254Scalar::zero();
    /// assert_eq!(poly.degree(), 0);
    /// assert_eq!(poly.eval(&zero), zero);
    /// assert_eq!(poly.eval(&BN254Scalar::one()), zero);
    /// ```
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficient are trimmed.
    /// # Example
    /// ```
    /// use legend_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use legend_algebra::bn254::BN254Scalar;
    /// use legend_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let five = two.add(&two).add(&one);
    /// let poly = FpPolynomial::from_coefs(vec![one, zero, one]);
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.eval(&two), five);
    /// let poly2 = FpPolynomial::from_coefs(vec![one, zero, one, zero, zero]);
    /// assert_eq!(poly, poly2);
    /// ```
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Build a polynomial from its zeroes/roots.
    pub fn from_zeroes(zeroes: &[F]) -> Self {
        let mut r = Self::one();
        for root in zeroes.iter() {
            let mut p = r.clone();
            r.coefs.insert(0, F::zero()); // multiply by X
            p.mul_scalar_assign(root);
            r.sub_assign(&p); // r = r * (X - root)
        }
        r
    }

    /// Return a polynomial of `degree` + 1 uniformly random coefficients.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R, degree: usize) -> FpPolynomial<F> {
        let coefs = (0..=degree).map(|_| F::random(prng)).collect();
        Self::from_coefs(coefs)
    }

    /// Remove high degree zero-coefficients
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
        if self.coefs.is_empty() {
            self.coefs.push(F::zero());
        }
    }

    /// Return degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate a polynomial on a point with Horner's rule.
    pub fn eval(&self, point: &F) -> F {
        let mut result = F::zero();
        for coef in self.coefs.iter().rev() {
            result.mul_assign(point);
            result.add_assign(coef);
        }
        result
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Add with another polynomial, producing a new polynomial.
    pub fn add(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.add_assign(other);
        new
    }

    /// Subtracts another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        let n = self.coefs.len();
        if other.coefs.len() > n {
            self.coefs
                .extend(other.coefs[n..].iter().map(|coef| -*coef));
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self, producing a new polynomial.
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Add `coef` to the coefficient of order `order`.
    pub fn add_coef_assign(&mut self, coef: &F, order: usize) {
        if self.coefs.len() <= order {
            self.coefs.resize(order + 1, F::zero());
        }
        self.coefs[order].add_assign(coef);
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar)
        }
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar into a new polynomial.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Divide by `X - point` with synthetic division, returning the quotient and `self(point)`.
    /// # Example
    /// ```
    /// use legend_plonk::poly_commit::field_polynomial::FpPolynomial;
    /// use legend_algebra::bn254::BN254Scalar;
    /// use legend_algebra::{One, ops::*};
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// // X^2 + X + 1 = (X - 1)(X + 2) + 3
    /// let poly = FpPolynomial::from_coefs(vec![one, one, one]);
    /// let (q, r) = poly.divide_by_linear(&one);
    /// assert_eq!(q, FpPolynomial::from_coefs(vec![two, one]));
    /// assert_eq!(r, two.add(&one));
    /// ```
    pub fn divide_by_linear(&self, point: &F) -> (Self, F) {
        let n = self.coefs.len();
        if n < 2 {
            return (Self::zero(), self.coefs.first().copied().unwrap_or_else(F::zero));
        }
        let mut quotient = vec![F::zero(); n - 1];
        let mut carry = self.coefs[n - 1];
        for i in (0..n - 1).rev() {
            quotient[i] = carry;
            carry = self.coefs[i].add(&carry.mul(point));
        }
        (Self::from_coefs(quotient), carry)
    }
}

impl<F: Domain> FpPolynomial<F> {
    /// Evaluate the polynomial on `domain`, in natural order.
    pub fn fft_with_domain(&self, domain: &EvaluationDomain<F>) -> Result<Vec<F>> {
        domain.fft(&self.coefs)
    }

    /// Evaluate the polynomial on the coset `shift * domain`.
    pub fn coset_fft_with_domain(&self, domain: &EvaluationDomain<F>) -> Result<Vec<F>> {
        domain.coset_fft(&self.coefs)
    }

    /// Interpolate the polynomial taking `values` on `domain`.
    pub fn ifft_with_domain(domain: &EvaluationDomain<F>, values: &[F]) -> Result<Self> {
        Ok(Self::from_coefs(domain.ifft(values)?))
    }

    /// Interpolate the polynomial taking `values` on the coset `shift * domain`.
    pub fn coset_ifft_with_domain(domain: &EvaluationDomain<F>, values: &[F]) -> Result<Self> {
        Ok(Self::from_coefs(domain.coset_ifft(values)?))
    }
}

#[cfg(test)]
mod test {
    use crate::poly_commit::{domain::EvaluationDomain, field_polynomial::FpPolynomial};
    use legend_algebra::{bn254::BN254Scalar, prelude::*};
    use rand_chacha::ChaChaRng;

    #[test]
    fn from_zeroes() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let zeroes: Vec<BN254Scalar> = (0..10).map(|_| BN254Scalar::random(&mut prng)).collect();
        let poly = FpPolynomial::from_zeroes(&zeroes[..]);
        assert_eq!(poly.degree(), 10);
        for root in zeroes.iter() {
            assert_eq!(BN254Scalar::zero(), poly.eval(root));
        }
    }

    #[test]
    fn add_sub_trim() {
        let one = BN254Scalar::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let p1 = FpPolynomial::from_coefs(vec![three, three, two, one]);
        let p2 = FpPolynomial::from_coefs(vec![three, two, one, one]);
        assert_eq!(p1.sub(&p2), FpPolynomial::from_coefs(vec![BN254Scalar::zero(), one, one]));
        assert_eq!(p1.sub(&p1), FpPolynomial::zero());
        assert!(p1.sub(&p1).is_zero());
        assert_eq!(p1.add(&p2).sub(&p2), p1);

        let mut p3 = FpPolynomial::from_coefs(vec![one]);
        p3.add_coef_assign(&two, 4);
        assert_eq!(p3.degree(), 4);
        p3.add_coef_assign(&two.neg(), 4);
        assert_eq!(p3, FpPolynomial::one());
    }

    #[test]
    fn divide_by_linear_matches_eval() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let poly = FpPolynomial::<BN254Scalar>::random(&mut prng, 20);
        let point = BN254Scalar::random(&mut prng);
        let (q, r) = poly.divide_by_linear(&point);
        assert_eq!(r, poly.eval(&point));
        // poly = q * (X - point) + r
        let x = BN254Scalar::random(&mut prng);
        assert_eq!(poly.eval(&x), q.eval(&x).mul(&x.sub(&point)).add(&r));
    }

    #[test]
    fn fft_matches_eval() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let domain = EvaluationDomain::<BN254Scalar>::new(16).unwrap();
        let poly = FpPolynomial::random(&mut prng, 15);

        let evals = poly.fft_with_domain(&domain).unwrap();
        for (i, eval) in evals.iter().enumerate() {
            assert_eq!(*eval, poly.eval(&domain.element(i)));
        }
        assert_eq!(FpPolynomial::ifft_with_domain(&domain, &evals).unwrap(), poly);

        let coset_evals = poly.coset_fft_with_domain(&domain).unwrap();
        for (i, eval) in coset_evals.iter().enumerate() {
            let x = domain.coset_shift().mul(&domain.element(i));
            assert_eq!(*eval, poly.eval(&x));
        }
        assert_eq!(
            FpPolynomial::coset_ifft_with_domain(&domain, &coset_evals).unwrap(),
            poly
        );

        let too_big = FpPolynomial::<BN254Scalar>::random(&mut prng, 16);
        assert!(too_big.fft_with_domain(&domain).is_err());
    }
}
