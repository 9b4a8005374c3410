use crate::errors::{PlonkError, Result};
use crate::poly_commit::field_polynomial::FpPolynomial;
use ark_poly::{EvaluationDomain as _, Radix2EvaluationDomain};
use legend_algebra::{prelude::*, traits::Domain};

/// A multiplicative subgroup `<g>` of power-of-two order, together with the coset
/// `shift * <g>` where `shift` is the multiplicative generator of the field.
/// Transforms run on the arkworks radix-2 domain over the underlying field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationDomain<F: Domain> {
    subgroup: Radix2EvaluationDomain<F::Field>,
    coset: Radix2EvaluationDomain<F::Field>,
}

impl<F: Domain> EvaluationDomain<F> {
    /// Build the domain of `size` elements. `size` must be a power of two dividing `q - 1`.
    pub fn new(size: usize) -> Result<Self> {
        // arkworks rounds up to the next power of two, reject that here.
        if log2_exact(size).is_none() {
            return Err(PlonkError::DomainSizeError(size));
        }
        let subgroup = Radix2EvaluationDomain::<F::Field>::new(size)
            .ok_or(PlonkError::DomainSizeError(size))?;
        let coset = subgroup
            .get_coset(F::multiplicative_generator().get_field())
            .ok_or(PlonkError::DomainSizeError(size))?;
        Ok(Self { subgroup, coset })
    }

    /// Return the number of elements.
    pub fn size(&self) -> usize {
        self.subgroup.size()
    }

    /// Return `1 / size`.
    pub fn size_inv(&self) -> F {
        F::from_field(self.subgroup.size_inv())
    }

    /// Return the generator of the subgroup.
    pub fn generator(&self) -> F {
        F::from_field(self.subgroup.group_gen())
    }

    /// Return the shift of the coset.
    pub fn coset_shift(&self) -> F {
        F::from_field(self.coset.coset_offset())
    }

    /// Return `g^i`.
    pub fn element(&self, i: usize) -> F {
        F::from_field(self.subgroup.element(i))
    }

    /// Return `[1, g, ..., g^(size-1)]`.
    pub fn elements(&self) -> Vec<F> {
        self.subgroup.elements().map(F::from_field).collect()
    }

    /// Return `[shift, shift * g, ..., shift * g^(size-1)]`.
    pub fn coset_elements(&self) -> Vec<F> {
        self.coset.elements().map(F::from_field).collect()
    }

    /// Evaluate the coefficients `coefs` on the subgroup, in natural order.
    /// Fails when there are more coefficients than points.
    pub fn fft(&self, coefs: &[F]) -> Result<Vec<F>> {
        self.forward(&self.subgroup, coefs)
    }

    /// Evaluate the coefficients `coefs` on the coset.
    pub fn coset_fft(&self, coefs: &[F]) -> Result<Vec<F>> {
        self.forward(&self.coset, coefs)
    }

    /// Interpolate `evals` given on the subgroup. `evals` must have exactly `size` entries.
    pub fn ifft(&self, evals: &[F]) -> Result<Vec<F>> {
        self.inverse(&self.subgroup, evals)
    }

    /// Interpolate `evals` given on the coset.
    pub fn coset_ifft(&self, evals: &[F]) -> Result<Vec<F>> {
        self.inverse(&self.coset, evals)
    }

    /// Evaluate a polynomial of at most `size` coefficients on the coset.
    pub fn evaluate_on_coset(&self, poly: &FpPolynomial<F>) -> Result<Vec<F>> {
        poly.coset_fft_with_domain(self)
    }

    /// Return `x^size - 1`.
    pub fn vanishing_eval(&self, x: &F) -> F {
        F::from_field(self.subgroup.evaluate_vanishing_polynomial(x.get_field()))
    }

    fn forward(&self, domain: &Radix2EvaluationDomain<F::Field>, coefs: &[F]) -> Result<Vec<F>> {
        if coefs.len() > self.size() {
            return Err(PlonkError::DegreeError);
        }
        let mut values: Vec<F::Field> = coefs.iter().map(Domain::get_field).collect();
        domain.fft_in_place(&mut values);
        Ok(values.into_iter().map(F::from_field).collect())
    }

    fn inverse(&self, domain: &Radix2EvaluationDomain<F::Field>, evals: &[F]) -> Result<Vec<F>> {
        if evals.len() != self.size() {
            return Err(PlonkError::DomainSizeError(evals.len()));
        }
        let mut values: Vec<F::Field> = evals.iter().map(Domain::get_field).collect();
        domain.ifft_in_place(&mut values);
        Ok(values.into_iter().map(F::from_field).collect())
    }
}
