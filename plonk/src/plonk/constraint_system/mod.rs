use crate::errors::{PlonkError, Result};
use legend_algebra::prelude::*;

pub mod sparse_r1cs;

/// Default used constraint system.
pub use sparse_r1cs::SparseR1CS;

/// Variable index
pub type VarIndex = usize;
/// Constraint index
pub type CsIndex = usize;

/// Trait for PLONK constraint systems.
///
/// Rows are laid out in the order the selector polynomials are built:
/// public inputs first, then gates, then padding up to `size()`.
pub trait ConstraintSystem: Sized {
    /// The scalar field.
    type Field: Scalar;

    /// Return the number of rows after padding. It is a power of two,
    /// and so divides `q - 1` for the supported fields.
    fn size(&self) -> usize;

    /// Return number of variables in the constrain system
    fn num_vars(&self) -> usize;

    /// Return the number of public variables. They are the first variables.
    fn nb_public(&self) -> usize;

    /// Return the wiring of the constrain system, one vector of `size()` variables per wire.
    fn wiring(&self) -> Vec<Vec<VarIndex>>;

    /// Return the number of wires in a single gate.
    fn n_wires_per_gate() -> usize;

    /// Return the number of selectors.
    fn num_selectors(&self) -> usize;

    /// Return the (index)-th selector over all `size()` rows.
    fn selector(&self, index: usize) -> Result<Vec<Self::Field>>;

    /// Evaluate the constraint equation given public input and the values of the wires and the selectors.
    fn eval_gate_func(
        wire_vals: &[&Self::Field],
        sel_vals: &[&Self::Field],
        pub_input: &Self::Field,
    ) -> Result<Self::Field>;

    /// Given the wires values of a gate, evaluate the coefficients of the selectors in the
    /// constraint equation.
    fn eval_selector_multipliers(wire_vals: &[&Self::Field]) -> Result<Vec<Self::Field>>;

    /// Check that the circuit can be indexed: at least one variable, no more public
    /// variables than variables, and `n_wires_per_gate()` wiring columns of `size()`
    /// rows referring only to existing variables.
    fn check_shape(&self) -> Result<()> {
        let n = self.size();
        let num_vars = self.num_vars();
        if num_vars == 0 || self.nb_public() > num_vars {
            return Err(PlonkError::SetupError);
        }
        let wiring = self.wiring();
        if wiring.len() != Self::n_wires_per_gate() {
            return Err(PlonkError::SetupError);
        }
        for wire in wiring.iter() {
            if wire.len() != n || wire.iter().any(|var| *var >= num_vars) {
                return Err(PlonkError::SetupError);
            }
        }
        Ok(())
    }

    /// Compute the permutation implied by the copy constraints.
    /// Position `j * size + i` is wire `j` of row `i`; positions holding the same
    /// variable form one cycle.
    fn compute_permutation(&self) -> Result<Vec<usize>> {
        self.check_shape()?;
        let v: Vec<VarIndex> = self.wiring().concat();
        let mut perm = vec![0usize; v.len()];
        let mut first = vec![None; self.num_vars()];
        let mut last = vec![0usize; self.num_vars()];
        for (pos, var) in v.iter().enumerate() {
            match first[*var] {
                None => first[*var] = Some(pos),
                Some(_) => perm[last[*var]] = pos,
            }
            last[*var] = pos;
        }
        for (var, head) in first.iter().enumerate() {
            if let Some(head) = head {
                perm[last[var]] = *head;
            }
        }
        Ok(perm)
    }

    /// Map the witnesses into the wires of the circuit.
    /// The (i * size + j)-th output element is the value of the i-th wire on the j-th row.
    fn extend_witness(&self, witness: &[Self::Field]) -> Vec<Self::Field> {
        let mut extended = Vec::with_capacity(Self::n_wires_per_gate() * self.size());
        for wire_slice in self.wiring().iter() {
            for index in wire_slice.iter() {
                extended.push(witness[*index]);
            }
        }
        extended
    }

    /// Check the witness against every row, returning the first failing row.
    fn verify_witness(&self, witness: &[Self::Field]) -> Result<()> {
        self.check_shape()?;
        if witness.len() != self.num_vars() {
            return Err(PlonkError::WitnessLengthError {
                expected: self.num_vars(),
                actual: witness.len(),
            });
        }
        let n = self.size();
        let wiring = self.wiring();
        let selectors = (0..self.num_selectors())
            .map(|i| self.selector(i))
            .collect::<Result<Vec<_>>>()?;
        let zero = Self::Field::zero();
        for row in 0..n {
            let wire_vals: Vec<&Self::Field> =
                wiring.iter().map(|wire| &witness[wire[row]]).collect();
            let sel_vals: Vec<&Self::Field> = selectors.iter().map(|q| &q[row]).collect();
            let pub_input = if row < self.nb_public() {
                &witness[row]
            } else {
                &zero
            };
            if !Self::eval_gate_func(&wire_vals, &sel_vals, pub_input)?.is_zero() {
                return Err(PlonkError::ConstraintUnsatisfied(row));
            }
        }
        Ok(())
    }
}
