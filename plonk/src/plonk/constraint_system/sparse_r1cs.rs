//! Module for the sparse R1CS constraint system.
//! Every row is `ql*l + qr*r + qm*l*r + qo*o + qk = 0` over three wires.
use super::{ConstraintSystem, CsIndex, VarIndex};
use crate::errors::{PlonkError, Result};
use legend_algebra::prelude::*;

/// The wires number of a gate.
pub const N_WIRES_PER_GATE: usize = 3;

/// The selectors number, in the order `ql, qr, qm, qo, qk`.
pub const N_SELECTORS: usize = 5;

/// The smallest domain the prover supports.
pub const MIN_DOMAIN_SIZE: usize = 4;

/// One row of the circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseConstraint<F> {
    /// Variables on the left, right and output wires.
    pub wires: [VarIndex; N_WIRES_PER_GATE],
    /// Selector values `ql, qr, qm, qo, qk`.
    pub selectors: [F; N_SELECTORS],
}

/// Sparse R1CS constraint system.
///
/// Public variables must be declared before any private variable or gate;
/// they take the first variable indices and the first rows of the circuit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SparseR1CS<F> {
    /// the gates added by the circuit builder.
    pub constraints: Vec<SparseConstraint<F>>,
    /// the assertions, placed after all the gates.
    pub assertions: Vec<SparseConstraint<F>>,
    /// the number of variable.
    pub num_vars: usize,
    /// the number of public variables.
    pub nb_public: usize,
    /// A private witness for the circuit.
    pub witness: Vec<F>,
}

impl<F: Scalar> ConstraintSystem for SparseR1CS<F> {
    type Field = F;

    fn size(&self) -> usize {
        self.num_rows().next_power_of_two().max(MIN_DOMAIN_SIZE)
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn nb_public(&self) -> usize {
        self.nb_public
    }

    /// Public rows carry the public variable on the left wire and variable 0
    /// elsewhere. Padding rows use variable 0 everywhere.
    fn wiring(&self) -> Vec<Vec<VarIndex>> {
        let n = self.size();
        let mut wiring: Vec<Vec<VarIndex>> = (0..N_WIRES_PER_GATE)
            .map(|_| Vec::with_capacity(n))
            .collect();
        for i in 0..self.nb_public {
            wiring[0].push(i);
            wiring[1].push(0);
            wiring[2].push(0);
        }
        for gate in self.gates() {
            for (wire, var) in wiring.iter_mut().zip(gate.wires.iter()) {
                wire.push(*var);
            }
        }
        for wire in wiring.iter_mut() {
            wire.resize(n, 0);
        }
        wiring
    }

    fn n_wires_per_gate() -> usize {
        N_WIRES_PER_GATE
    }

    fn num_selectors(&self) -> usize {
        N_SELECTORS
    }

    /// Public rows have `ql = -1` and every other selector zero, so that the
    /// public input term closes the row. Padding rows are all zero.
    fn selector(&self, index: usize) -> Result<Vec<F>> {
        if index >= N_SELECTORS {
            return Err(PlonkError::Message(format!("selector index {} out of range", index)));
        }
        let n = self.size();
        let mut values = Vec::with_capacity(n);
        let public_value = if index == 0 { -F::one() } else { F::zero() };
        values.resize(self.nb_public, public_value);
        values.extend(self.gates().map(|gate| gate.selectors[index]));
        values.resize(n, F::zero());
        Ok(values)
    }

    /// The equation is
    /// ```text
    ///     ql*l + qr*r + qm*(l*r) + qo*o + qk + PI = 0
    /// ```
    fn eval_gate_func(wire_vals: &[&F], sel_vals: &[&F], pub_input: &F) -> Result<F> {
        if wire_vals.len() != N_WIRES_PER_GATE || sel_vals.len() != N_SELECTORS {
            return Err(PlonkError::Message("wrong number of wires or selectors".to_string()));
        }
        let multipliers = Self::eval_selector_multipliers(wire_vals)?;
        let mut r = *pub_input;
        for (sel, multiplier) in sel_vals.iter().zip(multipliers.iter()) {
            r.add_assign(&(**sel).mul(multiplier));
        }
        Ok(r)
    }

    /// The coefficients are
    /// (l, r, l*r, o, 1)
    fn eval_selector_multipliers(wire_vals: &[&F]) -> Result<Vec<F>> {
        if wire_vals.len() < N_WIRES_PER_GATE {
            return Err(PlonkError::Message("wrong number of wires".to_string()));
        }
        Ok(vec![
            *wire_vals[0],
            *wire_vals[1],
            wire_vals[0].mul(wire_vals[1]),
            *wire_vals[2],
            F::one(),
        ])
    }
}

impl<F: Scalar> SparseR1CS<F> {
    /// Create an empty constraint system.
    pub fn new() -> SparseR1CS<F> {
        SparseR1CS {
            constraints: vec![],
            assertions: vec![],
            num_vars: 0,
            nb_public: 0,
            witness: vec![],
        }
    }

    /// Number of rows before padding.
    pub fn num_rows(&self) -> usize {
        self.nb_public + self.constraints.len() + self.assertions.len()
    }

    /// The rows after the public ones, in circuit order.
    fn gates(&self) -> impl Iterator<Item = &SparseConstraint<F>> {
        self.constraints.iter().chain(self.assertions.iter())
    }

    /// Add a public variable. Fails once a private variable or a gate exists.
    pub fn new_public_variable(&mut self, value: F) -> Result<VarIndex> {
        if self.num_vars != self.nb_public || !self.constraints.is_empty() {
            return Err(PlonkError::PublicInputsError);
        }
        self.nb_public += 1;
        Ok(self.new_variable(value))
    }

    /// Add a variable (with actual value `value`) into the constraint system.
    pub fn new_variable(&mut self, value: F) -> VarIndex {
        self.num_vars += 1;
        self.witness.push(value);
        self.num_vars - 1
    }

    /// Add a vector of variables into the constraint system.
    pub fn add_variables(&mut self, values: &[F]) {
        self.num_vars += values.len();
        self.witness.extend_from_slice(values);
    }

    fn check_wires(&self, wires: &[VarIndex; N_WIRES_PER_GATE]) {
        assert!(
            wires.iter().all(|&x| x < self.num_vars),
            "wire index out of bound"
        );
    }

    /// Add a gate `ql*l + qr*r + qm*l*r + qo*o + qk = 0` and return its row among the gates.
    pub fn insert_constraint(
        &mut self,
        wires: [VarIndex; N_WIRES_PER_GATE],
        selectors: [F; N_SELECTORS],
    ) -> CsIndex {
        self.check_wires(&wires);
        self.constraints.push(SparseConstraint { wires, selectors });
        self.constraints.len() - 1
    }

    /// Add an Add gate. (left, right, out).
    pub fn insert_add_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let zero = F::zero();
        self.insert_constraint(
            [left_var, right_var, out_var],
            [F::one(), F::one(), zero, -F::one(), zero],
        );
    }

    /// Add a Mul gate. (left, right, out).
    pub fn insert_mul_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let zero = F::zero();
        self.insert_constraint(
            [left_var, right_var, out_var],
            [zero, zero, F::one(), -F::one(), zero],
        );
    }

    /// Constrain `var` to equal the constant `constant`.
    pub fn insert_constant_gate(&mut self, var: VarIndex, constant: F) {
        let zero = F::zero();
        self.insert_constraint([var, 0, 0], [F::one(), zero, zero, zero, -constant]);
    }

    /// Create an output variable and insert an addition gate.
    pub fn add(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let value = self.witness[left_var].add(&self.witness[right_var]);
        let out_var = self.new_variable(value);
        self.insert_add_gate(left_var, right_var, out_var);
        out_var
    }

    /// Create an output variable and insert a multiplication gate.
    pub fn mul(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let value = self.witness[left_var].mul(&self.witness[right_var]);
        let out_var = self.new_variable(value);
        self.insert_mul_gate(left_var, right_var, out_var);
        out_var
    }

    fn insert_assertion(
        &mut self,
        wires: [VarIndex; N_WIRES_PER_GATE],
        selectors: [F; N_SELECTORS],
    ) {
        self.check_wires(&wires);
        self.assertions.push(SparseConstraint { wires, selectors });
    }

    /// Assert `left == right`.
    pub fn insert_equality_assertion(&mut self, left_var: VarIndex, right_var: VarIndex) {
        let zero = F::zero();
        self.insert_assertion(
            [left_var, right_var, 0],
            [F::one(), -F::one(), zero, zero, zero],
        );
    }

    /// Assert `var` is 0 or 1, as `var * var - var = 0`.
    pub fn insert_boolean_assertion(&mut self, var: VarIndex) {
        let zero = F::zero();
        self.insert_assertion(
            [var, var, var],
            [zero, zero, F::one(), -F::one(), zero],
        );
    }

    /// The values of the public variables, in declaration order.
    pub fn public_inputs(&self) -> Vec<F> {
        self.witness[..self.nb_public].to_vec()
    }

    /// Return a copy of the witness built alongside the circuit.
    pub fn get_witness(&self) -> Vec<F> {
        self.witness.clone()
    }
}
