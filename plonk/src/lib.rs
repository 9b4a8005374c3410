//! A PLONK proving system over BN254 with KZG polynomial commitments.
//!
//! Circuits are built as a [plonk::constraint_system::SparseR1CS], preprocessed by
//! [plonk::indexer::indexer], proven by [plonk::prover::prover] and checked by
//! [plonk::verifier::verifier].
#![deny(unused_must_use, bare_trait_objects)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate serde_derive;

/// Module for error handling.
pub mod errors;

/// Module for the PLONK proving system.
pub mod plonk;

/// Module for the polynomial commitment scheme.
pub mod poly_commit;
