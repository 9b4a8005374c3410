//! Field, group and pairing primitives over the BN254 curve, wrapped behind the
//! `Scalar`, `Group` and `Pairing` traits consumed by the proving system.

#![warn(missing_docs)]
#![deny(unused_must_use, bare_trait_objects)]

/// The BN254 curve.
pub mod bn254;

/// Errors of the algebra crate.
pub mod errors;

/// Commonly used imports.
pub mod prelude;

/// Deterministic randomness for tests.
pub mod rand_helper;

/// Serde helpers for field and group elements.
pub mod serialization;

/// The traits for scalars, groups and pairings.
pub mod traits;

/// Small helpers: exact base-two logarithms and base64.
pub mod utils;

#[doc(hidden)]
pub use ark_std::{fmt, iter, ops, rand, One, UniformRand, Zero};

#[doc(hidden)]
pub use serde;
