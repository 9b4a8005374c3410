use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
use crate::prelude::*;
use ark_bn254::Bn254;
use ark_ec::{
    pairing::{Pairing as ArkPairing, PairingOutput},
    CurveGroup,
};

/// An element of the target group, the output of the BN254 pairing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BN254Gt(pub(crate) PairingOutput<Bn254>);

/// The optimal ate pairing on BN254.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BN254PairingEngine;

impl Pairing for BN254PairingEngine {
    type ScalarField = BN254Scalar;
    type G1 = BN254G1;
    type G2 = BN254G2;
    type Gt = BN254Gt;

    #[inline]
    fn pairing(a: &BN254G1, b: &BN254G2) -> BN254Gt {
        BN254Gt(Bn254::pairing(a.0, b.0))
    }

    fn pairing_check(a: &BN254G1, b: &BN254G2, c: &BN254G1, d: &BN254G2) -> bool {
        let lhs = BN254G1::normalize_points(&[*a, *c]);
        let rhs = BN254G2::normalize_points(&[*b, *d]);
        Bn254::multi_pairing(lhs, rhs).is_zero()
    }
}

impl BN254G1 {
    fn normalize_points(points: &[Self]) -> Vec<ark_bn254::G1Affine> {
        let projective: Vec<_> = points.iter().map(|p| p.0).collect();
        ark_bn254::G1Projective::normalize_batch(&projective)
    }
}

impl BN254G2 {
    fn normalize_points(points: &[Self]) -> Vec<ark_bn254::G2Affine> {
        let projective: Vec<_> = points.iter().map(|p| p.0).collect();
        ark_bn254::G2Projective::normalize_batch(&projective)
    }
}
