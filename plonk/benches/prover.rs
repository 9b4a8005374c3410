use criterion::{criterion_group, criterion_main, Criterion};
use legend_algebra::{bn254::BN254Scalar, prelude::*};
use legend_plonk::plonk::{
    constraint_system::{ConstraintSystem, SparseR1CS},
    indexer::indexer,
    prover::prover,
    verifier::verifier,
};
use legend_plonk::poly_commit::{kzg_poly_com::KZGCommitmentSchemeBN254, pcs::PolyComScheme};
use merlin::Transcript;

/// A chain of multiplications `x_{i+1} = x_i * x_i + x_i`, with the last value public.
fn build_circuit(steps: usize) -> SparseR1CS<BN254Scalar> {
    let mut value = BN254Scalar::from(3u32);
    for _ in 0..steps {
        value = value.mul(&value).add(&value);
    }

    let mut cs = SparseR1CS::new();
    let out = cs.new_public_variable(value).unwrap();
    let mut cur = cs.new_variable(BN254Scalar::from(3u32));
    cs.insert_constant_gate(cur, BN254Scalar::from(3u32));
    for _ in 0..steps {
        let square = cs.mul(cur, cur);
        cur = cs.add(square, cur);
    }
    cs.insert_equality_assertion(cur, out);
    cs
}

fn bench_plonk(c: &mut Criterion) {
    let mut prng = test_rng();
    let cs = build_circuit(2000);
    let pcs = KZGCommitmentSchemeBN254::new(cs.size() + 2, &mut prng);
    let witness = cs.get_witness();
    let public_inputs = cs.public_inputs();

    let mut indexer_group = c.benchmark_group("bench_indexer");
    indexer_group.sample_size(10);
    indexer_group.bench_function("indexer".to_string(), |b| {
        b.iter(|| indexer(&cs, &pcs).unwrap())
    });
    indexer_group.finish();

    let prover_params = indexer(&cs, &pcs).unwrap();

    let mut prover_group = c.benchmark_group("bench_prover");
    prover_group.sample_size(10);
    prover_group.bench_function("prover".to_string(), |b| {
        b.iter(|| {
            let mut transcript = Transcript::new(b"BenchPlonk");
            prover(
                &mut prng,
                &mut transcript,
                &pcs,
                &cs,
                &prover_params,
                &witness,
            )
            .unwrap()
        })
    });
    prover_group.finish();

    let mut transcript = Transcript::new(b"BenchPlonk");
    let proof = prover(
        &mut prng,
        &mut transcript,
        &pcs,
        &cs,
        &prover_params,
        &witness,
    )
    .unwrap();
    let verifier_pcs = pcs.shrink_to_verifier_only().unwrap();
    let verifier_params_ref = prover_params.get_verifier_params_ref();

    let mut verifier_group = c.benchmark_group("bench_verifier");
    verifier_group.bench_function("verifier".to_string(), |b| {
        b.iter(|| {
            let mut transcript = Transcript::new(b"BenchPlonk");
            verifier(
                &mut transcript,
                &verifier_pcs,
                verifier_params_ref,
                &public_inputs,
                &proof,
            )
            .unwrap()
        })
    });
    verifier_group.finish();
}

criterion_group!(benches, bench_plonk);
criterion_main!(benches);
