//! Key generation, proving and verification over BLS12-381

use ark_bls12_381::Bls12_381;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lego_groth16::{generate_lego_example_with_field_input, kg, prv, vfy, LegoExample};
use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

const SIZES: [usize; 3] = [16, 256, 1024];

fn example(num_constraints: usize, rng: &mut ChaCha20Rng) -> LegoExample<Bls12_381> {
    generate_lego_example_with_field_input(num_constraints, 4, 4, rng).unwrap()
}

fn bench_kg(c: &mut Criterion) {
    let mut group = c.benchmark_group("kg");
    group.sample_size(10);
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    for size in SIZES {
        let example = example(size, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), &example, |b, ex| {
            b.iter(|| kg(&ex.ck, &ex.lego_cs, &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_prv(c: &mut Criterion) {
    let mut group = c.benchmark_group("prv");
    group.sample_size(10);
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    for size in SIZES {
        let ex = example(size, &mut rng);
        let kp = kg(&ex.ck, &ex.lego_cs, &mut rng).unwrap();
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| prv(&kp, &ex.x, &ex.cm, &ex.opn, &ex.omega, &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_vfy(c: &mut Criterion) {
    let mut group = c.benchmark_group("vfy");
    let mut rng = ChaCha20Rng::seed_from_u64(2);

    for size in SIZES {
        let ex = example(size, &mut rng);
        let kp = kg(&ex.ck, &ex.lego_cs, &mut rng).unwrap();
        let proof = prv(&kp, &ex.x, &ex.cm, &ex.opn, &ex.omega, &mut rng).unwrap();
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| assert!(vfy(&kp, &ex.x, &ex.cm, &proof)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kg, bench_prv, bench_vfy);
criterion_main!(benches);
