//! Benchmarks for named gate registration and matrix lookup
//!
//! Measures:
//! - Registering a gate under a fresh name and under an existing name
//! - Looking a matrix up in each output format
//! - Lookups through the lock of a shared cache

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use safegate_gates::{
    create_named_gate, GateMatrix, MatrixCache, MatrixFormat, MatrixLookup, SharedMatrixCache,
};

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for arity in [1i64, 2, 3] {
        let matrix = GateMatrix::identity(1 << arity).unwrap();

        group.bench_with_input(BenchmarkId::new("overwrite", arity), &matrix, |b, matrix| {
            let mut cache = MatrixCache::new();
            b.iter(|| {
                black_box(create_named_gate(&mut cache, 0, matrix.clone(), "U", arity).unwrap())
            });
        });
    }

    group.bench_function("fresh_names", |b| {
        let names: Vec<String> = (0..1024).map(|i| format!("U{}", i)).collect();
        b.iter(|| {
            let mut cache = MatrixCache::with_capacity(names.len());
            for name in &names {
                let matrix = GateMatrix::identity(2).unwrap();
                create_named_gate(&mut cache, 0, matrix, name.as_str(), 1).unwrap();
            }
            black_box(cache.len())
        });
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let mut cache = MatrixCache::new();
    let ccx = GateMatrix::identity(8).unwrap();
    let gate = create_named_gate(&mut cache, (0, 1, 2), ccx, "CCX", 3).unwrap();

    for format in MatrixFormat::ALL {
        group.bench_with_input(BenchmarkId::new("format", format), &format, |b, &format| {
            b.iter(|| black_box(gate.target_matrix(&cache, black_box(format)).unwrap()));
        });
    }

    let shared = SharedMatrixCache::new();
    let x = GateMatrix::identity(2).unwrap();
    let shared_gate = create_named_gate(&mut &shared, 0, x, "X", 1).unwrap();
    group.bench_function("shared_native", |b| {
        b.iter(|| black_box(shared_gate.native_matrix(&shared).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_registration, bench_lookup);
criterion_main!(benches);
