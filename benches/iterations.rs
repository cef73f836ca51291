//! benches/iterations.rs
//! End-to-end password generation across iteration counts
//!
//! Includes session bookkeeping (clock reads, result storage, encoding)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use passforge_rs::{CancelToken, OutputEncoding, SessionBuilder};
use std::hint::black_box;

fn bench_generate_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_iterations");
    group.sample_size(10); // Fewer samples for slow iterations

    let iterations = [1i64, 10, 100, 1_000, 10_000, 100_000];

    for &iters in &iterations {
        let session = SessionBuilder::new()
            .with_iterations(iters)
            .build("benchmark-password", "example.com")
            .unwrap();
        let cancel = CancelToken::new();

        let id = BenchmarkId::new("iterations", iters);
        group.bench_with_input(id, &iters, |b, _| {
            b.iter(|| black_box(session.generate_password(&cancel).unwrap()));
        });
    }

    group.finish();
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encodings");

    for encoding in [
        OutputEncoding::Base64,
        OutputEncoding::Base64Url,
        OutputEncoding::Hex,
        OutputEncoding::Raw,
    ] {
        let session = SessionBuilder::new()
            .with_iterations(1_000)
            .with_length(64)
            .with_encoding(encoding)
            .build("benchmark-password", "example.com")
            .unwrap();
        let cancel = CancelToken::new();

        group.bench_function(encoding.name(), |b| {
            b.iter(|| black_box(session.generate_password(&cancel).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_iterations, bench_encodings);
criterion_main!(benches);
