//! Benchmarks for structural hashing and equality.
//!
//! Measures the cost of a first (uncached) hash against cached reuse, and
//! the equality fast paths (identity shortcut, hash rejection) against a
//! full structural comparison.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use veq::{HashCache, Value};

#[derive(Value)]
struct Document {
    title: String,
    body: String,
    revision: u64,
    cache: HashCache,
}

fn document(revision: u64) -> Document {
    Document {
        title: "benchmark".to_string(),
        body: "the quick brown fox jumps over the lazy dog ".repeat(64),
        revision,
        cache: HashCache::new(),
    }
}

fn hash_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("value/hash");

    group.bench_function("first_call", |b| {
        b.iter(|| {
            let doc = document(1);
            black_box(doc.value_hash())
        });
    });

    let doc = document(1);
    doc.value_hash();
    group.bench_function("cached", |b| {
        b.iter(|| black_box(doc.value_hash()));
    });

    group.finish();
}

fn equality_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("value/eq");

    let base = document(1);
    let equal = document(1);
    let differing = document(2);
    base.value_hash();
    equal.value_hash();
    differing.value_hash();

    group.bench_function("identity", |b| {
        b.iter(|| black_box(base.value_eq(&base)));
    });

    group.bench_function("hash_reject", |b| {
        b.iter(|| black_box(&base == &differing));
    });

    group.bench_function("equal_pair", |b| {
        b.iter(|| black_box(&base == &equal));
    });

    group.finish();
}

criterion_group!(benches, hash_benchmarks, equality_benchmarks);
criterion_main!(benches);
