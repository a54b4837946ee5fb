use criterion::{criterion_group, criterion_main, Criterion};
use dsa_core::tokenizer::normalize_query;

fn bench_normalize(c: &mut Criterion) {
    let query = "Find the longest palindromic substring in 2 strings using twoPointers and 1000 queries";
    c.bench_function("normalize_query", |b| b.iter(|| normalize_query(query)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
