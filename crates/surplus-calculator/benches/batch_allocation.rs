use criterion::{Criterion, black_box, criterion_group, criterion_main};
use surplus_calculator::{AllocationCalculator, Transaction};

fn sample_transactions(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| if i % 10 == 0 { Transaction::default() } else { Transaction::new((i % 500) as f64 * 12.5) })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let calculator = AllocationCalculator::default();
    c.bench_function("compute_single", |b| {
        b.iter(|| calculator.compute(black_box(10_000.0), black_box(true)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let calculator = AllocationCalculator::default();
    let transactions = sample_transactions(10_000);
    c.bench_function("compute_batch_10k", |b| {
        b.iter(|| calculator.compute_batch(black_box(&transactions), true))
    });
}

criterion_group!(benches, bench_compute, bench_batch);
criterion_main!(benches);
