use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use finger_erp::{compute_erp, ErpConfig, Finger, TrialRecord};

/// ~10 minutes at 1 kHz with 30 trials per finger.
fn session() -> (Vec<TrialRecord>, Vec<i64>) {
    let signal: Vec<i64> = (0..600_000_i64).map(|i| (i * 7919) % 2001 - 1000).collect();
    let trials = (0..150)
        .map(|i| {
            let onset = 1_000 + 3_900 * i as i64;
            TrialRecord::new(onset, onset + 120, Finger::ALL[i % 5])
        })
        .collect();
    (trials, signal)
}

fn bench_sequential(c: &mut Criterion) {
    let (trials, signal) = session();
    let cfg = ErpConfig::default();
    c.bench_function("compute_erp 150 trials (sequential)", |b| {
        b.iter(|| {
            let erp = compute_erp(black_box(&trials), black_box(&signal), &cfg).unwrap();
            black_box(erp.data()[[0, 200]])
        })
    });
}

fn bench_parallel(c: &mut Criterion) {
    let (trials, signal) = session();
    let cfg = ErpConfig { parallel: true, ..ErpConfig::default() };
    c.bench_function("compute_erp 150 trials (parallel)", |b| {
        b.iter(|| {
            let erp = compute_erp(black_box(&trials), black_box(&signal), &cfg).unwrap();
            black_box(erp.data()[[0, 200]])
        })
    });
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
