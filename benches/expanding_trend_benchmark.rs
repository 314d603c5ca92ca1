//! Expanding trend benchmarks
//!
//! Measures the per-window recomputation cost for growing series lengths and
//! the parallel multi-column path.

use chrono::{DateTime, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pandrs_trend::features::ExpandingTrend;
use pandrs_trend::temporal::{date_range_periods, Frequency};
use pandrs_trend::NA;

/// Create a synthetic minute-level series with roughly 5% missing values
fn create_series(n_samples: usize, seed: u64) -> (Vec<DateTime<Utc>>, Vec<NA<f64>>) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps = date_range_periods(start, n_samples, Frequency::Minutely).unwrap();

    // Simple LCG random generator for reproducibility
    let mut rng_state = seed;
    let values = (0..n_samples)
        .map(|i| {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let noise = (rng_state >> 33) as f64 / (u32::MAX as f64);
            if noise < 0.05 {
                NA::NA
            } else {
                NA::Value(0.5 * i as f64 + noise)
            }
        })
        .collect();

    (timestamps, values)
}

fn bench_single_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expanding Trend");
    let trend = ExpandingTrend::default();

    for n_samples in [100, 1_000, 5_000] {
        let (timestamps, values) = create_series(n_samples, 42);
        group.bench_with_input(
            BenchmarkId::new("compute", n_samples),
            &(timestamps, values),
            |b, (timestamps, values)| b.iter(|| trend.compute(timestamps, values).unwrap()),
        );
    }

    group.finish();
}

fn bench_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expanding Trend Columns");
    let trend = ExpandingTrend::default();

    let (timestamps, _) = create_series(1_000, 0);
    let columns: Vec<Vec<NA<f64>>> = (0..8).map(|seed| create_series(1_000, seed).1).collect();

    group.bench_function("compute_columns_8x1000", |b| {
        b.iter(|| trend.compute_columns(&timestamps, &columns).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_single_column, bench_columns);
criterion_main!(benches);
