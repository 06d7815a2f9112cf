use criterion::{black_box, criterion_group, criterion_main, Criterion};
use larder_math::anomaly::scan_outliers;
use larder_math::descriptive::descriptive_stats;
use larder_math::distribution::analyze_distribution;
use larder_math::forecasting::{forecast_exponential_smoothing, DEFAULT_ALPHA, DEFAULT_HORIZON};
use larder_math::trend::analyze_trend;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn daily_sales(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(2024);
    (0..len)
        .map(|i| {
            let weekly = [0.8, 0.9, 1.0, 1.0, 1.2, 1.5, 1.3][i % 7];
            100.0 * weekly + 0.05 * i as f64 + rng.gen_range(-10.0..10.0)
        })
        .collect()
}

fn bench_components(c: &mut Criterion) {
    let data = daily_sales(10_000);

    c.bench_function("descriptive_stats_10k", |b| {
        b.iter(|| descriptive_stats(black_box(&data)))
    });
    c.bench_function("analyze_trend_10k", |b| b.iter(|| analyze_trend(black_box(&data))));
    c.bench_function("forecast_10k", |b| {
        b.iter(|| forecast_exponential_smoothing(black_box(&data), DEFAULT_HORIZON, DEFAULT_ALPHA))
    });
    c.bench_function("scan_outliers_10k", |b| b.iter(|| scan_outliers(black_box(&data))));
    c.bench_function("analyze_distribution_10k", |b| {
        b.iter(|| analyze_distribution(black_box(&data)))
    });
}

criterion_group!(benches, bench_components);
criterion_main!(benches);
