use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_distr::{Normal, Poisson};
use splitstat_core::{RecordTable, SessionRecord};
use splitstat_engine::{Analyzer, CachePolicy, Comparison, SummaryCache};

/// Generate a two-variant table of synthetic sessions
fn generate_table(rows: usize, seed: u64) -> RecordTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let clicks = Poisson::new(2.5).unwrap();
    let dwell: Normal<f64> = Normal::new(45.0, 12.0).unwrap();
    let feedback = Normal::new(0.2, 1.0).unwrap();

    (0..rows)
        .map(|i| {
            let variant = if i % 2 == 0 { "A" } else { "B" };
            SessionRecord::new(
                format!("s{i}"),
                variant,
                "query",
                clicks.sample(&mut rng),
                dwell.sample(&mut rng).max(0.0),
                feedback.sample(&mut rng),
            )
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let sizes = [100, 1_000, 10_000, 100_000];
    let tables: Vec<_> = sizes.iter().map(|&n| generate_table(n, 42)).collect();

    let analyzer = Analyzer::new();
    let comparison = Comparison::default();

    for (i, &size) in sizes.iter().enumerate() {
        let table = &tables[i];
        group.bench_with_input(BenchmarkId::new("rows", size), table, |b, table| {
            b.iter(|| analyzer.analyze(black_box(table), &comparison))
        });
    }

    group.finish();
}

fn bench_cached_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_analyze");
    let table = generate_table(10_000, 42);
    let analyzer = Analyzer::new();
    let comparison = Comparison::default();

    let cache = SummaryCache::new(CachePolicy::Lru { max_entries: 64 });
    group.bench_function("warm_hit", |b| {
        b.iter(|| cache.get_or_compute(&analyzer, black_box(&table), &comparison))
    });

    let no_cache = SummaryCache::new(CachePolicy::NoCache);
    group.bench_function("no_cache", |b| {
        b.iter(|| no_cache.get_or_compute(&analyzer, black_box(&table), &comparison))
    });

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_cached_analyze);
criterion_main!(benches);
