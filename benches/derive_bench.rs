//! Derivation throughput benchmarks.
//!
//! Projections are recomputed from scratch on every request and every poll
//! cycle. Most read a short suffix window, so their cost should stay flat as
//! the feed grows; the dashboard stats and maturity read everything.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `projection` | Each derivation on a 10 000-record feed |
//! | `all` | `Projections::compute` across feed sizes |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench derive_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use chrono::Utc;
use cmm::core::config::MaturityConfig;
use cmm::core::derive::{self, Projections};
use cmm::{parse_feed, RecordStore};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn store(n: usize) -> RecordStore {
    let body: String = (0..n)
        .map(|i| {
            let minutes = i * 10;
            format!(
                "3C8A{:04X} {:02}-03-25 {:02}:{:02}:00 {:.1} {}\n",
                i % 0xFFFF,
                1 + (minutes / 1440) % 28,
                (minutes / 60) % 24,
                minutes % 60,
                18.0 + 22.0 * (i as f64 / n as f64 * std::f64::consts::PI).sin(),
                i % 3
            )
        })
        .collect();
    parse_feed(&body)
}

// ---------------------------------------------------------------------------
// Individual projections
// ---------------------------------------------------------------------------

fn projection_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let records = store(10_000);
    let params = MaturityConfig::default();
    let now = Utc::now();

    group.bench_function("dashboard", |b| b.iter(|| derive::dashboard::derive(black_box(&records))));
    group.bench_function("timeline", |b| b.iter(|| derive::timeline::derive(black_box(&records))));
    group.bench_function("analytics", |b| b.iter(|| derive::analytics::derive(black_box(&records))));
    group.bench_function("elements", |b| b.iter(|| derive::elements::derive(black_box(&records))));
    group.bench_function("mass_concrete", |b| {
        b.iter(|| derive::mass_concrete::derive(black_box(&records)))
    });
    group.bench_function("admin", |b| b.iter(|| derive::admin::derive(black_box(&records), now)));
    group.bench_function("maturity", |b| {
        b.iter(|| derive::maturity::derive(black_box(&records), &params, None))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Everything at once
// ---------------------------------------------------------------------------

fn all_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("all");
    let params = MaturityConfig::default();

    for n in [100usize, 1_000, 10_000] {
        let records = store(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &records, |b, records| {
            b.iter(|| Projections::compute(black_box(records), Utc::now(), &params))
        });
    }

    group.finish();
}

criterion_group!(benches, projection_bench, all_bench);
criterion_main!(benches);
