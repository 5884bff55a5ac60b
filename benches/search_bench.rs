//! Filter and suggestion benchmarks.
//!
//! Both engines run on every keystroke in local mode, so they must stay fast
//! on catalogs far larger than the built-in twelve records.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `filter/unfiltered` | Predicate pass with the default criteria (no ranking) |
//! | `filter/ranked` | Predicate pass plus title-tier ranking for a search term |
//! | `suggest` | Candidate collection, dedupe and tier sort for common queries |
//!
//! Catalogs are the built-in dataset repeated with fresh ids, at 1k, 10k and
//! 100k records.
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pantry_core::dataset;
use pantry_core::filter::filter;
use pantry_core::suggest::suggest;
use pantry_core::types::{FilterCriteria, Recipe, RecordId};
use pantry_core::vocabulary::REFERENCE_VOCABULARY;
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn catalog_of(size: usize) -> Vec<Recipe> {
    let base = dataset::builtin();
    (0..size)
        .map(|i| Recipe {
            id: RecordId::new(i.to_string()),
            ..base[i % base.len()].clone()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn filter_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let unfiltered = FilterCriteria::default();

    for size in SIZES {
        let records = catalog_of(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("unfiltered", size), &records, |b, records| {
            b.iter(|| filter(black_box(records), black_box(&unfiltered)))
        });

        // "chicken" hits five of every twelve records across several fields.
        let ranked = FilterCriteria::default().with_search("chicken");
        group.bench_with_input(BenchmarkId::new("ranked", size), &records, |b, records| {
            b.iter(|| filter(black_box(records), black_box(&ranked)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Suggest
// ---------------------------------------------------------------------------

fn suggest_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    let records = catalog_of(10_000);

    for query in ["ch", "curry", "biryanis"] {
        group.bench_with_input(BenchmarkId::new("10k", query), &query, |b, query| {
            b.iter(|| suggest(black_box(query), black_box(&records), REFERENCE_VOCABULARY))
        });
    }

    group.finish();
}

criterion_group!(benches, filter_bench, suggest_bench);
criterion_main!(benches);
