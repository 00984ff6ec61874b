//! Content selection benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gapscope::content::{CategoryScores, ContentEntry, SelectionConfig, builtin, select, select_for_scores};
use gapscope::{Category, ContentBank, Gapscope, SeverityTier};

fn bank_of(size: usize) -> ContentBank {
    let entries = (0..size)
        .map(|i| ContentEntry {
            id: format!("entry_{}", i),
            category: Some(Category::PRECEDENCE[i % 3]),
            severity: SeverityTier::ALL[i % 3],
            tag: None,
            text: format!("Selectable text number {}", i),
        })
        .collect();
    ContentBank::new("bench", entries).unwrap()
}

/// Benchmark a single draw against growing banks.
fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for size in [27, 270, 2_700].iter() {
        let bank = bank_of(*size);
        group.bench_with_input(BenchmarkId::new("bank_size", size), &bank, |b, bank| {
            let mut rng = fastrand::Rng::with_seed(42);
            b.iter(|| black_box(select(bank, Category::Social, SeverityTier::Middle, 2, &mut rng)))
        });
    }

    group.finish();
}

/// Benchmark worst-category selection with the built-in banks.
fn bench_select_for_scores(c: &mut Criterion) {
    let scores = CategoryScores::new(48.0, 62.5, 71.0);
    let config = SelectionConfig::recommendations();

    c.bench_function("select_for_scores", |b| {
        let mut rng = fastrand::Rng::with_seed(7);
        b.iter(|| black_box(select_for_scores(builtin::recommendations(), &config, &scores, &mut rng)))
    });
}

/// Benchmark a full entity report.
fn bench_report(c: &mut Criterion) {
    let gapscope = Gapscope::new();
    let snapshot = gapscope
        .build_snapshot(
            "bench.csv",
            None,
            "country,year,econ score,social score,physical score,total score\n\
             FRA,2020,55,70,80,68\n\
             FRA,2021,58,69,81,70\n",
        )
        .unwrap();

    c.bench_function("report", |b| {
        let mut rng = fastrand::Rng::with_seed(9);
        b.iter(|| black_box(gapscope.report(&snapshot, None, "FRA", 2021, &mut rng)))
    });
}

criterion_group!(benches, bench_select, bench_select_for_scores, bench_report);
criterion_main!(benches);
