//! Property-based tests for the gapscope pipeline.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p gapscope --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p gapscope --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use gapscope::analysis::trend;
use gapscope::content::{ContentEntry, select};
use gapscope::imputation::Imputer;
use gapscope::input::Parser;
use gapscope::{Category, ContentBank, Direction, Gapscope, IndexedDataset, Metric, Row, SeverityTier, Trend};

// =============================================================================
// Test Strategies
// =============================================================================

/// Field text including delimiters, quotes and line breaks.
fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,\"\\n]{1,20}"
}

fn optional_score() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        3 => (0u32..1000).prop_map(|v| Some(v as f64 / 10.0)),
    ]
}

/// Rows for a few entities over a period range, one row per key.
fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (0usize..4, 2000i32..2012, optional_score(), optional_score()),
        0..40,
    )
    .prop_map(|specs| {
        let mut seen = HashSet::new();
        specs
            .into_iter()
            .filter(|(e, p, _, _)| seen.insert((*e, *p)))
            .map(|(e, p, econ, social)| {
                let mut row = Row::new(format!("E{}", e), p);
                if let Some(v) = econ {
                    row = row.with_value(Metric::Econ, v);
                }
                if let Some(v) = social {
                    row = row.with_value(Metric::Social, v);
                }
                row
            })
            .collect()
    })
}

fn sorted(mut rows: Vec<Row>) -> Vec<Row> {
    rows.sort_by(|a, b| (&a.entity, a.period).cmp(&(&b.entity, b.period)));
    rows
}

// =============================================================================
// Parser
// =============================================================================

proptest! {
    /// Quoted fields written by a CSV writer parse back to the same values.
    #[test]
    fn parser_round_trips_quoted_fields(
        records in prop::collection::vec((field(), field()), 1..10)
    ) {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(Vec::new());
        writer.write_record(["left", "right"]).unwrap();
        for (a, b) in &records {
            writer.write_record([a, b]).unwrap();
        }
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut config = gapscope::input::ParserConfig::default();
        config.delimiter = Some(b',');
        let table = Parser::with_config(config).parse_str(&text);

        prop_assert_eq!(table.row_count(), records.len());
        for (row, (a, b)) in table.rows.iter().zip(&records) {
            prop_assert_eq!(&row[0], a);
            prop_assert_eq!(&row[1], b);
        }
    }

    /// The parser never panics, whatever the input.
    #[test]
    fn parser_never_panics(text in "\\PC{0,200}") {
        let _ = Parser::new().parse_str(&text);
    }

    /// Building a snapshot from arbitrary text never panics.
    #[test]
    fn pipeline_never_panics(text in "[a-zA-Z0-9,;\\t\"\\n .-]{0,300}") {
        let engine = Gapscope::with_config(gapscope::GapscopeConfig {
            duplicates: gapscope::DuplicatePolicy::KeepFirst,
            ..Default::default()
        });
        prop_assert!(engine.build_snapshot("fuzz.csv", None, &text).is_ok());
    }
}

// =============================================================================
// Imputation
// =============================================================================

proptest! {
    #[test]
    fn imputation_is_idempotent(rows in rows()) {
        let imputer = Imputer::new();
        let (once, _) = imputer.impute(rows);
        let (twice, stats) = imputer.impute(once.clone());

        prop_assert_eq!(stats.total_filled(), 0);
        prop_assert_eq!(sorted(once), sorted(twice));
    }

    /// Every filled value equals the nearest earlier known value of the same entity.
    #[test]
    fn imputation_fills_from_nearest_earlier_value(rows in rows()) {
        let originals = IndexedDataset::build(rows.clone()).unwrap();
        let (filled, _) = Imputer::new().impute(rows);

        for row in &filled {
            let cell = row.cell(Metric::Econ);
            let earlier = originals
                .periods_for(&row.entity, gapscope::PeriodOrder::Descending, |p| p < row.period)
                .into_iter()
                .find_map(|p| originals.get(&row.entity, p).and_then(|r| r.value(Metric::Econ)));

            match cell.raw {
                Some(raw) => prop_assert_eq!(cell.value, Some(raw)),
                None => {
                    prop_assert_eq!(cell.value, earlier);
                    prop_assert_eq!(cell.imputed, earlier.is_some());
                }
            }
        }
    }

    /// Processing order among entities does not change results.
    #[test]
    fn imputation_ignores_input_order(rows in rows()) {
        let mut reversed = rows.clone();
        reversed.reverse();

        let (a, _) = Imputer::new().impute(rows);
        let (b, _) = Imputer::new().impute(reversed);
        prop_assert_eq!(sorted(a), sorted(b));
    }
}

// =============================================================================
// Index
// =============================================================================

proptest! {
    #[test]
    fn index_returns_every_row(rows in rows()) {
        let (rows, _) = Imputer::new().impute(rows);
        let index = IndexedDataset::build(rows.clone()).unwrap();

        prop_assert_eq!(index.row_count(), rows.len());
        for row in &rows {
            prop_assert_eq!(index.get(&row.entity, row.period), Some(row));
        }
    }
}

// =============================================================================
// Trend
// =============================================================================

proptest! {
    #[test]
    fn trend_is_never_improved_both_ways(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        for direction in [Direction::HigherIsBetter, Direction::CloserToZero] {
            let forward = trend(Some(a), Some(b), &direction);
            let backward = trend(Some(b), Some(a), &direction);
            prop_assert!(!(forward == Trend::Improved && backward == Trend::Improved));
        }
    }

    #[test]
    fn trend_with_absent_value_is_unchanged(a in -100.0f64..100.0) {
        prop_assert_eq!(trend(Some(a), None, &Direction::HigherIsBetter), Trend::Unchanged);
        prop_assert_eq!(trend(None, Some(a), &Direction::HigherIsBetter), Trend::Unchanged);
    }
}

// =============================================================================
// Selection
// =============================================================================

proptest! {
    #[test]
    fn selection_is_bounded_and_distinct(pool in 0usize..8, k in 0usize..12, seed in any::<u64>()) {
        let entries = (0..pool)
            .map(|i| ContentEntry {
                id: format!("e{}", i),
                category: Some(Category::Physical),
                severity: SeverityTier::Low,
                tag: None,
                text: format!("entry {}", i),
            })
            .collect();
        let bank = ContentBank::new("prop", entries).unwrap();
        let mut rng = fastrand::Rng::with_seed(seed);

        let picked = select(&bank, Category::Physical, SeverityTier::Low, k, &mut rng);
        let ids: HashSet<&str> = picked.iter().map(|e| e.id.as_str()).collect();

        prop_assert_eq!(picked.len(), k.min(pool));
        prop_assert_eq!(ids.len(), picked.len());
    }
}
