//! Fuzz target for the full load pipeline with structured score tables.

#![no_main]

use arbitrary::Arbitrary;
use gapscope::{DuplicatePolicy, Gapscope, GapscopeConfig, PeriodOrder};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct ScoreRow {
    entity: u8,
    period: i16,
    econ: Option<i16>,
    social: Option<i16>,
    physical: Option<i16>,
}

fuzz_target!(|rows: Vec<ScoreRow>| {
    let mut text = String::from("country code,year,econ score,social score,physical score\n");
    for row in &rows {
        let cell = |v: Option<i16>| v.map(|v| (v as f64 / 10.0).to_string()).unwrap_or_default();
        text.push_str(&format!(
            "E{},{},{},{},{}\n",
            row.entity % 8,
            row.period,
            cell(row.econ),
            cell(row.social),
            cell(row.physical)
        ));
    }

    let gapscope = Gapscope::with_config(GapscopeConfig {
        duplicates: DuplicatePolicy::KeepFirst,
        ..GapscopeConfig::default()
    });
    let snapshot = gapscope
        .build_snapshot("fuzz.csv", None, &text)
        .expect("keep_first never rejects");

    let mut rng = fastrand::Rng::with_seed(0);
    for entity in snapshot.index.entities() {
        for period in gapscope.years(&snapshot, entity, PeriodOrder::Ascending) {
            let report = gapscope.report(&snapshot, None, entity, period, &mut rng);
            assert!(report.is_some());
        }
    }
});
