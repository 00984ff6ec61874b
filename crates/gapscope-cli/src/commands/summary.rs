//! Summary command - what a load kept, dropped and filled.

use std::path::{Path, PathBuf};

use colored::Colorize;
use gapscope::{CountryCatalog, DatasetSnapshot, Metric};
use serde::Serialize;

#[derive(Serialize)]
struct RegionCoverage<'a> {
    region: &'a str,
    countries: usize,
    with_data: usize,
}

fn coverage<'a>(catalog: &'a CountryCatalog, snapshot: &DatasetSnapshot) -> Vec<RegionCoverage<'a>> {
    catalog
        .by_region()
        .into_iter()
        .map(|(region, countries)| RegionCoverage {
            region,
            countries: countries.len(),
            with_data: countries
                .iter()
                .filter(|c| snapshot.index.contains_entity(&c.iso3))
                .count(),
        })
        .collect()
}

pub fn run(
    file: PathBuf,
    meta: Option<PathBuf>,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_handle, snapshot) = super::load(super::engine(config)?, &file)?;
    let catalog = super::catalog(meta.as_deref())?;
    let periods = snapshot.index.all_periods();
    let regions = catalog.as_ref().map(|c| coverage(c, &snapshot));

    if json_output {
        let out = serde_json::json!({
            "source": snapshot.source,
            "report": snapshot.report,
            "periods": periods,
            "regions": regions,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let report = &snapshot.report;
    println!(
        "{} {} {}",
        "Loaded".cyan().bold(),
        snapshot.source.file.white(),
        format!("({}, {})", snapshot.source.format, snapshot.source.hash).dimmed()
    );
    println!();

    println!("{}", "Rows:".yellow().bold());
    println!("  Records:          {}", report.records.to_string().white());
    println!("  Indexed:          {}", report.rows_indexed.to_string().green());
    println!("  Missing country:  {}", report.dropped_missing_entity.to_string().red());
    println!("  Unusable year:    {}", report.dropped_bad_period.to_string().red());
    if report.duplicates_dropped > 0 {
        println!("  Duplicates:       {}", report.duplicates_dropped.to_string().red());
    }
    println!();

    println!("{}", "Filled cells:".yellow().bold());
    for metric in Metric::ALL {
        println!("  {:<10} {}", metric.label(), report.imputed.filled(metric));
    }
    println!();

    if !report.unresolved_columns.is_empty() {
        println!(
            "{} {}",
            "Columns not found:".yellow().bold(),
            report.unresolved_columns.join(", ")
        );
        println!();
    }

    println!("Countries: {}", report.entities.to_string().white().bold());
    match (periods.first(), periods.last()) {
        (Some(first), Some(last)) => println!("Years:     {}-{} ({} distinct)", first, last, periods.len()),
        _ => println!("Years:     none"),
    }

    if let Some(regions) = regions {
        println!();
        println!("{}", "Coverage by region:".yellow().bold());
        for r in regions {
            println!("  {:<20} {}/{}", r.region, r.with_data, r.countries);
        }
    }

    Ok(())
}
