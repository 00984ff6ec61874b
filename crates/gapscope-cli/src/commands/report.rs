//! Report command - scores, trends and content for one country and year.

use std::path::{Path, PathBuf};

use colored::Colorize;
use gapscope::{EntityReport, PeriodOrder, SeverityTier, Trend};

pub struct ReportArgs {
    pub file: PathBuf,
    pub entity: String,
    pub year: Option<i32>,
    pub meta: Option<PathBuf>,
    pub seed: Option<u64>,
    pub draws: usize,
    pub json: bool,
}

pub fn run(args: ReportArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, snapshot) = super::load(super::engine(config)?, &args.file)?;
    let engine = handle.engine();
    let catalog = super::catalog(args.meta.as_deref())?;

    let code = catalog
        .as_ref()
        .and_then(|c| c.get(&args.entity))
        .map(|m| m.iso3.as_str())
        .unwrap_or(args.entity.as_str());
    let entity = snapshot
        .index
        .resolve_entity(code)
        .unwrap_or(code.trim())
        .to_string();

    let year = match args.year {
        Some(year) => year,
        None => engine
            .years(&snapshot, &entity, PeriodOrder::Descending)
            .first()
            .copied()
            .ok_or_else(|| format!("No finalized years for '{}'", entity))?,
    };

    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let mut reports = Vec::with_capacity(args.draws.max(1));
    for _ in 0..args.draws.max(1) {
        let report = engine
            .report(&snapshot, catalog.as_ref(), &entity, year, &mut rng)
            .ok_or_else(|| format!("No data for '{}' in {}", entity, year))?;
        reports.push(report);
    }

    if args.json {
        if reports.len() == 1 {
            println!("{}", serde_json::to_string_pretty(&reports[0])?);
        } else {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        return Ok(());
    }

    print_scores(&reports[0]);
    for (i, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            println!("{}", format!("Draw {}", i + 1).dimmed());
        }
        print_content(report);
    }

    Ok(())
}

fn print_scores(report: &EntityReport) {
    let region = report
        .region
        .as_deref()
        .map(|r| format!(" ({})", r))
        .unwrap_or_default();
    println!(
        "{} {}{} {}",
        report.name.cyan().bold(),
        report.entity.dimmed(),
        region.dimmed(),
        report.period.to_string().white().bold()
    );
    println!();

    println!("{}", "Scores:".yellow().bold());
    for reading in &report.metrics {
        let value = match reading.value {
            Some(v) => format!("{:.1}", v),
            None => "-".to_string(),
        };
        let filled = if reading.imputed {
            match reading.raw {
                Some(raw) => format!(" (filled, source {:.1})", raw).dimmed().to_string(),
                None => " (filled)".dimmed().to_string(),
            }
        } else {
            String::new()
        };
        println!(
            "  {:<10} {} {}{}",
            reading.metric.label(),
            format!("{:>6}", value).white(),
            trend_arrow(reading.trend),
            filled
        );
    }
    println!();

    if let (Some(category), Some(score)) = (report.worst_category, report.worst_score) {
        println!(
            "Weakest category: {} ({:.1})",
            category.label().white().bold(),
            score
        );
    }
}

fn print_content(report: &EntityReport) {
    if let Some(severity) = report.recommendation_severity {
        println!("{} {}", "Recommendations:".yellow().bold(), severity_label(severity));
        for text in &report.recommendations {
            println!("  • {}", text);
        }
    }
    if let Some(severity) = report.action_severity {
        println!("{} {}", "What you can do:".yellow().bold(), severity_label(severity));
        for text in &report.actions {
            println!("  • {}", text);
        }
    }
    println!();
}

fn trend_arrow(trend: Trend) -> String {
    match trend {
        Trend::Improved => trend.arrow().green().to_string(),
        Trend::Worsened => trend.arrow().red().to_string(),
        Trend::Unchanged => trend.arrow().dimmed().to_string(),
    }
}

fn severity_label(severity: SeverityTier) -> String {
    let label = format!("[{}]", severity.label());
    match severity {
        SeverityTier::High => label.red().to_string(),
        SeverityTier::Middle => label.yellow().to_string(),
        SeverityTier::Low => label.green().to_string(),
    }
}
