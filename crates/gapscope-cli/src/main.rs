//! Gapscope CLI - equality score reports.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Report {
            file,
            entity,
            year,
            meta,
            seed,
            draws,
            json,
        } => commands::report::run(
            commands::report::ReportArgs {
                file,
                entity,
                year,
                meta,
                seed,
                draws,
                json,
            },
            config,
        ),

        Commands::Years {
            file,
            entity,
            order,
            json,
        } => commands::years::run(file, entity, order, json, config),

        Commands::Summary { file, meta, json } => commands::summary::run(file, meta, json, config),

        Commands::Bank { which, json } => commands::bank::run(which, json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gapscope=debug" } else { "gapscope=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
