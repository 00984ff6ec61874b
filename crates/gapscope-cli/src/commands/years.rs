//! Years command - finalized years available for a country.

use std::path::{Path, PathBuf};

use colored::Colorize;
use gapscope::PeriodOrder;

use crate::cli::OrderChoice;

pub fn run(
    file: PathBuf,
    entity: String,
    order: OrderChoice,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, snapshot) = super::load(super::engine(config)?, &file)?;
    let entity = snapshot
        .index
        .resolve_entity(&entity)
        .unwrap_or(entity.trim())
        .to_string();
    let order = match order {
        OrderChoice::Asc => PeriodOrder::Ascending,
        OrderChoice::Desc => PeriodOrder::Descending,
    };

    let years = handle.engine().years(&snapshot, &entity, order);

    if json_output {
        let out = serde_json::json!({
            "entity": entity,
            "finalized_through": handle.engine().config().finalized_through,
            "years": years,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if years.is_empty() {
        println!("{} {}", "No finalized years for".yellow(), entity.white().bold());
        return Ok(());
    }

    let list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    println!("{} {}", entity.cyan().bold(), list.join(", "));
    Ok(())
}
