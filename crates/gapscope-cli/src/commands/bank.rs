//! Bank command - list content bank entries.

use std::path::Path;

use colored::Colorize;
use gapscope::ContentBank;

use crate::cli::BankChoice;

pub fn run(which: BankChoice, json_output: bool, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine(config)?;

    let mut banks: Vec<&ContentBank> = Vec::new();
    if which != BankChoice::Actions {
        banks.push(engine.recommendation_bank());
    }
    if which != BankChoice::Recommendations {
        banks.push(engine.action_bank());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&banks)?);
        return Ok(());
    }

    for bank in banks {
        println!(
            "{} {}",
            bank.name().cyan().bold(),
            format!("({} entries)", bank.len()).dimmed()
        );
        for entry in bank.entries() {
            let scope = match (entry.category, entry.tag) {
                (Some(category), _) => category.label().to_string(),
                (None, Some(tag)) => tag.label().to_string(),
                (None, None) => "any".to_string(),
            };
            println!(
                "  {} {:<14} {:<8} {}",
                format!("{:<16}", entry.id).white(),
                scope,
                entry.severity.label(),
                entry.text
            );
        }
        println!();
    }

    Ok(())
}
