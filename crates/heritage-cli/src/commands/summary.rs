//! Summary command - quick look at the curated table.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{Aggregation, Session, summarize};

use super::curated_input;

fn print_ranking(title: &str, ranking: Option<&Aggregation>) {
    println!("{}", title.yellow().bold());
    match ranking {
        None => println!("  {}", "column not present".dimmed()),
        Some(agg) if agg.is_empty() => println!("  {}", "no values".dimmed()),
        Some(agg) => {
            for entry in &agg.entries {
                println!("  {:>8}  {}", entry.count.to_string().white().bold(), entry.category);
            }
        }
    }
    println!();
}

pub fn run(
    input: PathBuf,
    top: usize,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = curated_input(&input)?;
    let session = Session::new();
    let curated = session.read(&input)?;
    let summary = summarize(&curated, top)?;
    session.finish();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary of".cyan().bold(),
        input.display().to_string().white()
    );
    println!("Rows: {}", summary.rows.to_string().white().bold());
    println!();
    print_ranking(&format!("Top {} museums", top), summary.museums.as_ref());
    print_ranking(&format!("Top {} periods", top), summary.periods.as_ref());
    print_ranking(&format!("Top {} typologies", top), summary.typologies.as_ref());
    Ok(())
}
