//! Ingest command - verify the raw source and mark it ready.

use std::path::PathBuf;

use colored::Colorize;
use heritage::human_size;

pub fn run(input: PathBuf, output: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "Checking source".cyan().bold(), input.display().to_string().white());

    let marker = heritage::ingest(&input, &output)?;

    println!(
        "Source found. Size: {}",
        human_size(marker.size_bytes).white().bold()
    );
    if verbose {
        println!("  {} {}", "hash".dimmed(), marker.content_hash);
    }
    println!("{} {}", "Marker written:".green(), marker.marker.display());
    Ok(())
}
