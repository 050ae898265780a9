//! ETL command - curate the raw export into a flat Parquet table.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{CURATED_FILE_NAME, CuratedWriter, Curator, Session, curate_to_file, human_size};

use super::print_stats;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    limit: usize,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = output.join(CURATED_FILE_NAME);
    println!("{} {}", "Curating".cyan().bold(), input.display().to_string().white());
    println!("  {} {}", "output:".dimmed(), target.display());
    if limit > 0 {
        println!("  {} {}", "limit:".dimmed(), limit);
    } else {
        println!("  {} {}", "limit:".dimmed(), "none");
    }

    let session = Session::new();
    let outcome = curate_to_file(
        &session,
        &Curator::new().with_limit(limit),
        &CuratedWriter::new(),
        &input,
        &target,
    )?;

    println!(
        "Rows after cleaning: {}",
        outcome.qualifying_rows.to_string().white().bold()
    );
    println!(
        "{} {} ({} rows, {})",
        "Curated table written:".green(),
        outcome.written.path.display(),
        outcome.written.rows,
        human_size(outcome.written.bytes)
    );

    let stats = session.finish();
    if verbose {
        print_stats(stats);
    }
    Ok(())
}
