//! Analytics command - CSV reports and their charts.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{ChartFormat, ReportConfig, ReportMaterializer, Session};

use super::{curated_input, print_outcome, print_stats};

pub fn run(
    input: PathBuf,
    outdir: PathBuf,
    top: usize,
    format: ChartFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = curated_input(&input)?;
    println!("{}", "Building analytics reports".cyan().bold());
    println!("  {} {}", "curated:".dimmed(), input.display());
    println!("  {} {}", "outdir:".dimmed(), outdir.display());

    let session = Session::new();
    let curated = session.read(&input)?;

    let materializer = ReportMaterializer::with_config(ReportConfig {
        top_n: top,
        format,
        ..ReportConfig::default()
    });
    let outcome = materializer.analytics(&curated, &outdir)?;

    print_outcome(&outcome);
    println!(
        "{} {} tables, {} charts",
        "Done:".green().bold(),
        outcome.tables().count(),
        outcome.charts().count()
    );

    let stats = session.finish();
    if verbose {
        print_stats(stats);
    }
    Ok(())
}
