//! Benchmark command - time the pipeline at several row limits.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{BenchmarkConfig, BenchmarkHarness, ChartFormat, Session, parse_limits};

use super::print_outcome;

pub fn run(
    input: PathBuf,
    outdir: PathBuf,
    limits: String,
    group_by: String,
    format: ChartFormat,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limits = parse_limits(&limits)?;
    if limits.is_empty() {
        return Err("no limits given; pass e.g. --limits 50000,100000".into());
    }

    println!(
        "{} {}",
        "Benchmarking".cyan().bold(),
        input.display().to_string().white()
    );

    let harness = BenchmarkHarness::with_config(BenchmarkConfig { limits, group_by });
    let session = Session::new();
    let rows = harness.run(&session, &input)?;

    println!(
        "  {:>10} {:>10} {:>10} {:>10} {:>10}",
        "limit", "rows", "count_s", "agg_s", "total_s"
    );
    for row in &rows {
        println!(
            "  {:>10} {:>10} {:>10.3} {:>10.3} {:>10}",
            row.limit,
            row.rows,
            row.time_count_s,
            row.time_agg_s,
            format!("{:.3}", row.time_total_s).white().bold()
        );
    }

    let outcome = harness.write(&rows, &outdir, format)?;
    print_outcome(&outcome);
    session.finish();
    Ok(())
}
