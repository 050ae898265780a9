//! Figures command - the numbered chart series.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{ChartFormat, Orientation, ReportConfig, ReportMaterializer, Session};

use super::{curated_input, print_outcome};

pub fn run(
    input: PathBuf,
    outdir: PathBuf,
    top: usize,
    orientation: Orientation,
    format: ChartFormat,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = curated_input(&input)?;
    println!(
        "{} {}",
        "Rendering figures from".cyan().bold(),
        input.display().to_string().white()
    );

    let session = Session::new();
    let curated = session.read(&input)?;

    let materializer = ReportMaterializer::with_config(ReportConfig {
        top_n: top,
        format,
        orientation,
        ..ReportConfig::default()
    });
    let outcome = materializer.figures(&curated, &outdir)?;

    print_outcome(&outcome);
    println!(
        "{} images are in {}",
        "Done.".green().bold(),
        outdir.display()
    );
    session.finish();
    Ok(())
}
