//! CLI command implementations.

pub mod analytics;
pub mod benchmark;
pub mod etl;
pub mod figures;
pub mod ingest;
pub mod inspect;
pub mod summary;

use std::path::{Path, PathBuf};

use colored::Colorize;
use heritage::{CURATED_FILE_NAME, ReportOutcome, SessionStats, resolve_input};

/// Resolve a curated-table argument that may be a directory.
pub(crate) fn curated_input(input: &Path) -> heritage::Result<PathBuf> {
    resolve_input(input, CURATED_FILE_NAME)
}

/// Print every artifact of a report run, then what was skipped.
pub(crate) fn print_outcome(outcome: &ReportOutcome) {
    for artifact in &outcome.artifacts {
        println!(
            "  {} {} ({} bytes)",
            "saved".green(),
            artifact.path.display(),
            artifact.bytes
        );
    }
    for skipped in &outcome.skipped {
        println!("  {} {}", "skipped".yellow(), skipped);
    }
}

pub(crate) fn print_stats(stats: SessionStats) {
    println!(
        "{}",
        format!(
            "{} file(s) opened, {} batches, {} rows scanned",
            stats.files_opened, stats.batches_read, stats.rows_scanned
        )
        .dimmed()
    );
}
