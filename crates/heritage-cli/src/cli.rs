//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use heritage::benchmark::DEFAULT_LIMITS;
use heritage::ingest::DEFAULT_RAW_DIR;
use heritage::{ChartFormat, Orientation};

/// Heritage: ETL and reporting for museum-exhibit catalogues
#[derive(Parser)]
#[command(name = "heritage")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the raw source and write a _SUCCESS marker into the raw layer
    Ingest {
        /// Path to the raw Parquet export
        #[arg(short, long)]
        input: PathBuf,

        /// Raw-layer directory for the marker file
        #[arg(short, long, default_value = DEFAULT_RAW_DIR)]
        output: PathBuf,
    },

    /// Filter and flatten the raw export into <output>/curated.parquet
    Etl {
        /// Path to the raw Parquet export
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the curated table
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum rows to keep (0 = all)
        #[arg(short, long, default_value = "200000")]
        limit: usize,
    },

    /// Write summary and top-N CSV reports with charts
    Analytics {
        /// Curated Parquet file, or the directory holding curated.parquet
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for CSV and chart output
        #[arg(long)]
        outdir: PathBuf,

        /// Entries per ranked table
        #[arg(long, default_value = "20")]
        top: usize,

        /// Chart image format (png, svg)
        #[arg(long, default_value = "png")]
        format: ChartFormat,
    },

    /// Render the numbered figure series
    Figures {
        /// Curated Parquet file, or the directory holding curated.parquet
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for images
        #[arg(long, default_value = "reports/figures")]
        outdir: PathBuf,

        /// Entries per ranked chart
        #[arg(long, default_value = "12")]
        top: usize,

        /// Bar direction (horizontal, vertical, auto)
        #[arg(long, default_value = "horizontal")]
        orientation: Orientation,

        /// Chart image format (png, svg)
        #[arg(long, default_value = "png")]
        format: ChartFormat,
    },

    /// Print row count and the leading museums, periods and typologies
    Summary {
        /// Curated Parquet file, or the directory holding curated.parquet
        #[arg(short, long)]
        input: PathBuf,

        /// Entries per ranking
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Time curation and aggregation at several row limits
    Benchmark {
        /// Path to the raw Parquet export
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for benchmark.csv and the chart
        #[arg(long)]
        outdir: PathBuf,

        /// Comma-separated row limits (0 = all rows)
        #[arg(long, default_value = DEFAULT_LIMITS)]
        limits: String,

        /// Column grouped in the aggregation step (dotted for struct fields)
        #[arg(long, default_value = "museum_name")]
        group_by: String,

        /// Chart image format (png, svg)
        #[arg(long, default_value = "png")]
        format: ChartFormat,
    },

    /// Show schema, row count and optionally the first rows of a Parquet file
    Inspect {
        /// Parquet file, or the directory holding curated.parquet
        #[arg(short, long)]
        input: PathBuf,

        /// Print the first N rows as a table
        #[arg(long, value_name = "N")]
        head: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
