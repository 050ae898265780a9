//! Heritage CLI - exhibit catalogue ETL and reporting.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Ingest { input, output } => commands::ingest::run(input, output, cli.verbose),

        Commands::Etl {
            input,
            output,
            limit,
        } => commands::etl::run(input, output, limit, cli.verbose),

        Commands::Analytics {
            input,
            outdir,
            top,
            format,
        } => commands::analytics::run(input, outdir, top, format, cli.verbose),

        Commands::Figures {
            input,
            outdir,
            top,
            orientation,
            format,
        } => commands::figures::run(input, outdir, top, orientation, format, cli.verbose),

        Commands::Summary { input, top, json } => {
            commands::summary::run(input, top, json, cli.verbose)
        }

        Commands::Benchmark {
            input,
            outdir,
            limits,
            group_by,
            format,
        } => commands::benchmark::run(input, outdir, limits, group_by, format, cli.verbose),

        Commands::Inspect { input, head, json } => {
            commands::inspect::run(input, head, json, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
