//! Inspect command - schema, row count and a preview of a Parquet file.

use std::path::PathBuf;

use colored::Colorize;
use heritage::{CURATED_FILE_NAME, Session, human_size, resolve_input};

pub fn run(
    input: PathBuf,
    head: Option<usize>,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = resolve_input(&input, CURATED_FILE_NAME)?;
    let session = Session::new();
    let metadata = session.metadata(&input)?;
    let columns = session.describe(&input)?;

    if json_output {
        let report = serde_json::json!({
            "source": metadata,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        metadata.path.display().to_string().white()
    );
    println!(
        "Rows: {}   Columns: {}   Row groups: {}   Size: {}",
        metadata.row_count.to_string().white().bold(),
        metadata.column_count,
        metadata.row_groups,
        human_size(metadata.size_bytes)
    );
    println!();

    println!("{}", "Schema:".yellow().bold());
    for column in &columns {
        let nullable = if column.nullable { "nullable" } else { "required" };
        println!("  {:24} {:40} {}", column.name, column.data_type, nullable.dimmed());
    }

    if let Some(n) = head {
        let preview = session.head(&input, n)?;
        println!();
        println!("{}", format!("First {} rows:", preview.num_rows()).yellow().bold());
        println!("{}", preview.to_pretty_string()?);
    }
    session.finish();
    Ok(())
}
