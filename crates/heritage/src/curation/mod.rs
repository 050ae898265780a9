//! Curation: filter and flatten the raw source, then persist the curated table.

mod filter;
mod writer;

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{HeritageError, Result};
use crate::session::Session;

pub use filter::{CurationConfig, Curator, is_qualifying_name};
pub use writer::{CuratedWriter, WriteSummary, WriterConfig};

/// File name of the curated table inside an output directory.
pub const CURATED_FILE_NAME: &str = "curated.parquet";

/// Result of a full curation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationOutcome {
    pub source: PathBuf,
    /// Qualifying rows counted before writing (capped at the limit).
    pub qualifying_rows: usize,
    pub written: WriteSummary,
}

/// Count, filter, project and write the curated table in one step.
///
/// Refuses to write anything when no row qualifies.
pub fn curate_to_file(
    session: &Session,
    curator: &Curator,
    writer: &CuratedWriter,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CurationOutcome> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(HeritageError::SourceNotFound {
            path: input.to_path_buf(),
        });
    }

    let qualifying_rows = curator.count_qualifying(session, input)?;
    info!("{} rows qualify after basic cleaning", qualifying_rows);
    if qualifying_rows == 0 {
        return Err(HeritageError::EmptyResult(
            "filtering produced 0 rows; check data quality and filter conditions".to_string(),
        ));
    }

    let curated = curator.curate(session, input)?;
    let written = writer.write(&curated, output)?;

    Ok(CurationOutcome {
        source: input.to_path_buf(),
        qualifying_rows,
        written,
    })
}
