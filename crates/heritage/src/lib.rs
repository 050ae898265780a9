//! Heritage: ETL and reporting pipeline for museum-exhibit catalogues.
//!
//! A raw Parquet export is checked and marked ready (`ingest`), filtered
//! and flattened into a curated Parquet table (`curation`), and summarized
//! into CSV tables and charts (`aggregate`, `report`). A timing harness
//! measures how the pipeline scales with row count (`benchmark`).
//!
//! Every read goes through an explicit [`Session`]; there is no global
//! engine state.
//!
//! # Example
//!
//! ```no_run
//! use heritage::{CuratedWriter, Curator, FieldPath, Session, curate_to_file, top_n};
//!
//! let session = Session::new();
//! let outcome = curate_to_file(
//!     &session,
//!     &Curator::new().with_limit(200_000),
//!     &CuratedWriter::new(),
//!     "data/raw/data.parquet",
//!     "data/output/curated_parquet/curated.parquet",
//! )
//! .unwrap();
//! println!("curated rows: {}", outcome.written.rows);
//!
//! let curated = session.read(&outcome.written.path).unwrap();
//! let museums = top_n(&curated, &FieldPath::from("museum_name"), 10).unwrap();
//! println!("top museum: {:?}", museums.entries.first());
//! session.finish();
//! ```

pub mod aggregate;
pub mod benchmark;
pub mod curation;
pub mod error;
pub mod ingest;
pub mod input;
pub mod report;
pub mod schema;

mod artifact;
mod session;

pub use aggregate::{
    Aggregation, CategoryCount, CollectionSummary, MissingSummary, RowSummary, missing_fraction,
    summarize, text_lengths, top_n, total_rows,
};
pub use artifact::verify_written;
pub use benchmark::{BenchmarkConfig, BenchmarkHarness, BenchmarkRow, parse_limits};
pub use curation::{
    CURATED_FILE_NAME, CuratedWriter, CurationConfig, CurationOutcome, Curator, WriteSummary,
    WriterConfig, curate_to_file,
};
pub use error::{HeritageError, Result};
pub use ingest::{IngestMarker, human_size, ingest};
pub use input::{ColumnDescription, FieldPath, Relation, SourceMetadata, resolve_input};
pub use report::{ChartFormat, Orientation, ReportConfig, ReportMaterializer, ReportOutcome};
pub use session::{Session, SessionConfig, SessionStats};
