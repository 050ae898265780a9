//! Source reading: field addressing, Parquet scans and in-memory relations.

mod path;
pub(crate) mod reader;
mod source;

pub use path::{ColumnLocator, FieldPath};
pub use reader::{ParquetScan, ReaderConfig};
pub use source::{ColumnDescription, Relation, SourceMetadata, resolve_input};
