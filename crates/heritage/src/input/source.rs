//! Source metadata and the in-memory relation type.

use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HeritageError, Result};

use super::path::FieldPath;

/// Metadata about a Parquet file, read from its footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of rows recorded in the footer.
    pub row_count: u64,
    /// Number of top-level columns.
    pub column_count: usize,
    /// Number of row groups.
    pub row_groups: usize,
    /// When the metadata was read.
    pub inspected_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been inspected.
    pub fn new(
        path: PathBuf,
        size_bytes: u64,
        row_count: u64,
        column_count: usize,
        row_groups: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            size_bytes,
            row_count,
            column_count,
            row_groups,
            inspected_at: Utc::now(),
        }
    }
}

/// Description of one top-level column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    /// Arrow data type, rendered for display.
    pub data_type: String,
    pub nullable: bool,
}

/// A fully materialized table: a schema and the record batches that share it.
#[derive(Debug, Clone)]
pub struct Relation {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Relation {
    /// Create a relation from batches that all carry `schema`.
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// A relation with no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self::new(schema, Vec::new())
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<RecordBatch> {
        self.batches
    }

    /// Total number of rows across all batches.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Get all top-level column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Whether the addressed field exists in this relation.
    pub fn has_column(&self, path: &FieldPath) -> bool {
        path.try_resolve(&self.schema).is_some()
    }

    /// Visit every value of a column as text, in enumeration order.
    pub fn for_each_text<F>(&self, path: &FieldPath, mut visit: F) -> Result<()>
    where
        F: FnMut(Option<&str>),
    {
        let locator = path.resolve(&self.schema)?;
        for batch in &self.batches {
            let values = locator.extract_text(batch)?;
            for value in values.iter() {
                visit(value);
            }
        }
        Ok(())
    }

    /// The first `n` rows, in enumeration order.
    pub fn head(&self, n: usize) -> Relation {
        let mut remaining = n;
        let mut batches = Vec::new();
        for batch in &self.batches {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(batch.num_rows());
            batches.push(batch.slice(0, take));
            remaining -= take;
        }
        Relation::new(self.schema.clone(), batches)
    }

    /// Render all rows as an ASCII table.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(pretty_format_batches(&self.batches)?.to_string())
    }

    /// Count null entries of a column.
    pub fn null_count(&self, path: &FieldPath) -> Result<usize> {
        let locator = path.resolve(&self.schema)?;
        let mut nulls = 0;
        for batch in &self.batches {
            nulls += locator.extract(batch)?.null_count();
        }
        Ok(nulls)
    }
}

/// Resolve an input argument that may name a file or a directory.
///
/// A directory resolves to `default_file` inside it. Either way the result
/// must exist.
pub fn resolve_input(input: &Path, default_file: &str) -> Result<PathBuf> {
    let candidate = if input.is_dir() {
        input.join(default_file)
    } else {
        input.to_path_buf()
    };

    if !candidate.exists() {
        return Err(HeritageError::SourceNotFound { path: candidate });
    }
    Ok(candidate)
}
