//! The session: an explicit handle for every read the pipeline performs.

use std::cell::Cell;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{HeritageError, Result};
use crate::input::reader::{ParquetScan, ReaderConfig, build_reader, open_builder};
use crate::input::{ColumnDescription, Relation, SourceMetadata};

/// Configuration for a pipeline session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub reader: ReaderConfig,
}

impl SessionConfig {
    /// Set the number of rows per record batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.reader.batch_size = batch_size.max(1);
        self
    }
}

/// Counters accumulated over the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub files_opened: u64,
    pub batches_read: u64,
    pub rows_scanned: u64,
}

/// A single pipeline run's access point to columnar files.
///
/// Every operation takes the session by reference; there is no global
/// engine state. Call [`Session::finish`] when the run is over.
///
/// # Example
///
/// ```no_run
/// use heritage::Session;
///
/// let session = Session::new();
/// let relation = session.read_columns("curated.parquet", &["museum_name"]).unwrap();
/// println!("rows: {}", relation.num_rows());
/// session.finish();
/// ```
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    stats: Cell<SessionStats>,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            stats: Cell::new(SessionStats::default()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats.get()
    }

    /// Arrow schema of a Parquet file, read from its footer only.
    pub fn schema(&self, path: impl AsRef<Path>) -> Result<SchemaRef> {
        let builder = open_builder(path.as_ref())?;
        Ok(builder.schema().clone())
    }

    /// Open a streaming scan over every column.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<ParquetScan<'_>> {
        self.scan(path.as_ref(), None)
    }

    /// Open a streaming scan restricted to the named root columns.
    pub fn open_columns(&self, path: impl AsRef<Path>, columns: &[&str]) -> Result<ParquetScan<'_>> {
        self.scan(path.as_ref(), Some(columns))
    }

    /// Read a whole file into memory.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Relation> {
        collect(self.open(path)?)
    }

    /// Read only the named root columns of a file into memory.
    pub fn read_columns(&self, path: impl AsRef<Path>, columns: &[&str]) -> Result<Relation> {
        collect(self.open_columns(path, columns)?)
    }

    /// The first `n` rows of a file, reading no more batches than needed.
    pub fn head(&self, path: impl AsRef<Path>, n: usize) -> Result<Relation> {
        let mut scan = self.open(path)?;
        let schema = scan.schema().clone();
        let mut batches = Vec::new();
        let mut rows = 0usize;
        while rows < n {
            let Some(batch) = scan.next() else { break };
            let batch = batch?;
            rows += batch.num_rows();
            batches.push(batch);
        }
        Ok(Relation::new(schema, batches).head(n))
    }

    /// Total row count from the file footer, without scanning data pages.
    pub fn row_count(&self, path: impl AsRef<Path>) -> Result<u64> {
        let builder = open_builder(path.as_ref())?;
        let rows = builder.metadata().file_metadata().num_rows();
        u64::try_from(rows).map_err(|_| {
            HeritageError::Config(format!("negative row count {} in footer", rows))
        })
    }

    /// Name, type and nullability of every top-level column.
    pub fn describe(&self, path: impl AsRef<Path>) -> Result<Vec<ColumnDescription>> {
        let schema = self.schema(path)?;
        Ok(schema
            .fields()
            .iter()
            .map(|f| ColumnDescription {
                name: f.name().clone(),
                data_type: f.data_type().to_string(),
                nullable: f.is_nullable(),
            })
            .collect())
    }

    /// File-level metadata: size, rows, columns and row groups.
    pub fn metadata(&self, path: impl AsRef<Path>) -> Result<SourceMetadata> {
        let path = path.as_ref();
        let builder = open_builder(path)?;
        let size_bytes = std::fs::metadata(path)
            .map_err(|e| HeritageError::io(path, e))?
            .len();
        let parquet_meta = builder.metadata();
        let rows = parquet_meta.file_metadata().num_rows().max(0) as u64;

        Ok(SourceMetadata::new(
            path.to_path_buf(),
            size_bytes,
            rows,
            builder.schema().fields().len(),
            parquet_meta.num_row_groups(),
        ))
    }

    /// End the session, logging and returning its counters.
    pub fn finish(self) -> SessionStats {
        let stats = self.stats.get();
        info!(
            "session finished: {} files opened, {} batches, {} rows scanned",
            stats.files_opened, stats.batches_read, stats.rows_scanned
        );
        stats
    }

    fn scan(&self, path: &Path, columns: Option<&[&str]>) -> Result<ParquetScan<'_>> {
        let reader = build_reader(path, columns, &self.config.reader)?;
        self.record(|s| s.files_opened += 1);

        Ok(ParquetScan::new(
            reader,
            Box::new(move |batch: &RecordBatch| {
                let rows = batch.num_rows() as u64;
                self.record(|s| {
                    s.batches_read += 1;
                    s.rows_scanned += rows;
                });
            }),
        ))
    }

    fn record(&self, update: impl FnOnce(&mut SessionStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

fn collect(scan: ParquetScan<'_>) -> Result<Relation> {
    let schema = scan.schema().clone();
    let batches = scan.collect::<Result<Vec<_>>>()?;
    Ok(Relation::new(schema, batches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, rows: i64) -> std::path::PathBuf {
        let path = dir.path().join("fixture.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        let ids: ArrayRef = Arc::new(Int64Array::from_iter_values(0..rows));
        let names: ArrayRef = Arc::new(StringArray::from_iter_values(
            (0..rows).map(|i| format!("object {}", i)),
        ));
        let batch = RecordBatch::try_new(schema.clone(), vec![ids, names]).unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn test_read_with_projection() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, 10);

        let session = Session::new();
        let relation = session.read_columns(&path, &["name"]).unwrap();
        assert_eq!(relation.num_rows(), 10);
        assert_eq!(relation.column_names(), vec!["name"]);
    }

    #[test]
    fn test_projection_of_unknown_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, 3);

        let session = Session::new();
        let err = session.read_columns(&path, &["museum"]).unwrap_err();
        assert!(matches!(err, HeritageError::MissingColumn { .. }));
    }

    #[test]
    fn test_missing_source() {
        let session = Session::new();
        let err = session.read("does/not/exist.parquet").unwrap_err();
        assert!(matches!(err, HeritageError::SourceNotFound { .. }));
    }

    #[test]
    fn test_stats_track_batches() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, 25);

        let session = Session::with_config(SessionConfig::default().with_batch_size(10));
        let relation = session.read(&path).unwrap();
        assert_eq!(relation.batches().len(), 3);

        let stats = session.finish();
        assert_eq!(stats.files_opened, 1);
        assert_eq!(stats.batches_read, 3);
        assert_eq!(stats.rows_scanned, 25);
    }

    #[test]
    fn test_head_reads_only_needed_batches() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, 25);

        let session = Session::with_config(SessionConfig::default().with_batch_size(10));
        let head = session.head(&path, 12).unwrap();
        assert_eq!(head.num_rows(), 12);
        assert_eq!(session.stats().batches_read, 2);
        assert_eq!(session.head(&path, 0).unwrap().num_rows(), 0);
    }

    #[test]
    fn test_metadata_and_describe() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, 7);

        let session = Session::new();
        assert_eq!(session.row_count(&path).unwrap(), 7);

        let meta = session.metadata(&path).unwrap();
        assert_eq!(meta.file, "fixture.parquet");
        assert_eq!(meta.row_count, 7);
        assert_eq!(meta.column_count, 2);
        assert!(meta.size_bytes > 0);

        let columns = session.describe(&path).unwrap();
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].data_type, "Int64");
        assert!(!columns[0].nullable);
        assert_eq!(columns[1].data_type, "Utf8");
    }
}
