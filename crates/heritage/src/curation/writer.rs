//! Curated writer: persist a relation as a single Parquet file.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use serde::{Deserialize, Serialize};

use crate::artifact::{ensure_parent_dir, verify_written};
use crate::error::{HeritageError, Result};
use crate::input::Relation;

/// Writer configuration.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// ZSTD compression level.
    pub compression_level: i32,
    /// Maximum rows per row group.
    pub max_row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression_level: 3,
            max_row_group_size: 1_000_000,
        }
    }
}

/// What a completed write produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Writes curated relations to Parquet, replacing any previous file.
#[derive(Debug, Clone, Default)]
pub struct CuratedWriter {
    config: WriterConfig,
}

impl CuratedWriter {
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write every batch of `relation` to `path`.
    ///
    /// Parent directories are created. An existing file is truncated and
    /// replaced. After closing, the file must exist and be non-empty or the
    /// write fails with [`HeritageError::WriteVerification`].
    pub fn write(&self, relation: &Relation, path: impl AsRef<Path>) -> Result<WriteSummary> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let file = File::create(path).map_err(|e| HeritageError::io(path, e))?;
        let mut writer = ArrowWriter::try_new(
            file,
            relation.schema().clone(),
            Some(self.properties()?),
        )?;
        for batch in relation.batches() {
            writer.write(batch)?;
        }
        writer.close()?;

        let bytes = verify_written(path)?;
        info!(
            "wrote {} rows to {} ({} bytes)",
            relation.num_rows(),
            path.display(),
            bytes
        );

        Ok(WriteSummary {
            path: path.to_path_buf(),
            rows: relation.num_rows(),
            bytes,
        })
    }

    fn properties(&self) -> Result<WriterProperties> {
        let level = ZstdLevel::try_new(self.config.compression_level).map_err(|e| {
            HeritageError::Config(format!(
                "invalid ZSTD level {}: {}",
                self.config.compression_level, e
            ))
        })?;

        Ok(WriterProperties::builder()
            .set_compression(Compression::ZSTD(level))
            .set_statistics_enabled(EnabledStatistics::Chunk)
            .set_max_row_group_size(self.config.max_row_group_size.max(1))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    use crate::session::Session;

    fn relation(names: &[&str]) -> Relation {
        let schema = Arc::new(Schema::new(vec![Field::new("name", DataType::Utf8, true)]));
        let array: ArrayRef = Arc::new(StringArray::from(names.to_vec()));
        let batch = RecordBatch::try_new(schema.clone(), vec![array]).unwrap();
        Relation::new(schema, vec![batch])
    }

    #[test]
    fn test_write_creates_parents_and_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/curated_parquet/curated.parquet");

        let summary = CuratedWriter::new().write(&relation(&["Vase", "Icon"]), &path).unwrap();
        assert_eq!(summary.rows, 2);
        assert!(summary.bytes > 0);
        assert_eq!(Session::new().row_count(&path).unwrap(), 2);
    }

    #[test]
    fn test_write_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curated.parquet");
        let writer = CuratedWriter::new();

        writer.write(&relation(&["a", "b", "c"]), &path).unwrap();
        writer.write(&relation(&["d"]), &path).unwrap();
        assert_eq!(Session::new().row_count(&path).unwrap(), 1);
    }

    #[test]
    fn test_invalid_compression_level() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CuratedWriter::with_config(WriterConfig {
            compression_level: 99,
            ..WriterConfig::default()
        });
        let err = writer
            .write(&relation(&["a"]), dir.path().join("x.parquet"))
            .unwrap_err();
        assert!(matches!(err, HeritageError::Config(_)));
    }
}
