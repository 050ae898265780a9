//! Parquet scanning with optional root-column projection.

use std::fs::File;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};

use crate::error::{HeritageError, Result};

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Rows per record batch.
    pub batch_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { batch_size: 8192 }
    }
}

/// Open a Parquet file, mapping a missing path to [`HeritageError::SourceNotFound`].
pub(crate) fn open_file(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(HeritageError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| HeritageError::io(path, e))
}

/// Read the footer and return a builder positioned at the first row group.
pub(crate) fn open_builder(path: &Path) -> Result<ParquetRecordBatchReaderBuilder<File>> {
    let file = open_file(path)?;
    Ok(ParquetRecordBatchReaderBuilder::try_new(file)?)
}

/// Build a batch reader, keeping only the named root columns when given.
///
/// Projected columns come back in file order, not request order.
pub(crate) fn build_reader(
    path: &Path,
    columns: Option<&[&str]>,
    config: &ReaderConfig,
) -> Result<ParquetRecordBatchReader> {
    let builder = open_builder(path)?.with_batch_size(config.batch_size);

    let builder = match columns {
        None => builder,
        Some(names) => {
            let arrow_schema = builder.schema().clone();
            let mut indices = Vec::with_capacity(names.len());
            for name in names {
                let index = arrow_schema
                    .index_of(name)
                    .map_err(|_| HeritageError::missing_column_in(*name, path))?;
                indices.push(index);
            }
            let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
            builder.with_projection(mask)
        }
    };

    debug!(
        "opening {} (projection: {})",
        path.display(),
        columns.map(|c| c.join(",")).unwrap_or_else(|| "*".to_string())
    );
    Ok(builder.build()?)
}

/// A streaming scan over a Parquet file's record batches.
pub struct ParquetScan<'s> {
    reader: ParquetRecordBatchReader,
    schema: SchemaRef,
    on_batch: Box<dyn FnMut(&RecordBatch) + 's>,
}

impl<'s> ParquetScan<'s> {
    pub(crate) fn new(
        reader: ParquetRecordBatchReader,
        on_batch: Box<dyn FnMut(&RecordBatch) + 's>,
    ) -> Self {
        use arrow::record_batch::RecordBatchReader;

        let schema = reader.schema();
        Self {
            reader,
            schema,
            on_batch,
        }
    }

    /// Schema of the batches this scan yields (after projection).
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }
}

impl Iterator for ParquetScan<'_> {
    type Item = Result<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = match self.reader.next()? {
            Ok(batch) => batch,
            Err(e) => return Some(Err(e.into())),
        };
        (self.on_batch)(&batch);
        Some(Ok(batch))
    }
}
