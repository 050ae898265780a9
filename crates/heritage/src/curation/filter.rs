//! Curation filter: drop unnamed exhibits, cap the row count, flatten the schema.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray, new_null_array};
use arrow::compute::kernels::filter::filter_record_batch;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::{debug, info, warn};

use crate::error::{HeritageError, Result};
use crate::input::{ColumnLocator, FieldPath, Relation};
use crate::schema::{CURATED_COLUMNS, NAME};
use crate::session::Session;

/// Curation configuration.
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// Maximum rows to keep (0 = all qualifying rows).
    pub limit: usize,
    /// Column that must hold a non-blank value for a row to qualify.
    pub name_column: String,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            name_column: NAME.to_string(),
        }
    }
}

/// Whether a name value qualifies a row for the curated table.
pub fn is_qualifying_name(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn qualifying_mask(names: &StringArray) -> BooleanArray {
    names.iter().map(|v| Some(is_qualifying_name(v))).collect()
}

/// How each curated column is produced from a source batch.
struct ProjectionPlan {
    schema: SchemaRef,
    columns: Vec<Option<ColumnLocator>>,
    name: ColumnLocator,
}

impl ProjectionPlan {
    fn build(source: &Schema, name_column: &FieldPath) -> Result<Self> {
        let name = name_column.resolve(source)?;

        let mut fields = Vec::with_capacity(CURATED_COLUMNS.len());
        let mut columns = Vec::with_capacity(CURATED_COLUMNS.len());
        for mapping in CURATED_COLUMNS {
            match mapping.source_path().try_resolve(source) {
                Some(locator) => {
                    fields.push(Field::new(mapping.alias, locator.data_type().clone(), true));
                    columns.push(Some(locator));
                }
                None => {
                    warn!(
                        "source has no '{}'; curated column '{}' will be null",
                        mapping.source, mapping.alias
                    );
                    fields.push(Field::new(mapping.alias, DataType::Utf8, true));
                    columns.push(None);
                }
            }
        }

        Ok(Self {
            schema: Arc::new(Schema::new(fields)),
            columns,
            name,
        })
    }

    /// Filter and project one source batch.
    fn apply(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = qualifying_mask(&self.name.extract_text(batch)?);

        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.columns.len());
        for (locator, field) in self.columns.iter().zip(self.schema.fields()) {
            let array = match locator {
                Some(locator) => locator.extract(batch)?,
                None => new_null_array(field.data_type(), batch.num_rows()),
            };
            arrays.push(array);
        }

        let projected = RecordBatch::try_new(self.schema.clone(), arrays)?;
        Ok(filter_record_batch(&projected, &mask)?)
    }
}

/// Applies the curation predicate, row cap and projection.
///
/// # Example
///
/// ```no_run
/// use heritage::{Curator, Session};
///
/// let session = Session::new();
/// let curated = Curator::new().with_limit(1000).curate(&session, "raw.parquet").unwrap();
/// assert!(curated.num_rows() <= 1000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Curator {
    config: CurationConfig,
}

impl Curator {
    /// Create a curator with default configuration (no row cap).
    pub fn new() -> Self {
        Self::with_config(CurationConfig::default())
    }

    /// Create a curator with custom configuration.
    pub fn with_config(config: CurationConfig) -> Self {
        Self { config }
    }

    /// Set the row cap (0 = unlimited).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    fn name_path(&self) -> FieldPath {
        FieldPath::from(self.config.name_column.as_str())
    }

    fn cap(&self) -> Option<usize> {
        (self.config.limit > 0).then_some(self.config.limit)
    }

    /// Count qualifying rows (capped at the limit), reading only the name column.
    pub fn count_qualifying(&self, session: &Session, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let name_path = self.name_path();
        let schema = session.schema(path)?;
        if name_path.try_resolve(&schema).is_none() {
            return Err(HeritageError::missing_column_in(name_path.to_string(), path));
        }

        let scan = session.open_columns(path, &[name_path.root()])?;
        let locator = name_path.resolve(scan.schema())?;
        let cap = self.cap();

        let mut count = 0usize;
        for batch in scan {
            let names = locator.extract_text(&batch?)?;
            count += names.iter().filter(|v| is_qualifying_name(*v)).count();
            if let Some(cap) = cap {
                if count >= cap {
                    return Ok(cap);
                }
            }
        }
        Ok(count)
    }

    /// Read a source file and produce the curated relation.
    ///
    /// Fails with [`HeritageError::EmptyResult`] when no row qualifies.
    pub fn curate(&self, session: &Session, path: impl AsRef<Path>) -> Result<Relation> {
        let path = path.as_ref();
        let schema = session.schema(path)?;
        let name_path = self.name_path();
        if name_path.try_resolve(&schema).is_none() {
            return Err(HeritageError::missing_column_in(name_path.to_string(), path));
        }

        let mut roots: Vec<&str> = CURATED_COLUMNS
            .iter()
            .filter_map(|c| {
                let source = c.source_path();
                schema
                    .column_with_name(source.root())
                    .map(|(_, field)| field.name().as_str())
            })
            .collect();
        roots.push(name_path.root());
        roots.sort_unstable();
        roots.dedup();

        let scan = session.open_columns(path, &roots)?;
        let scan_schema = scan.schema().clone();
        info!("curating {} (limit: {})", path.display(), self.config.limit);
        self.curate_batches(&scan_schema, scan)
    }

    /// Curate a relation that is already in memory.
    pub fn curate_relation(&self, relation: &Relation) -> Result<Relation> {
        let batches = relation.batches().iter().cloned().map(Ok);
        self.curate_batches(relation.schema(), batches)
    }

    fn curate_batches<I>(&self, schema: &Schema, batches: I) -> Result<Relation>
    where
        I: IntoIterator<Item = Result<RecordBatch>>,
    {
        let plan = ProjectionPlan::build(schema, &self.name_path())?;
        let cap = self.cap();

        let mut kept = Vec::new();
        let mut rows = 0usize;
        for batch in batches {
            let mut curated = plan.apply(&batch?)?;
            if let Some(cap) = cap {
                let room = cap - rows;
                if curated.num_rows() > room {
                    curated = curated.slice(0, room);
                }
            }
            if curated.num_rows() > 0 {
                rows += curated.num_rows();
                debug!("kept {} rows (total {})", curated.num_rows(), rows);
                kept.push(curated);
            }
            // stop before the next batch is read
            if cap.is_some_and(|cap| rows >= cap) {
                break;
            }
        }

        if rows == 0 {
            return Err(HeritageError::EmptyResult(format!(
                "no rows have a non-blank '{}'; check the source data and filter",
                self.config.name_column
            )));
        }
        Ok(Relation::new(plan.schema, kept))
    }
}
