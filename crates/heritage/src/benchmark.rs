//! Timing harness: curation count and grouped count at several row limits.

use std::path::Path;
use std::time::Instant;

use arrow::datatypes::Schema;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, CategoryCounter};
use crate::curation::{CurationConfig, Curator};
use crate::error::{HeritageError, Result};
use crate::input::FieldPath;
use crate::report::{
    ChartFormat, LineChart, ReportOutcome, render, write_records,
};
use crate::schema::{CURATED_COLUMNS, MUSEUM_NAME};
use crate::session::Session;

/// Limits used when none are given.
pub const DEFAULT_LIMITS: &str = "50000,100000,200000";

/// Timing of one limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    /// Row cap for this run (0 = unlimited).
    pub limit: usize,
    /// Qualifying rows counted at this cap.
    pub rows: usize,
    pub time_count_s: f64,
    pub time_agg_s: f64,
    pub time_total_s: f64,
}

/// Parse a comma-separated list of row limits. Blank items are ignored.
pub fn parse_limits(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>().map_err(|_| {
                HeritageError::Config(format!("invalid limit '{}': expected a whole number", s))
            })
        })
        .collect()
}

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub limits: Vec<usize>,
    /// Column grouped in the aggregation step; dotted paths reach struct fields.
    pub group_by: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            limits: vec![50_000, 100_000, 200_000],
            group_by: MUSEUM_NAME.to_string(),
        }
    }
}

/// The field `column` reads in `schema`.
///
/// A curated column name absent from a raw export maps back to its source
/// field, so `museum_name` reads `museum.name`.
fn source_column(schema: &Schema, column: &FieldPath) -> FieldPath {
    if column.try_resolve(schema).is_some() {
        return column.clone();
    }
    let name = column.to_string();
    CURATED_COLUMNS
        .iter()
        .find(|mapping| mapping.alias == name)
        .map(|mapping| mapping.source_path())
        .filter(|source| source.try_resolve(schema).is_some())
        .unwrap_or_else(|| column.clone())
}

/// Grouped count over the first `limit` rows of a file (0 = all rows).
///
/// Works on raw exports and curated tables alike.
pub fn count_groups(
    session: &Session,
    path: &Path,
    column: &FieldPath,
    limit: usize,
) -> Result<Aggregation> {
    let source = source_column(&*session.schema(path)?, column);
    if &source != column {
        debug!("grouping by {} for {}", source, column);
    }
    let scan = session.open_columns(path, &[source.root()])?;
    let locator = source.resolve(scan.schema())?;

    let mut counter = CategoryCounter::new();
    let mut remaining = if limit == 0 { usize::MAX } else { limit };
    for batch in scan {
        if remaining == 0 {
            break;
        }
        let batch = batch?;
        let take = remaining.min(batch.num_rows());
        let values = locator.extract_text(&batch.slice(0, take))?;
        values.iter().for_each(|v| counter.add(v));
        remaining -= take;
    }

    let distinct = counter.distinct();
    Ok(counter.finish(column.to_string(), distinct))
}

/// Runs the timing loop and writes its results.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkHarness {
    config: BenchmarkConfig,
}

impl BenchmarkHarness {
    pub fn new() -> Self {
        Self::with_config(BenchmarkConfig::default())
    }

    pub fn with_config(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Time each configured limit against `input`, in the given order.
    pub fn run(&self, session: &Session, input: &Path) -> Result<Vec<BenchmarkRow>> {
        if !input.exists() {
            return Err(HeritageError::SourceNotFound {
                path: input.to_path_buf(),
            });
        }
        let group_by = FieldPath::from(self.config.group_by.as_str());

        let mut rows = Vec::with_capacity(self.config.limits.len());
        for &limit in &self.config.limits {
            let curator = Curator::with_config(CurationConfig {
                limit,
                ..CurationConfig::default()
            });

            let started = Instant::now();
            let counted = curator.count_qualifying(session, input)?;
            let time_count_s = started.elapsed().as_secs_f64();

            let started = Instant::now();
            let groups = count_groups(session, input, &group_by, limit)?;
            let time_agg_s = started.elapsed().as_secs_f64();
            debug!("limit {}: {} groups", limit, groups.len());

            let row = BenchmarkRow {
                limit,
                rows: counted,
                time_count_s,
                time_agg_s,
                time_total_s: time_count_s + time_agg_s,
            };
            info!(
                "limit {}: {} rows in {:.3}s",
                row.limit, row.rows, row.time_total_s
            );
            rows.push(row);
        }
        Ok(rows)
    }

    /// Write `benchmark.csv` and a line chart of total time against rows.
    pub fn write(
        &self,
        rows: &[BenchmarkRow],
        outdir: &Path,
        format: ChartFormat,
    ) -> Result<ReportOutcome> {
        let mut outcome = ReportOutcome::default();

        let table = outdir.join("benchmark.csv");
        let bytes = write_records(rows, &table)?;
        outcome.record_table(table, bytes);

        let chart = LineChart::new(
            "Pipeline time by row count",
            "rows",
            "total time (s)",
            rows.iter()
                .map(|r| (r.rows as f64, r.time_total_s))
                .collect(),
        );
        let path = outdir.join(format!("benchmark.{}", format.extension()));
        let bytes = render(&chart, &path, format)?;
        outcome.record_chart(path, bytes);

        Ok(outcome)
    }
}
