//! Report sets: CSV analytics with charts, and the standalone figure series.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::aggregate::{missing_fraction, text_lengths, top_n, total_rows};
use crate::error::Result;
use crate::input::{FieldPath, Relation};
use crate::schema::{MUSEUM_NAME, NAME, PERIOD, PERIOD_NOT_ESTABLISHED, PRODUCTION_PLACE, TYPOLOGY_NAME};

use super::chart::{ChartFormat, Figure, render};
use super::figures::{BarChart, Histogram, Orientation, PieChart};
use super::table::{COUNT_HEADER, write_aggregation_csv, write_records};

const VALUE_LABEL: &str = "number of objects";

/// Report configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Entries kept per ranked aggregation.
    pub top_n: usize,
    pub format: ChartFormat,
    pub orientation: Orientation,
    /// Buckets in the name-length histogram.
    pub histogram_bins: usize,
    /// Substring marking a value as "not established".
    pub missing_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            format: ChartFormat::Png,
            orientation: Orientation::Horizontal,
            histogram_bins: 40,
            missing_marker: PERIOD_NOT_ESTABLISHED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Table,
    Chart,
}

/// One verified file written by a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Everything a report run wrote, and what it chose not to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub artifacts: Vec<Artifact>,
    /// Artifact names that were skipped, with the reason.
    pub skipped: Vec<String>,
}

impl ReportOutcome {
    pub fn record_table(&mut self, path: PathBuf, bytes: u64) {
        self.artifacts.push(Artifact {
            kind: ArtifactKind::Table,
            path,
            bytes,
        });
    }

    pub fn record_chart(&mut self, path: PathBuf, bytes: u64) {
        self.artifacts.push(Artifact {
            kind: ArtifactKind::Chart,
            path,
            bytes,
        });
    }

    fn skip(&mut self, name: &str, reason: &str) {
        warn!("skipping {}: {}", name, reason);
        self.skipped.push(format!("{} ({})", name, reason));
    }

    pub fn tables(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.kind == ArtifactKind::Table)
    }

    pub fn charts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.kind == ArtifactKind::Chart)
    }
}

/// Turns a curated relation into report files.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use heritage::{ReportMaterializer, Session};
///
/// let session = Session::new();
/// let curated = session.read("curated.parquet").unwrap();
/// let outcome = ReportMaterializer::new()
///     .analytics(&curated, Path::new("reports"))
///     .unwrap();
/// println!("{} files written", outcome.artifacts.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportMaterializer {
    config: ReportConfig,
}

impl ReportMaterializer {
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn chart_path(&self, outdir: &Path, stem: &str) -> PathBuf {
        outdir.join(format!("{}.{}", stem, self.config.format.extension()))
    }

    fn render_into<F: Figure>(
        &self,
        outcome: &mut ReportOutcome,
        figure: &F,
        outdir: &Path,
        stem: &str,
    ) -> Result<()> {
        let path = self.chart_path(outdir, stem);
        let bytes = render(figure, &path, self.config.format)?;
        info!("saved {}", path.display());
        outcome.record_chart(path, bytes);
        Ok(())
    }

    /// Row-count summary, three ranked CSV tables and a chart per non-empty table.
    ///
    /// Writes `summary.csv`, `top_museums.csv`, `top_typologies.csv` and
    /// `objects_by_period.csv` into `outdir`.
    pub fn analytics(&self, relation: &Relation, outdir: &Path) -> Result<ReportOutcome> {
        let mut outcome = ReportOutcome::default();
        let top = self.config.top_n;

        let summary_path = outdir.join("summary.csv");
        let bytes = write_records(&[total_rows(relation)], &summary_path)?;
        outcome.record_table(summary_path, bytes);

        let ranked = [
            ("top_museums", MUSEUM_NAME, format!("Top {} museums by {}", top, COUNT_HEADER)),
            ("top_typologies", TYPOLOGY_NAME, format!("Top {} typologies by {}", top, COUNT_HEADER)),
            ("objects_by_period", PERIOD, format!("Top {} periods by {}", top, COUNT_HEADER)),
        ];
        for (stem, column, title) in ranked {
            let aggregation = top_n(relation, &FieldPath::from(column), top)?;

            let table_path = outdir.join(format!("{}.csv", stem));
            let bytes = write_aggregation_csv(&aggregation, &table_path)?;
            outcome.record_table(table_path, bytes);

            if aggregation.is_empty() {
                outcome.skip(stem, "no non-blank values");
                continue;
            }
            let chart = BarChart::from_aggregation(&aggregation, title, VALUE_LABEL)
                .with_orientation(self.config.orientation);
            self.render_into(&mut outcome, &chart, outdir, stem)?;
        }

        Ok(outcome)
    }

    /// The numbered figure series: ranked bars, period fill pie, name lengths.
    ///
    /// Figures whose source column is absent are skipped, as are ranked
    /// figures with nothing to rank.
    pub fn figures(&self, relation: &Relation, outdir: &Path) -> Result<ReportOutcome> {
        let mut outcome = ReportOutcome::default();
        let top = self.config.top_n;

        let ranked = [
            ("01_top_museums_barh", MUSEUM_NAME, format!("Top {} museums by number of objects", top)),
            ("02_top_typologies_barh", TYPOLOGY_NAME, format!("Top {} typologies of museum objects", top)),
            ("03_top_periods_barh", PERIOD, format!("Top {} periods ({})", top, PERIOD)),
        ];
        for (stem, column, title) in ranked {
            self.ranked_figure(&mut outcome, relation, outdir, stem, column, title)?;
        }

        let period = FieldPath::from(PERIOD);
        if relation.has_column(&period) {
            let summary = missing_fraction(relation, &period, &self.config.missing_marker)?;
            let pie = PieChart::from_missing(&summary, format!("Completeness of {}", PERIOD));
            self.render_into(&mut outcome, &pie, outdir, "04_period_filled_pie")?;
        } else {
            outcome.skip("04_period_filled_pie", "column periodStr is absent");
        }

        let name = FieldPath::from(NAME);
        if relation.has_column(&name) {
            let lengths: Vec<f64> = text_lengths(relation, &name)?
                .into_iter()
                .map(|n| n as f64)
                .collect();
            let hist = Histogram::new(
                "Distribution of object name length",
                "name length (characters)",
                &lengths,
                self.config.histogram_bins,
            );
            self.render_into(&mut outcome, &hist, outdir, "05_name_length_hist")?;
        } else {
            outcome.skip("05_name_length_hist", "column name is absent");
        }

        self.ranked_figure(
            &mut outcome,
            relation,
            outdir,
            "06_top_places_barh",
            PRODUCTION_PLACE,
            format!("Top {} production places ({})", top, PRODUCTION_PLACE),
        )?;

        Ok(outcome)
    }

    fn ranked_figure(
        &self,
        outcome: &mut ReportOutcome,
        relation: &Relation,
        outdir: &Path,
        stem: &str,
        column: &str,
        title: String,
    ) -> Result<()> {
        let path = FieldPath::from(column);
        if !relation.has_column(&path) {
            outcome.skip(stem, &format!("column {} is absent", column));
            return Ok(());
        }

        let aggregation = top_n(relation, &path, self.config.top_n)?;
        if aggregation.is_empty() {
            outcome.skip(stem, "no non-blank values");
            return Ok(());
        }
        let chart = BarChart::from_aggregation(&aggregation, title, VALUE_LABEL)
            .with_orientation(self.config.orientation);
        self.render_into(outcome, &chart, outdir, stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    fn relation(columns: &[(&str, Vec<Option<&str>>)]) -> Relation {
        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));
        let arrays = columns
            .iter()
            .map(|(_, values)| Arc::new(StringArray::from(values.clone())) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
        Relation::new(schema, vec![batch])
    }

    #[test]
    fn test_analytics_skips_chart_for_empty_aggregation() {
        let dir = tempfile::tempdir().unwrap();
        let rel = relation(&[
            (MUSEUM_NAME, vec![Some("A"), Some("A"), Some("B")]),
            (TYPOLOGY_NAME, vec![Some("Живопись"), None, Some("Графика")]),
            (PERIOD, vec![None, Some(""), Some("  ")]),
        ]);

        let outcome = ReportMaterializer::new().analytics(&rel, dir.path()).unwrap();
        assert_eq!(outcome.tables().count(), 4);
        assert_eq!(outcome.charts().count(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(dir.path().join("top_museums.png").exists());
        assert!(!dir.path().join("objects_by_period.png").exists());

        let summary = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        assert_eq!(summary, "rows\n3\n");
    }

    #[test]
    fn test_analytics_requires_columns() {
        let dir = tempfile::tempdir().unwrap();
        let rel = relation(&[(MUSEUM_NAME, vec![Some("A")])]);
        assert!(ReportMaterializer::new().analytics(&rel, dir.path()).is_err());
    }

    #[test]
    fn test_figures_skip_absent_columns() {
        let dir = tempfile::tempdir().unwrap();
        let rel = relation(&[
            (NAME, vec![Some("Ваза"), Some("Икона Богоматери")]),
            (MUSEUM_NAME, vec![Some("A"), Some("B")]),
            (TYPOLOGY_NAME, vec![Some("T"), Some("T")]),
            (PERIOD, vec![Some("XIX век"), Some("не установлен")]),
        ]);
        let materializer = ReportMaterializer::with_config(ReportConfig {
            top_n: 12,
            format: ChartFormat::Svg,
            ..ReportConfig::default()
        });

        let outcome = materializer.figures(&rel, dir.path()).unwrap();
        assert_eq!(outcome.charts().count(), 5);
        assert!(dir.path().join("04_period_filled_pie.svg").exists());
        assert!(dir.path().join("05_name_length_hist.svg").exists());
        assert!(!dir.path().join("06_top_places_barh.svg").exists());
        assert_eq!(outcome.skipped.len(), 1);
    }
}
