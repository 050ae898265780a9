//! CSV report tables.

use std::path::Path;

use serde::Serialize;

use crate::aggregate::Aggregation;
use crate::artifact::{ensure_parent_dir, verify_written};
use crate::error::{HeritageError, Result};

/// Header of the count column in aggregation tables.
pub const COUNT_HEADER: &str = "objects";

/// Write `(category, objects)` rows, headed by the aggregated column name.
///
/// An empty aggregation still produces a header-only table.
pub fn write_aggregation_csv(aggregation: &Aggregation, path: &Path) -> Result<u64> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([aggregation.column.as_str(), COUNT_HEADER])?;
    for entry in &aggregation.entries {
        writer.write_record([entry.category.as_str(), entry.count.to_string().as_str()])?;
    }
    writer.flush().map_err(|e| HeritageError::io(path, e))?;
    drop(writer);
    verify_written(path)
}

/// Write serializable records as CSV, headers taken from field names.
pub fn write_records<T: Serialize>(records: &[T], path: &Path) -> Result<u64> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| HeritageError::io(path, e))?;
    drop(writer);
    verify_written(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{CategoryCount, RowSummary};

    #[test]
    fn test_write_aggregation_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/top_museums.csv");
        let agg = Aggregation {
            column: "museum_name".to_string(),
            total_considered: 5,
            entries: vec![CategoryCount::new("A, B", 3), CategoryCount::new("C", 2)],
        };

        write_aggregation_csv(&agg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "museum_name,objects\n\"A, B\",3\nC,2\n");
    }

    #[test]
    fn test_empty_aggregation_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objects_by_period.csv");
        let agg = Aggregation {
            column: "periodStr".to_string(),
            total_considered: 0,
            entries: Vec::new(),
        };

        write_aggregation_csv(&agg, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "periodStr,objects\n");
    }

    #[test]
    fn test_write_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_records(&[RowSummary { rows: 42 }], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "rows\n42\n");
    }
}
