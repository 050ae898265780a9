//! Data-quality metrics: missing fractions and text lengths.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{FieldPath, Relation};

/// Filled versus missing split for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSummary {
    pub column: String,
    pub filled: usize,
    pub missing: usize,
    /// `missing / (filled + missing)`, or 0.0 for an empty relation.
    pub fraction: f64,
}

impl MissingSummary {
    pub fn total(&self) -> usize {
        self.filled + self.missing
    }
}

/// Whether a value counts as missing: null, blank, or containing `marker`.
///
/// The marker match is a case-insensitive substring test. An empty marker
/// only treats null and blank values as missing.
pub fn is_missing(value: Option<&str>, marker: &str) -> bool {
    let Some(value) = value else { return true };
    if value.trim().is_empty() {
        return true;
    }
    !marker.is_empty() && value.to_lowercase().contains(&marker.to_lowercase())
}

/// Proportion of rows whose value in `column` is missing.
pub fn missing_fraction(
    relation: &Relation,
    column: &FieldPath,
    marker: &str,
) -> Result<MissingSummary> {
    let marker = marker.to_lowercase();
    let mut filled = 0usize;
    let mut missing = 0usize;
    relation.for_each_text(column, |value| {
        if is_missing(value, &marker) {
            missing += 1;
        } else {
            filled += 1;
        }
    })?;

    let total = filled + missing;
    let fraction = if total == 0 {
        0.0
    } else {
        missing as f64 / total as f64
    };

    Ok(MissingSummary {
        column: column.to_string(),
        filled,
        missing,
        fraction,
    })
}

/// Character length of every non-null value, in row order.
pub fn text_lengths(relation: &Relation, column: &FieldPath) -> Result<Vec<usize>> {
    let mut lengths = Vec::with_capacity(relation.num_rows());
    relation.for_each_text(column, |value| {
        if let Some(value) = value {
            lengths.push(value.chars().count());
        }
    })?;
    Ok(lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    use crate::schema::PERIOD_NOT_ESTABLISHED;

    fn relation(values: Vec<Option<&str>>) -> Relation {
        let schema = Arc::new(Schema::new(vec![Field::new("periodStr", DataType::Utf8, true)]));
        let array: ArrayRef = Arc::new(StringArray::from(values));
        let batch = RecordBatch::try_new(schema.clone(), vec![array]).unwrap();
        Relation::new(schema, vec![batch])
    }

    fn period() -> FieldPath {
        FieldPath::from("periodStr")
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None, "x"));
        assert!(is_missing(Some("   "), "x"));
        assert!(is_missing(Some("Период НЕ УСТАНОВЛЕН"), PERIOD_NOT_ESTABLISHED));
        assert!(is_missing(Some("Не установлена"), PERIOD_NOT_ESTABLISHED));
        assert!(!is_missing(Some("XIX век"), PERIOD_NOT_ESTABLISHED));
        assert!(!is_missing(Some("value"), ""));
    }

    #[test]
    fn test_all_blank_is_fully_missing() {
        let rel = relation(vec![Some(""), Some(" "), None]);
        let summary = missing_fraction(&rel, &period(), PERIOD_NOT_ESTABLISHED).unwrap();
        assert_eq!(summary.missing, 3);
        assert_eq!(summary.fraction, 1.0);
    }

    #[test]
    fn test_nothing_missing() {
        let rel = relation(vec![Some("XIX век"), Some("1900")]);
        let summary = missing_fraction(&rel, &period(), PERIOD_NOT_ESTABLISHED).unwrap();
        assert_eq!(summary.filled, 2);
        assert_eq!(summary.fraction, 0.0);
    }

    #[test]
    fn test_mixed_fraction() {
        let rel = relation(vec![
            Some("XIX век"),
            Some("не установлен"),
            None,
            Some("1900"),
        ]);
        let summary = missing_fraction(&rel, &period(), PERIOD_NOT_ESTABLISHED).unwrap();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.fraction, 0.5);
    }

    #[test]
    fn test_empty_relation_fraction_is_zero() {
        let schema = Arc::new(Schema::new(vec![Field::new("periodStr", DataType::Utf8, true)]));
        let rel = Relation::empty(schema);
        let summary = missing_fraction(&rel, &period(), PERIOD_NOT_ESTABLISHED).unwrap();
        assert_eq!(summary.fraction, 0.0);
    }

    #[test]
    fn test_text_lengths_count_chars() {
        let rel = relation(vec![Some("Ваза"), None, Some("ab")]);
        assert_eq!(text_lengths(&rel, &period()).unwrap(), vec![4, 2]);
    }
}
