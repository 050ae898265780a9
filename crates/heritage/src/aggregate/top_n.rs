//! Grouped counts over categorical columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{FieldPath, Relation};

/// One category and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Top-N result for one column, ordered by count descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Column the counts were computed over.
    pub column: String,
    /// Rows with a non-blank value, before truncation to N.
    pub total_considered: usize,
    pub entries: Vec<CategoryCount>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Category labels in rank order.
    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }
}

/// Incremental grouped counter.
///
/// Categories are kept in first-seen order, so equal counts rank by which
/// value appeared first.
#[derive(Debug, Clone, Default)]
pub struct CategoryCounter {
    counts: IndexMap<String, usize>,
    considered: usize,
}

impl CategoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one value. Nulls and blank strings are ignored.
    pub fn add(&mut self, value: Option<&str>) {
        let Some(value) = value else { return };
        if value.trim().is_empty() {
            return;
        }
        self.considered += 1;
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Values counted so far.
    pub fn considered(&self) -> usize {
        self.considered
    }

    /// Distinct categories seen so far.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Rank categories and keep the first `n`.
    pub fn finish(self, column: impl Into<String>, n: usize) -> Aggregation {
        let mut entries: Vec<CategoryCount> = self
            .counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        // stable: ties keep first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(n);

        Aggregation {
            column: column.into(),
            total_considered: self.considered,
            entries,
        }
    }
}

/// Rank the values of an iterator.
pub fn count_categories<'a, I>(column: &str, values: I, n: usize) -> Aggregation
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counter = CategoryCounter::new();
    for value in values {
        counter.add(value);
    }
    counter.finish(column, n)
}

/// Top-N grouped count of one column of a relation.
///
/// # Example
///
/// ```no_run
/// use heritage::{FieldPath, Session, top_n};
///
/// let session = Session::new();
/// let curated = session.read("curated.parquet").unwrap();
/// let museums = top_n(&curated, &FieldPath::from("museum_name"), 20).unwrap();
/// for entry in &museums.entries {
///     println!("{}: {}", entry.category, entry.count);
/// }
/// ```
pub fn top_n(relation: &Relation, column: &FieldPath, n: usize) -> Result<Aggregation> {
    let mut counter = CategoryCounter::new();
    relation.for_each_text(column, |value| counter.add(value))?;
    Ok(counter.finish(column.to_string(), n))
}

/// Single-row total count report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSummary {
    pub rows: usize,
}

pub fn total_rows(relation: &Relation) -> RowSummary {
    RowSummary {
        rows: relation.num_rows(),
    }
}
