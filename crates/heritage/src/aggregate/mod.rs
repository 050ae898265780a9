//! Aggregations over the curated table.

mod quality;
mod top_n;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{FieldPath, Relation};
use crate::schema::{MUSEUM_NAME, PERIOD, TYPOLOGY_NAME};

pub use quality::{MissingSummary, is_missing, missing_fraction, text_lengths};
pub use top_n::{
    Aggregation, CategoryCount, CategoryCounter, RowSummary, count_categories, top_n, total_rows,
};

/// Quick overview of a curated table: size and the leading categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub rows: usize,
    pub museums: Option<Aggregation>,
    pub periods: Option<Aggregation>,
    pub typologies: Option<Aggregation>,
}

/// Summarize the museum, period and typology columns that are present.
pub fn summarize(relation: &Relation, n: usize) -> Result<CollectionSummary> {
    let ranked = |column: &str| -> Result<Option<Aggregation>> {
        let path = FieldPath::from(column);
        if !relation.has_column(&path) {
            return Ok(None);
        }
        top_n(relation, &path, n).map(Some)
    };

    Ok(CollectionSummary {
        rows: relation.num_rows(),
        museums: ranked(MUSEUM_NAME)?,
        periods: ranked(PERIOD)?,
        typologies: ranked(TYPOLOGY_NAME)?,
    })
}
