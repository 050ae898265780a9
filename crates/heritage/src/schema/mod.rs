//! Column catalogue of the exhibit dataset.

mod exhibit;

pub use exhibit::{
    CURATED_COLUMNS, ColumnMapping, MUSEUM_NAME, NAME, PERIOD, PERIOD_NOT_ESTABLISHED,
    PRODUCTION_PLACE, TYPOLOGY_NAME,
};
