//! Source-to-curated column mapping for exhibit records.

use crate::input::FieldPath;

/// Exhibit title. Rows without one never reach the curated table.
pub const NAME: &str = "name";
/// Flattened `museum.name`.
pub const MUSEUM_NAME: &str = "museum_name";
/// Flattened `typology.name`.
pub const TYPOLOGY_NAME: &str = "typology_name";
/// Free-text period descriptor.
pub const PERIOD: &str = "periodStr";
pub const PRODUCTION_PLACE: &str = "productionPlace";

/// Marker the catalogue uses for "period not established".
///
/// Matched case-insensitively as a substring, so inflected forms such as
/// "Не установлена" also count.
pub const PERIOD_NOT_ESTABLISHED: &str = "не установлен";

/// One projected column: where it comes from and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Source address, dotted for struct children.
    pub source: &'static str,
    /// Column name in the curated table.
    pub alias: &'static str,
}

impl ColumnMapping {
    const fn keep(name: &'static str) -> Self {
        Self {
            source: name,
            alias: name,
        }
    }

    const fn flatten(source: &'static str, alias: &'static str) -> Self {
        Self { source, alias }
    }

    pub fn source_path(&self) -> FieldPath {
        FieldPath::from(self.source)
    }
}

/// The curated table's columns, in output order.
pub const CURATED_COLUMNS: &[ColumnMapping] = &[
    ColumnMapping::keep("id"),
    ColumnMapping::keep(NAME),
    ColumnMapping::keep(PRODUCTION_PLACE),
    ColumnMapping::keep("description"),
    ColumnMapping::keep("partsCount"),
    ColumnMapping::keep("regNumber"),
    ColumnMapping::keep("invNumber"),
    ColumnMapping::keep("gikNumber"),
    ColumnMapping::keep("type"),
    ColumnMapping::keep("statusId"),
    ColumnMapping::flatten("museum.name", MUSEUM_NAME),
    ColumnMapping::flatten("museum.code", "museum_code"),
    ColumnMapping::flatten("typology.name", TYPOLOGY_NAME),
    ColumnMapping::flatten("typology.code", "typology_code"),
    ColumnMapping::flatten("typology.obsolete", "typology_obsolete"),
    ColumnMapping::keep(PERIOD),
    ColumnMapping::keep("startDate"),
    ColumnMapping::keep("finishDate"),
    ColumnMapping::flatten("precision", "date_precision"),
    ColumnMapping::keep("dimStr"),
    ColumnMapping::flatten("dimUnit.name", "dim_unit"),
    ColumnMapping::keep("width"),
    ColumnMapping::keep("length"),
    ColumnMapping::keep("height"),
    ColumnMapping::keep("weight"),
    ColumnMapping::keep("weightUnit"),
    ColumnMapping::keep("authors"),
    ColumnMapping::keep("technologies"),
    ColumnMapping::keep("findPlace"),
    ColumnMapping::keep("mainWords"),
    ColumnMapping::keep("provenance"),
    ColumnMapping::keep("extUrl"),
    ColumnMapping::keep("fund"),
];
