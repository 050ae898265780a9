//! Shared fixtures: exhibit records written as raw Parquet exports.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Int64Array, StringArray, StructArray};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

/// One raw exhibit row.
#[derive(Debug, Clone, Default)]
pub struct Exhibit {
    pub id: i64,
    pub name: Option<String>,
    pub period: Option<String>,
    pub place: Option<String>,
    pub museum: Option<(String, String)>,
    pub typology: Option<(String, String, bool)>,
}

impl Exhibit {
    pub fn new(id: i64, name: Option<&str>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn museum(mut self, name: &str) -> Self {
        self.museum = Some((name.to_string(), format!("M-{}", name.len())));
        self
    }

    pub fn typology(mut self, name: &str) -> Self {
        self.typology = Some((name.to_string(), format!("T-{}", name.len()), false));
        self
    }

    pub fn period(mut self, period: &str) -> Self {
        self.period = Some(period.to_string());
        self
    }

    pub fn place(mut self, place: &str) -> Self {
        self.place = Some(place.to_string());
        self
    }
}

fn museum_fields() -> Fields {
    Fields::from(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("code", DataType::Utf8, true),
    ])
}

fn typology_fields() -> Fields {
    Fields::from(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("code", DataType::Utf8, true),
        Field::new("obsolete", DataType::Boolean, true),
    ])
}

/// Schema of the raw export: flat columns plus two struct references.
pub fn exhibit_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("periodStr", DataType::Utf8, true),
        Field::new("productionPlace", DataType::Utf8, true),
        Field::new("museum", DataType::Struct(museum_fields()), true),
        Field::new("typology", DataType::Struct(typology_fields()), true),
    ]))
}

pub fn exhibit_batch(rows: &[Exhibit]) -> RecordBatch {
    let ids: ArrayRef = Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id)));
    let names: ArrayRef = Arc::new(StringArray::from_iter(rows.iter().map(|r| r.name.as_deref())));
    let periods: ArrayRef =
        Arc::new(StringArray::from_iter(rows.iter().map(|r| r.period.as_deref())));
    let places: ArrayRef = Arc::new(StringArray::from_iter(rows.iter().map(|r| r.place.as_deref())));

    let museum = StructArray::try_new(
        museum_fields(),
        vec![
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.museum.as_ref().map(|m| m.0.as_str())),
            )) as ArrayRef,
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.museum.as_ref().map(|m| m.1.as_str())),
            )) as ArrayRef,
        ],
        Some(NullBuffer::from(
            rows.iter().map(|r| r.museum.is_some()).collect::<Vec<_>>(),
        )),
    )
    .unwrap();

    let typology = StructArray::try_new(
        typology_fields(),
        vec![
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.typology.as_ref().map(|t| t.0.as_str())),
            )) as ArrayRef,
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.typology.as_ref().map(|t| t.1.as_str())),
            )) as ArrayRef,
            Arc::new(BooleanArray::from_iter(
                rows.iter().map(|r| r.typology.as_ref().map(|t| t.2)),
            )) as ArrayRef,
        ],
        Some(NullBuffer::from(
            rows.iter().map(|r| r.typology.is_some()).collect::<Vec<_>>(),
        )),
    )
    .unwrap();

    RecordBatch::try_new(
        exhibit_schema(),
        vec![
            ids,
            names,
            periods,
            places,
            Arc::new(museum) as ArrayRef,
            Arc::new(typology) as ArrayRef,
        ],
    )
    .unwrap()
}

/// Write rows as a raw export, `per_group` rows per row group.
pub fn write_exhibits(path: &Path, rows: &[Exhibit], per_group: usize) -> PathBuf {
    let props = WriterProperties::builder()
        .set_max_row_group_size(per_group.max(1))
        .build();
    write_exhibits_with(path, rows, props)
}

/// Write rows as a raw export with explicit writer properties.
pub fn write_exhibits_with(path: &Path, rows: &[Exhibit], props: WriterProperties) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let per_group = props.max_row_group_size();
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, exhibit_schema(), Some(props)).unwrap();
    for chunk in rows.chunks(per_group.max(1)) {
        writer.write(&exhibit_batch(chunk)).unwrap();
    }
    writer.close().unwrap();
    path.to_path_buf()
}

/// A small but varied catalogue: `n` named exhibits across three museums,
/// with every fifth row unnamed.
pub fn catalogue(n: usize) -> Vec<Exhibit> {
    let museums = ["Эрмитаж", "Русский музей", "Музей Востока"];
    let typologies = ["Живопись", "Графика", "Нумизматика", "Археология"];
    let periods = ["XIX век", "XVIII век", "не установлен", "1900-е"];

    (0..n)
        .map(|i| {
            let name = if i % 5 == 4 {
                None
            } else {
                Some(format!("Предмет {}", i))
            };
            let mut e = Exhibit::new(i as i64, name.as_deref())
                .museum(museums[i % museums.len()])
                .typology(typologies[i % typologies.len()])
                .period(periods[i % periods.len()]);
            if i % 2 == 0 {
                e = e.place("Санкт-Петербург");
            }
            e
        })
        .collect()
}
