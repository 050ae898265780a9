//! Column addressing for flat and struct-nested Parquet fields.

use std::fmt;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::kernels::boolean::is_null;
use arrow::compute::kernels::cast::cast;
use arrow::compute::kernels::nullif::nullif;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::{HeritageError, Result};

/// A reference to a column, either top-level or one level inside a struct.
///
/// Parsed from text: `"name"` addresses a root column, `"museum.name"`
/// addresses the `name` child of the `museum` struct column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldPath {
    Column(String),
    Nested { parent: String, child: String },
}

impl FieldPath {
    /// Address a top-level column.
    pub fn column(name: impl Into<String>) -> Self {
        FieldPath::Column(name.into())
    }

    /// Address a child field of a struct column.
    pub fn nested(parent: impl Into<String>, child: impl Into<String>) -> Self {
        FieldPath::Nested {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// The top-level column this path reads from.
    pub fn root(&self) -> &str {
        match self {
            FieldPath::Column(name) => name,
            FieldPath::Nested { parent, .. } => parent,
        }
    }

    /// Resolve against a schema, failing if the field is absent.
    pub fn resolve(&self, schema: &Schema) -> Result<ColumnLocator> {
        self.try_resolve(schema)
            .ok_or_else(|| HeritageError::missing_column(self.to_string()))
    }

    /// Resolve against a schema, returning `None` if the field is absent.
    pub fn try_resolve(&self, schema: &Schema) -> Option<ColumnLocator> {
        let (root, field) = schema.column_with_name(self.root())?;
        match self {
            FieldPath::Column(_) => Some(ColumnLocator {
                root,
                child: None,
                data_type: field.data_type().clone(),
            }),
            FieldPath::Nested { child, .. } => match field.data_type() {
                DataType::Struct(fields) => {
                    let (index, child_field) = fields.find(child)?;
                    Some(ColumnLocator {
                        root,
                        child: Some(index),
                        data_type: child_field.data_type().clone(),
                    })
                }
                _ => None,
            },
        }
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        match value.split_once('.') {
            Some((parent, child)) if !parent.is_empty() && !child.is_empty() => {
                FieldPath::nested(parent, child)
            }
            _ => FieldPath::column(value),
        }
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        FieldPath::from(value.as_str())
    }
}

impl From<FieldPath> for String {
    fn from(value: FieldPath) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Column(name) => write!(f, "{}", name),
            FieldPath::Nested { parent, child } => write!(f, "{}.{}", parent, child),
        }
    }
}

/// A [`FieldPath`] bound to column positions in a specific schema.
///
/// Only valid for batches that share the schema it was resolved against.
#[derive(Debug, Clone)]
pub struct ColumnLocator {
    root: usize,
    child: Option<usize>,
    data_type: DataType,
}

impl ColumnLocator {
    /// Arrow type of the addressed values.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Pull the addressed column out of a batch.
    ///
    /// For nested fields, rows where the parent struct is null come back
    /// as null regardless of what the child buffer holds.
    pub fn extract(&self, batch: &RecordBatch) -> Result<ArrayRef> {
        let column = batch.column(self.root);
        let Some(child) = self.child else {
            return Ok(column.clone());
        };

        let parent = column.as_struct_opt().ok_or_else(|| {
            HeritageError::Config(format!(
                "column at position {} is not a struct",
                self.root
            ))
        })?;
        let values = parent.column(child).clone();
        if parent.null_count() == 0 {
            return Ok(values);
        }
        let parent_nulls = is_null(parent)?;
        Ok(nullif(&values, &parent_nulls)?)
    }

    /// Extract the column rendered as UTF-8 text.
    pub fn extract_text(&self, batch: &RecordBatch) -> Result<StringArray> {
        let array = self.extract(batch)?;
        let text = match array.data_type() {
            DataType::Utf8 => array,
            _ => cast(&array, &DataType::Utf8)?,
        };
        Ok(text.as_string::<i32>().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StructArray};
    use arrow::buffer::NullBuffer;
    use arrow::datatypes::{Field, Fields};

    fn museum_batch() -> RecordBatch {
        let fields = Fields::from(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("code", DataType::Int64, true),
        ]);
        let museum = StructArray::try_new(
            fields.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Hermitage", "Kunstkamera", "Tretyakov"]))
                    as ArrayRef,
                Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
            ],
            Some(NullBuffer::from(vec![true, false, true])),
        )
        .unwrap();
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("museum", DataType::Struct(fields), true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![10, 11, 12])) as ArrayRef,
                Arc::new(museum) as ArrayRef,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parse_field_path() {
        assert_eq!(FieldPath::from("name"), FieldPath::column("name"));
        assert_eq!(
            FieldPath::from("museum.name"),
            FieldPath::nested("museum", "name")
        );
        assert_eq!(FieldPath::from(".name"), FieldPath::column(".name"));
        assert_eq!(FieldPath::nested("museum", "code").to_string(), "museum.code");
    }

    #[test]
    fn test_resolve_missing_field() {
        let batch = museum_batch();
        let schema = batch.schema();
        assert!(FieldPath::from("museum.name").try_resolve(&schema).is_some());
        assert!(FieldPath::from("museum.title").try_resolve(&schema).is_none());
        assert!(FieldPath::from("id.name").try_resolve(&schema).is_none());
        assert!(matches!(
            FieldPath::from("typology").resolve(&schema),
            Err(HeritageError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_nested_extract_respects_parent_nulls() {
        let batch = museum_batch();
        let locator = FieldPath::from("museum.name").resolve(&batch.schema()).unwrap();
        let names = locator.extract_text(&batch).unwrap();

        assert_eq!(names.len(), 3);
        assert_eq!(names.value(0), "Hermitage");
        assert!(names.is_null(1));
        assert_eq!(names.value(2), "Tretyakov");
    }

    #[test]
    fn test_extract_text_casts_numbers() {
        let batch = museum_batch();
        let locator = FieldPath::from("museum.code").resolve(&batch.schema()).unwrap();
        let codes = locator.extract_text(&batch).unwrap();
        assert_eq!(codes.value(0), "1");
        assert!(codes.is_null(1));

        let ids = FieldPath::from("id").resolve(&batch.schema()).unwrap();
        assert_eq!(ids.extract_text(&batch).unwrap().value(2), "12");
    }
}
