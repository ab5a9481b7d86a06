//! Result Row Mapper
//!
//! Reshapes Timestream's column-oriented pages into keyed records.
//!
//! Column names carry a `::`-delimited suffix (`cpu::DOUBLE`); the field name
//! is everything before the last delimiter. Several columns may derive the
//! same field: the first non-null value wins, but a null never blocks a later
//! column from filling the field.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::protocol::wire::{ColumnInfo, QueryPage, Row};
use crate::value::{ScalarType, ScalarValue};

/// Namespace delimiter in column names
pub const NAMESPACE_DELIMITER: &str = "::";

/// Insertion-ordered record produced from one result row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedRecord {
    fields: Vec<(String, ScalarValue)>,
}

impl FormattedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&ScalarValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Set `field` unless it already holds a non-null value
    pub fn fill(&mut self, field: String, value: ScalarValue) {
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) if slot.is_null() => *slot = value,
            Some(_) => {}
            None => self.fields.push((field, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_fields(self) -> Vec<(String, ScalarValue)> {
        self.fields
    }
}

impl Serialize for FormattedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a FormattedRecord {
    type Item = &'a (String, ScalarValue);
    type IntoIter = std::slice::Iter<'a, (String, ScalarValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Strip the trailing `::` suffix from a column name.
///
/// Names without the delimiter are returned unchanged.
pub fn strip_namespace(name: &str) -> &str {
    match name.rfind(NAMESPACE_DELIMITER) {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Coerce one cell according to its column's declared type tag.
///
/// Null cells are `Null` whatever the declared type, including unknown tags.
pub fn coerce(scalar_type: Option<&str>, value: Option<&str>) -> Result<ScalarValue> {
    let Some(value) = value else {
        return Ok(ScalarValue::Null);
    };
    let Some(tag) = scalar_type else {
        return Err(Error::UnknownScalarType {
            scalar_type: String::new(),
        });
    };
    tag.parse::<ScalarType>()?.coerce(value)
}

/// Map one row against the page's column metadata.
pub fn map_row(row: &Row, columns: &[ColumnInfo]) -> Result<FormattedRecord> {
    if row.data.len() != columns.len() {
        return Err(Error::MalformedRow {
            cells: row.data.len(),
            columns: columns.len(),
        });
    }

    let mut record = FormattedRecord::new();
    for (datum, column) in row.data.iter().zip(columns) {
        let field = strip_namespace(column.name.as_deref().unwrap_or_default());
        if record.get(field).is_some_and(|v| !v.is_null()) {
            continue;
        }
        let value = coerce(column.scalar_type(), datum.as_scalar())?;
        record.fill(field.to_string(), value);
    }
    Ok(record)
}

/// Map every row of a page, in order. Single pass; collect to reuse.
pub fn map_page(page: &QueryPage) -> impl Iterator<Item = Result<FormattedRecord>> + '_ {
    page.rows
        .iter()
        .map(move |row| map_row(row, &page.column_info))
}
