//! Wire Format Types
//!
//! Serializable shapes of the Timestream write and query APIs. Field names
//! follow the service's PascalCase convention so that `to_params()` yields
//! exactly what the SDK would send, which is what ends up in diagnostic logs.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Serialize `value` for diagnostics and error context.
///
/// A value that cannot be represented as JSON is logged and replaced by
/// `null`.
pub fn params_value<T: Serialize + ?Sized>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "params_serialization_failed");
        serde_json::Value::Null
    })
}

// ============================================================================
// Write API
// ============================================================================

/// Dimension attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_value_type: Option<String>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            dimension_value_type: None,
        }
    }
}

/// A single time-series record.
///
/// Every field is optional on the wire because the same shape doubles as the
/// `CommonAttributes` template of a [`WriteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl Record {
    /// Create a record with a single measure
    pub fn new(
        measure_name: impl Into<String>,
        measure_value: impl Into<String>,
        measure_value_type: impl Into<String>,
    ) -> Self {
        Self {
            measure_name: Some(measure_name.into()),
            measure_value: Some(measure_value.into()),
            measure_value_type: Some(measure_value_type.into()),
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Dimension::new(name, value));
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_time_unit(mut self, time_unit: impl Into<String>) -> Self {
        self.time_unit = Some(time_unit.into());
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }
}

/// Payload of one ingestion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteRequest {
    pub database_name: String,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_attributes: Option<Record>,
    pub records: Vec<Record>,
}

impl WriteRequest {
    pub fn new(database_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
            common_attributes: None,
            records: Vec::new(),
        }
    }

    pub fn with_common_attributes(mut self, common: Record) -> Self {
        self.common_attributes = Some(common);
        self
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records.extend(records);
        self
    }

    /// Parameters in the service's wire shape
    pub fn to_params(&self) -> serde_json::Value {
        params_value(self)
    }
}

/// Response metadata attached by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Ingested record counts reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordsIngested {
    pub total: u64,
    pub memory_store: u64,
    pub magnetic_store: u64,
}

/// Result of a successful `WriteRecords` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WriteRecordsResponse {
    #[serde(rename = "@metadata", default)]
    pub metadata: ResponseMetadata,
    #[serde(rename = "RecordsIngested", default)]
    pub records_ingested: Option<RecordsIngested>,
}

impl WriteRecordsResponse {
    /// Response carrying only a status code
    pub fn with_status(status_code: u16) -> Self {
        Self {
            metadata: ResponseMetadata {
                status_code: Some(status_code),
                request_id: None,
            },
            records_ingested: None,
        }
    }
}

/// Per-record rejection reported by a `RejectedRecordsException`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RejectedRecord {
    pub record_index: usize,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
}

// ============================================================================
// Query API
// ============================================================================

/// Payload of one query call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    pub query_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl QueryRequest {
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
            max_rows: None,
            client_token: None,
            next_token: None,
        }
    }

    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn with_client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }

    /// Copy of this request resuming at `token`
    pub fn with_next_token(&self, token: impl Into<String>) -> Self {
        Self {
            next_token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Parameters in the service's wire shape
    pub fn to_params(&self) -> serde_json::Value {
        params_value(self)
    }
}

/// Column type descriptor. Only scalar columns carry a `ScalarType` tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar_type: Option<String>,
}

/// Column descriptor. Names use a `name::TYPE` convention.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Type", default)]
    pub column_type: ColumnType,
}

impl ColumnInfo {
    /// Create a scalar column
    pub fn scalar(name: impl Into<String>, scalar_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            column_type: ColumnType {
                scalar_type: Some(scalar_type.into()),
            },
        }
    }

    pub fn scalar_type(&self) -> Option<&str> {
        self.column_type.scalar_type.as_deref()
    }
}

/// One cell of a result row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_value: Option<bool>,
}

impl Datum {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            scalar_value: Some(value.into()),
            null_value: None,
        }
    }

    pub fn null() -> Self {
        Self {
            scalar_value: None,
            null_value: Some(true),
        }
    }

    /// Scalar text, `None` for null and non-scalar cells
    pub fn as_scalar(&self) -> Option<&str> {
        if self.null_value == Some(true) {
            return None;
        }
        self.scalar_value.as_deref()
    }
}

/// Result row, positionally aligned with the page's column info.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    pub data: Vec<Datum>,
}

impl Row {
    pub fn new(data: Vec<Datum>) -> Self {
        Self { data }
    }
}

/// Execution progress reported with every page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryStatus {
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub cumulative_bytes_scanned: Option<u64>,
    #[serde(default)]
    pub cumulative_bytes_metered: Option<u64>,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryPage {
    #[serde(default)]
    pub query_id: Option<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub column_info: Vec<ColumnInfo>,
    #[serde(default)]
    pub query_status: Option<QueryStatus>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl QueryPage {
    pub fn new(column_info: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            rows,
            column_info,
            ..Self::default()
        }
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Whether another page follows this one. An empty cursor ends the
    /// result set.
    pub fn has_more(&self) -> bool {
        self.next_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
