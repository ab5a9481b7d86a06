//! Error types for the Timestream bridge.

use crate::protocol::client::{QueryApiError, WriteApiError};
use crate::protocol::wire::Record;
use serde::Serialize;
use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge errors. None of them are retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Ingestion did not complete successfully
    #[error(transparent)]
    Write(#[from] WriteFailure),

    /// A query page request failed
    #[error(transparent)]
    Query(#[from] QueryFailure),

    /// Column declared a scalar type outside the supported set
    #[error("Unknown data type from Timestream: {scalar_type}")]
    UnknownScalarType { scalar_type: String },

    /// Timestamp cell text did not match the service format
    #[error("Malformed {scalar_type} value: {value:?}")]
    MalformedScalar { scalar_type: String, value: String },

    /// Row cell count does not match the column metadata
    #[error("Row has {cells} cells but the query returned {columns} columns")]
    MalformedRow { cells: usize, columns: usize },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Error::Config(Box::new(e))
    }
}

/// A record the service refused, paired with the record that was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RejectedRecordDetail {
    pub record_index: usize,
    /// `None` when the service reports an index outside the submitted batch
    pub record: Option<Record>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
}

/// Failed ingestion call.
#[derive(Error, Debug)]
pub enum WriteFailure {
    /// The service rejected individual records of the batch
    #[error("Failed to write to Timestream: {} record(s) rejected", records.len())]
    Rejected { records: Vec<RejectedRecordDetail> },

    /// The submission itself failed
    #[error("Failed to write to Timestream: {0}")]
    Submission(#[source] WriteApiError),

    /// The call returned without error but with a non-success status code
    #[error("Failed to write to Timestream: status code {status_code}")]
    Status { status_code: u16 },
}

impl WriteFailure {
    /// Per-record rejection detail, empty unless the batch was partially rejected
    pub fn rejected_records(&self) -> &[RejectedRecordDetail] {
        match self {
            WriteFailure::Rejected { records } => records,
            _ => &[],
        }
    }

    /// Status code for the non-success status case
    pub fn status_code(&self) -> Option<u16> {
        match self {
            WriteFailure::Status { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

/// Failed query page, with the parameters used for that attempt.
#[derive(Error, Debug)]
#[error("Failed to query Timestream: {source}")]
pub struct QueryFailure {
    #[source]
    pub source: QueryApiError,
    pub params: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scalar_type_message() {
        let err = Error::UnknownScalarType {
            scalar_type: "BOOLEAN".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown data type from Timestream: BOOLEAN");
    }

    #[test]
    fn test_write_failure_accessors() {
        let status = WriteFailure::Status { status_code: 500 };
        assert_eq!(status.status_code(), Some(500));
        assert!(status.rejected_records().is_empty());
        assert_eq!(
            status.to_string(),
            "Failed to write to Timestream: status code 500"
        );

        let rejected = WriteFailure::Rejected {
            records: vec![RejectedRecordDetail {
                record_index: 1,
                record: None,
                reason: "bad".to_string(),
                existing_version: None,
            }],
        };
        assert_eq!(rejected.status_code(), None);
        assert_eq!(rejected.rejected_records().len(), 1);
    }

    #[test]
    fn test_query_failure_source_chain() {
        let failure = QueryFailure {
            source: QueryApiError::new("ValidationException", "syntax error"),
            params: serde_json::json!({ "QueryString": "SELECT" }),
        };
        let err: Error = failure.into();
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("syntax error"));
    }
}
