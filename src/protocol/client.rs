//! Client seams to the vendor SDK.
//!
//! The bridge never talks to the network itself. An SDK-backed type
//! implements these traits; tests use scripted in-memory implementations.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::wire::{QueryPage, QueryRequest, RejectedRecord, WriteRecordsResponse, WriteRequest};

/// Error code the service uses for partially rejected batches
pub const REJECTED_RECORDS_CODE: &str = "RejectedRecordsException";

/// Structured error raised by the ingestion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct WriteApiError {
    pub code: String,
    pub message: String,
    /// Present only for `RejectedRecordsException`
    #[serde(default)]
    pub rejected_records: Vec<RejectedRecord>,
}

impl WriteApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            rejected_records: Vec::new(),
        }
    }

    /// A `RejectedRecordsException` carrying the given rejections
    pub fn rejected(rejected_records: Vec<RejectedRecord>) -> Self {
        Self {
            code: REJECTED_RECORDS_CODE.to_string(),
            message: "One or more records have been rejected".to_string(),
            rejected_records,
        }
    }

    pub fn is_rejection(&self) -> bool {
        self.code == REJECTED_RECORDS_CODE
    }
}

/// Structured error raised by the query API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct QueryApiError {
    pub code: String,
    pub message: String,
}

impl QueryApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ingestion side of the service.
pub trait IngestionClient {
    /// Submit one batch. Implementations must not retry on the bridge's behalf
    /// beyond what the SDK itself does.
    fn write_records(&self, request: &WriteRequest)
        -> Result<WriteRecordsResponse, WriteApiError>;
}

/// Query side of the service.
pub trait QueryClient {
    /// Fetch one page of results
    fn query(&self, request: &QueryRequest) -> Result<QueryPage, QueryApiError>;
}

impl<T: IngestionClient + ?Sized> IngestionClient for &T {
    fn write_records(
        &self,
        request: &WriteRequest,
    ) -> Result<WriteRecordsResponse, WriteApiError> {
        (**self).write_records(request)
    }
}

impl<T: IngestionClient + ?Sized> IngestionClient for Box<T> {
    fn write_records(
        &self,
        request: &WriteRequest,
    ) -> Result<WriteRecordsResponse, WriteApiError> {
        (**self).write_records(request)
    }
}

impl<T: IngestionClient + ?Sized> IngestionClient for Arc<T> {
    fn write_records(
        &self,
        request: &WriteRequest,
    ) -> Result<WriteRecordsResponse, WriteApiError> {
        (**self).write_records(request)
    }
}

impl<T: QueryClient + ?Sized> QueryClient for &T {
    fn query(&self, request: &QueryRequest) -> Result<QueryPage, QueryApiError> {
        (**self).query(request)
    }
}

impl<T: QueryClient + ?Sized> QueryClient for Box<T> {
    fn query(&self, request: &QueryRequest) -> Result<QueryPage, QueryApiError> {
        (**self).query(request)
    }
}

impl<T: QueryClient + ?Sized> QueryClient for Arc<T> {
    fn query(&self, request: &QueryRequest) -> Result<QueryPage, QueryApiError> {
        (**self).query(request)
    }
}
