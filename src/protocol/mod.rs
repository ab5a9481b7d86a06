//! Timestream Protocol
//!
//! Boundary between the bridge and the vendor SDK.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                    Application code                         |
//! +-------------------------------------------------------------+
//! |  TimestreamService: write / batch_write / query             |
//! +-------------------------------------------------------------+
//! |  IngestionClient::write_records   QueryClient::query        |
//! +-------------------------------------------------------------+
//! |  Vendor SDK (networking, auth, retries, serialization)      |
//! +-------------------------------------------------------------+
//! ```
//!
//! # Module Structure
//!
//! - `wire` - Request and response shapes (`WriteRequest`, `QueryPage`, etc.)
//! - `client` - Client traits and structured API errors

pub mod client;
pub mod wire;

pub use client::{IngestionClient, QueryApiError, QueryClient, WriteApiError};
pub use wire::{
    params_value, ColumnInfo, ColumnType, Datum, Dimension, QueryPage, QueryRequest, QueryStatus,
    Record, RejectedRecord, ResponseMetadata, Row, WriteRecordsResponse, WriteRequest,
};
