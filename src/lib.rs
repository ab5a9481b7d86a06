//! # Timestream Bridge
//!
//! A thin adaptation layer between application code and Amazon Timestream.
//!
//! The bridge forwards ingestion requests, follows query pagination cursors
//! and reshapes Timestream's column-oriented pages into keyed records with
//! typed scalars. Networking, authentication and retries stay with the vendor
//! SDK, reached through the [`IngestionClient`] and [`QueryClient`] traits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use timestream_bridge::{Config, QueryRequest, Record, TimestreamService, WriteRequest};
//!
//! let config = Config::load()?;
//! let service = TimestreamService::from_config(write_client, query_client, &config);
//!
//! service.write(
//!     &WriteRequest::new("metrics", "cpu")
//!         .with_record(Record::new("usage", "0.42", "DOUBLE").with_dimension("host", "web-1")),
//! )?;
//!
//! for record in service.query(&QueryRequest::new("SELECT * FROM metrics.cpu"))? {
//!     println!("{:?}", record.get("usage"));
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `protocol` | Wire shapes and client traits |
//! | `value` | Typed scalars and declared column types |
//! | `mapper` | Row-oriented reshaping and scalar coercion |
//! | `pagination` | Cursor-following query execution |
//! | `ingest` | Single-call ingestion with outcome classification |
//! | `service` | Public facade |
//! | `config` | Layered configuration |
//! | `logging` | Tracing subscriber setup |

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod mapper;
pub mod pagination;
pub mod protocol;
pub mod service;
pub mod value;

pub use config::{Config, LoggingConfig, PaginationStrategy, QuerySettings};
pub use error::{Error, QueryFailure, RejectedRecordDetail, Result, WriteFailure};
pub use ingest::{WriteForwarder, WriteOutcome};
pub use mapper::{map_page, map_row, strip_namespace, FormattedRecord};
pub use pagination::QueryPaginator;
pub use protocol::{
    params_value, ColumnInfo, Datum, IngestionClient, QueryApiError, QueryClient, QueryPage,
    QueryRequest, Record, RejectedRecord, Row, WriteApiError, WriteRecordsResponse, WriteRequest,
};
pub use service::TimestreamService;
pub use value::{ScalarType, ScalarValue};
