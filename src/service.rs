//! Service Facade
//!
//! Single entry point for application code: `write`, `batch_write` and
//! `query`, composed from the [`WriteForwarder`] and [`QueryPaginator`].

use crate::config::{Config, QuerySettings};
use crate::error::Result;
use crate::ingest::WriteForwarder;
use crate::mapper::FormattedRecord;
use crate::pagination::QueryPaginator;
use crate::protocol::client::{IngestionClient, QueryClient};
use crate::protocol::wire::{QueryRequest, WriteRequest};

/// Timestream write and query entry point.
#[derive(Debug, Clone)]
pub struct TimestreamService<W, Q> {
    writer: WriteForwarder<W>,
    reader: QueryPaginator<Q>,
}

impl<W: IngestionClient, Q: QueryClient> TimestreamService<W, Q> {
    pub fn new(writer: W, reader: Q, settings: QuerySettings) -> Self {
        Self {
            writer: WriteForwarder::new(writer),
            reader: QueryPaginator::new(reader, settings),
        }
    }

    pub fn from_config(writer: W, reader: Q, config: &Config) -> Self {
        Self::new(writer, reader, config.query)
    }

    /// Ingestion client
    pub fn writer(&self) -> &W {
        self.writer.client()
    }

    /// Query client
    pub fn reader(&self) -> &Q {
        self.reader.client()
    }

    pub fn write(&self, request: &WriteRequest) -> Result<()> {
        self.writer.ingest(request)
    }

    /// Same contract as [`write`](Self::write); the request is sent as one call
    pub fn batch_write(&self, request: &WriteRequest) -> Result<()> {
        self.writer.ingest(request)
    }

    pub fn query(&self, request: &QueryRequest) -> Result<Vec<FormattedRecord>> {
        self.reader.query(request)
    }
}
