//! Shared helpers for integration tests: scripted clients and log capture.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use timestream_bridge::{
    ColumnInfo, Datum, IngestionClient, QueryApiError, QueryClient, QueryPage, QueryRequest, Row,
    WriteApiError, WriteRecordsResponse, WriteRequest,
};
use tracing_subscriber::fmt::MakeWriter;

/// Ingestion client returning one scripted result and recording every call.
pub struct ScriptedIngestion {
    result: Result<WriteRecordsResponse, WriteApiError>,
    pub calls: RefCell<Vec<WriteRequest>>,
}

impl ScriptedIngestion {
    pub fn returning(result: Result<WriteRecordsResponse, WriteApiError>) -> Self {
        Self {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn ok() -> Self {
        Self::returning(Ok(WriteRecordsResponse::with_status(200)))
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl IngestionClient for ScriptedIngestion {
    fn write_records(
        &self,
        request: &WriteRequest,
    ) -> Result<WriteRecordsResponse, WriteApiError> {
        self.calls.borrow_mut().push(request.clone());
        self.result.clone()
    }
}

/// Query client serving scripted pages in order and recording every request.
pub struct ScriptedQuery {
    pages: RefCell<VecDeque<Result<QueryPage, QueryApiError>>>,
    pub requests: RefCell<Vec<QueryRequest>>,
}

impl ScriptedQuery {
    pub fn new(pages: Vec<Result<QueryPage, QueryApiError>>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn pages(pages: Vec<QueryPage>) -> Self {
        Self::new(pages.into_iter().map(Ok).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl QueryClient for ScriptedQuery {
    fn query(&self, request: &QueryRequest) -> Result<QueryPage, QueryApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(QueryApiError::new("ScriptExhausted", "no more pages")))
    }
}

/// Single-column `VARCHAR` page holding `values`, one per row.
pub fn text_page(values: &[&str]) -> QueryPage {
    QueryPage::new(
        vec![ColumnInfo::scalar("value::VARCHAR", "VARCHAR")],
        values
            .iter()
            .map(|v| Row::new(vec![Datum::scalar(*v)]))
            .collect(),
    )
}

/// In-memory writer for capturing formatted `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of captured lines containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a debug-level subscriber writing into the returned capture.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}
