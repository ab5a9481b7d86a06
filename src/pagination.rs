//! Query Paginator
//!
//! Follows Timestream's continuation cursor one page at a time and maps the
//! result rows into [`FormattedRecord`]s.
//!
//! ```text
//! QueryRequest ──► query ──► page (NextToken?) ──► query(+NextToken) ──► ... ──► last page
//!                                                                                  │
//!                                                                       mapper::map_page
//! ```
//!
//! Under [`PaginationStrategy::LastPage`] every page replaces the previous
//! one and only the final page is mapped. [`PaginationStrategy::Concatenate`]
//! maps each page as it arrives.

use tracing::{debug, warn};

use crate::config::{PaginationStrategy, QuerySettings};
use crate::error::{Error, QueryFailure, Result};
use crate::mapper::{self, FormattedRecord};
use crate::protocol::client::QueryClient;
use crate::protocol::wire::{params_value, QueryPage, QueryRequest};

/// Issues paged queries against a [`QueryClient`].
#[derive(Debug, Clone)]
pub struct QueryPaginator<C> {
    client: C,
    settings: QuerySettings,
}

impl<C: QueryClient> QueryPaginator<C> {
    pub fn new(client: C, settings: QuerySettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn settings(&self) -> QuerySettings {
        self.settings
    }

    /// Run `request` to completion and return the mapped records
    pub fn query(&self, request: &QueryRequest) -> Result<Vec<FormattedRecord>> {
        let mut records = Vec::new();
        let mut page = self.fetch(request)?;

        while let Some(token) = page.next_token.take().filter(|t| !t.is_empty()) {
            if self.settings.pagination == PaginationStrategy::Concatenate {
                records.extend(self.map(&page)?);
            }
            page = self.fetch(&request.with_next_token(token))?;
        }

        records.extend(self.map(&page)?);
        Ok(records)
    }

    fn fetch(&self, request: &QueryRequest) -> Result<QueryPage> {
        let params = request.to_params();
        if self.settings.debug_query {
            debug!(params = %params, "timestream_query");
        }

        self.client.query(request).map_err(|source| {
            warn!(error = %source, resumed = request.next_token.is_some(), "query_page_failed");
            Error::from(QueryFailure { source, params })
        })
    }

    fn map(&self, page: &QueryPage) -> Result<Vec<FormattedRecord>> {
        if self.settings.debug_query {
            let status = params_value(&page.query_status);
            let columns = params_value(&page.column_info);
            debug!(query_id = ?page.query_id, status = %status, "query_status");
            debug!(query_id = ?page.query_id, columns = %columns, "query_metadata");
        }
        mapper::map_page(page).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::client::QueryApiError;
    use crate::protocol::wire::{ColumnInfo, Datum, Row};
    use std::cell::RefCell;

    struct Pages {
        pages: RefCell<Vec<QueryPage>>,
        seen: RefCell<Vec<QueryRequest>>,
    }

    impl QueryClient for Pages {
        fn query(&self, request: &QueryRequest) -> std::result::Result<QueryPage, QueryApiError> {
            self.seen.borrow_mut().push(request.clone());
            let mut pages = self.pages.borrow_mut();
            if pages.is_empty() {
                return Err(QueryApiError::new("InternalServerException", "no page"));
            }
            Ok(pages.remove(0))
        }
    }

    fn page(value: &str) -> QueryPage {
        QueryPage::new(
            vec![ColumnInfo::scalar("v::VARCHAR", "VARCHAR")],
            vec![Row::new(vec![Datum::scalar(value)])],
        )
    }

    #[test]
    fn test_single_page() {
        let client = Pages {
            pages: RefCell::new(vec![page("a")]),
            seen: RefCell::new(Vec::new()),
        };
        let paginator = QueryPaginator::new(&client, QuerySettings::default());
        let records = paginator.query(&QueryRequest::new("SELECT")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(client.seen.borrow().len(), 1);
        assert_eq!(client.seen.borrow()[0].next_token, None);
    }

    #[test]
    fn test_cursor_is_attached() {
        let client = Pages {
            pages: RefCell::new(vec![page("a").with_next_token("t1"), page("b")]),
            seen: RefCell::new(Vec::new()),
        };
        let paginator = QueryPaginator::new(&client, QuerySettings::default());
        paginator.query(&QueryRequest::new("SELECT")).unwrap();

        let seen = client.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].next_token.as_deref(), Some("t1"));
        assert_eq!(seen[1].query_string, "SELECT");
    }
}
