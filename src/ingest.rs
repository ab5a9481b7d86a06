//! Write Forwarder
//!
//! Submits a [`WriteRequest`] to the ingestion API in a single call and
//! classifies what came back. There is no batching, splitting or retrying:
//! a failed attempt is final.

use tracing::{debug, warn};

use crate::error::{RejectedRecordDetail, Result, WriteFailure};
use crate::protocol::client::{IngestionClient, WriteApiError};
use crate::protocol::wire::{RejectedRecord, WriteRequest};

/// Status code of a successful ingestion call
pub const SUCCESS_STATUS: u16 = 200;

/// Classified result of one ingestion call.
#[derive(Debug)]
pub enum WriteOutcome {
    Success,
    /// The service rejected individual records
    Rejected(Vec<RejectedRecordDetail>),
    /// The submission failed for any other reason
    Failed(WriteApiError),
    /// No error, but the status code was not 200 (0 when absent)
    UnexpectedStatus(u16),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }

    pub fn into_result(self) -> std::result::Result<(), WriteFailure> {
        match self {
            WriteOutcome::Success => Ok(()),
            WriteOutcome::Rejected(records) => Err(WriteFailure::Rejected { records }),
            WriteOutcome::Failed(error) => Err(WriteFailure::Submission(error)),
            WriteOutcome::UnexpectedStatus(status_code) => {
                Err(WriteFailure::Status { status_code })
            }
        }
    }
}

/// Pair each rejection with the record it refers to.
pub fn rejected_details(
    request: &WriteRequest,
    rejected: &[RejectedRecord],
) -> Vec<RejectedRecordDetail> {
    rejected
        .iter()
        .map(|r| RejectedRecordDetail {
            record_index: r.record_index,
            record: request.records.get(r.record_index).cloned(),
            reason: r.reason.clone(),
            existing_version: r.existing_version,
        })
        .collect()
}

/// Forwards ingestion requests to an [`IngestionClient`].
#[derive(Debug, Clone)]
pub struct WriteForwarder<C> {
    client: C,
}

impl<C: IngestionClient> WriteForwarder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit `request` and classify the response
    pub fn submit(&self, request: &WriteRequest) -> WriteOutcome {
        match self.client.write_records(request) {
            Ok(response) => match response.metadata.status_code {
                Some(SUCCESS_STATUS) => WriteOutcome::Success,
                status => {
                    let status = status.unwrap_or(0);
                    debug!(
                        status_code = status,
                        payload = %request.to_params(),
                        "write_unexpected_status"
                    );
                    WriteOutcome::UnexpectedStatus(status)
                }
            },
            Err(error) if error.is_rejection() => {
                let details = rejected_details(request, &error.rejected_records);
                warn!(
                    table = %request.table_name,
                    rejected = details.len(),
                    submitted = request.records.len(),
                    "write_records_rejected"
                );
                WriteOutcome::Rejected(details)
            }
            Err(error) => {
                warn!(table = %request.table_name, error = %error, "write_submission_failed");
                WriteOutcome::Failed(error)
            }
        }
    }

    /// Submit `request`, failing on anything but a clean 200
    pub fn ingest(&self, request: &WriteRequest) -> Result<()> {
        self.submit(request).into_result()?;
        Ok(())
    }
}
