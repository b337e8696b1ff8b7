//! Status checks that keep a completed response from being overwritten.
//!
//! The store performs the check immediately before writing; the guard itself
//! holds no state.

use time::OffsetDateTime;

use crate::error::{SubmissionAttempt, SubmissionError};
use crate::progress::{ResponseMetadata, ResponseRecord, ResponseStatus};
use crate::responses::ResponseMap;

fn check(
    record: Option<&ResponseRecord>,
    attempt: SubmissionAttempt,
) -> Result<(), SubmissionError> {
    match record {
        Some(record) if record.status == Some(ResponseStatus::Completed) => {
            tracing::debug!(
                email = %record.respondent_email,
                %attempt,
                "rejecting write to completed response"
            );
            Err(SubmissionError::AlreadyCompleted {
                email: record.respondent_email.clone(),
                status: ResponseStatus::Completed,
                attempt,
            })
        }
        _ => Ok(()),
    }
}

pub fn check_autosave(record: Option<&ResponseRecord>) -> Result<(), SubmissionError> {
    check(record, SubmissionAttempt::Autosave)
}

pub fn check_submit(record: Option<&ResponseRecord>) -> Result<(), SubmissionError> {
    check(record, SubmissionAttempt::Submit)
}

impl ResponseRecord {
    /// Stores an in-progress snapshot. `time_spent_delta` is added to the running total.
    pub fn record_autosave(
        &mut self,
        responses: &ResponseMap,
        metadata: ResponseMetadata,
        time_spent_delta: u64,
        now: OffsetDateTime,
    ) -> Result<(), SubmissionError> {
        check_autosave(Some(&*self))?;
        self.status = Some(ResponseStatus::InProgress);
        self.responses = responses.clone();
        self.metadata = ResponseMetadata {
            last_page_index: metadata.last_page_index,
            time_spent: self.metadata.time_spent.saturating_add(time_spent_delta),
            pages_visited: metadata.pages_visited,
        };
        self.last_updated = Some(now);
        Ok(())
    }

    /// Marks the response as the single accepted final submission.
    pub fn complete(
        &mut self,
        responses: &ResponseMap,
        now: OffsetDateTime,
    ) -> Result<(), SubmissionError> {
        check_submit(Some(&*self))?;
        self.status = Some(ResponseStatus::Completed);
        self.responses = responses.clone();
        self.last_updated = Some(now);
        Ok(())
    }
}
