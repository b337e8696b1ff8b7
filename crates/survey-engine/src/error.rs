use displaydoc::Display;
use thiserror::Error;

use crate::progress::ResponseStatus;

/// Failures while loading author-supplied survey documents.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("invalid survey document: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Rejections raised by the submission guard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("response from {email} is already {status:?}; {attempt} rejected")]
    AlreadyCompleted {
        email: String,
        status: ResponseStatus,
        attempt: SubmissionAttempt,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SubmissionAttempt {
    /// auto-save
    Autosave,
    /// final submission
    Submit,
}
