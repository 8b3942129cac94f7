//! Error types for the portal HTTP collaborators.

use aspect_model::RowId;
use aspect_validate::INVALID_DATA_MESSAGE;
use thiserror::Error;

/// Errors raised while talking to the portal backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// Submission was blocked before any request was issued: the table is
    /// empty or one or more rows fail the business rule.
    #[error("{}", invalid_rows_message(.invalid))]
    InvalidRows {
        /// Ids of the failing rows; empty when the table itself was empty.
        invalid: Vec<RowId>,
    },

    /// Network-level failure (DNS, connect, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {message}")]
    UnexpectedStatus {
        status: u16,
        message: String,
    },
}

fn invalid_rows_message(invalid: &[RowId]) -> String {
    if invalid.is_empty() {
        "no rows to submit".to_string()
    } else {
        let ids: Vec<String> = invalid.iter().map(RowId::to_string).collect();
        format!("invalid data in row(s) {}", ids.join(", "))
    }
}

impl SubmitError {
    /// User-facing wording for the notification channel.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidRows { .. } => INVALID_DATA_MESSAGE,
            Self::Transport(_) => {
                "Could not reach the backend. Please check your connection and try again."
            }
            Self::UnexpectedStatus { .. } => "The backend rejected the request.",
        }
    }

    /// Whether a plain user retry can plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::InvalidRows { .. } => false,
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for portal client operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
