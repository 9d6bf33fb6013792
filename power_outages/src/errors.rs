use crate::report::OutageId;
use shared_kernel::http_client::HttpClientError;
use thiserror::Error as ThisError;

/// Why a run of the outage feed failed. Nothing is retried here; the caller
/// decides what to do with the error.
#[derive(ThisError, Debug)]
pub enum FeedError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Outage API responded with {status} {status_text}")]
    Transport { status: u16, status_text: String },
    #[error("Failed to reach the outage API")]
    Request(#[source] HttpClientError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Failed to submit incidents")]
    Submission(#[source] anyhow::Error),
}

#[derive(ThisError, Debug)]
pub enum ParseError {
    #[error("Outage API returned a body that is not a valid outage report")]
    Body(#[from] serde_json::Error),
    #[error("Outage {outage_id} has an unreadable {field}: {value:?}")]
    Timestamp {
        outage_id: OutageId,
        field: &'static str,
        value: String,
    },
}

impl From<HttpClientError> for FeedError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::UnexpectedStatus {
                status,
                status_text,
                ..
            } => FeedError::Transport {
                status,
                status_text,
            },
            other => FeedError::Request(other),
        }
    }
}
