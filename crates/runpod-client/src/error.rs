use runpod_api::JobOutput;
use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("api key is required")]
    MissingApiKey,
    #[error("endpoint id is required")]
    MissingEndpointId,
    #[error("job id is required")]
    MissingJobId,
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error("failed to serialize job input: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The overall deadline elapsed. `last` holds the most recent snapshot
    /// received before that, which may still be in progress.
    #[error("timeout reached")]
    TimeoutReached { last: Option<Box<JobOutput>> },
    #[error("stream receiver was dropped")]
    StreamClosed,
    #[error("operation cancelled")]
    Cancelled,
    #[error("request worker thread panicked")]
    ThreadPanicked,
}

impl EndpointError {
    pub(crate) fn timeout(last: Option<JobOutput>) -> Self {
        EndpointError::TimeoutReached {
            last: last.map(Box::new),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, EndpointError::TimeoutReached { .. })
    }

    /// The last known job snapshot carried by a timeout, if any.
    pub fn last_result(&self) -> Option<&JobOutput> {
        match self {
            EndpointError::TimeoutReached { last } => last.as_deref(),
            _ => None,
        }
    }

    /// Consume the error, keeping the last known job snapshot.
    pub fn into_last_result(self) -> Option<JobOutput> {
        match self {
            EndpointError::TimeoutReached { last } => last.map(|last| *last),
            _ => None,
        }
    }
}
