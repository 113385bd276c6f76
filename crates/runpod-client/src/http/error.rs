use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("http request create error: {0}")]
    RequestBuild(String),
    #[error("sls request error: {0}")]
    Transport(String),
    #[error("response status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl HttpError {
    /// The HTTP status of the response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return HttpError::RequestBuild(error.to_string());
        }
        match error.status() {
            Some(status) => HttpError::Status {
                status,
                body: error.to_string(),
            },
            None => HttpError::Transport(error.to_string()),
        }
    }
}
