use std::time::Duration;

use derive_new::new;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};

use super::error::HttpError;
use crate::credentials::RunpodCredentials;

/// A single request against the serverless API.
#[derive(new, Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<serde_json::Value>,
    /// Upper bound for the whole exchange, connection included.
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn get(url: Url, timeout: Duration) -> Self {
        Self::new(Method::GET, url, None, timeout)
    }

    pub fn post(url: Url, body: Option<serde_json::Value>, timeout: Duration) -> Self {
        Self::new(Method::POST, url, body, timeout)
    }
}

/// Sends requests and hands back the raw body of successful responses.
///
/// Implementations are shared with the worker threads that carry each call,
/// hence the `Send + Sync + 'static` bound.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: ApiRequest) -> Result<String, HttpError>;
}

trait ResponseExt {
    fn map_to_runpod_err(self) -> Result<reqwest::blocking::Response, HttpError>;
}

impl ResponseExt for reqwest::blocking::Response {
    fn map_to_runpod_err(self) -> Result<reqwest::blocking::Response, HttpError> {
        if self.status() == StatusCode::OK {
            Ok(self)
        } else {
            Err(HttpError::Status {
                status: self.status(),
                body: self.text()?,
            })
        }
    }
}

/// A blocking HTTP client authenticated with a RunPod API key.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http_client: reqwest::blocking::Client,
    credentials: RunpodCredentials,
}

impl HttpClient {
    pub fn new(credentials: RunpodCredentials) -> Result<Self, HttpError> {
        let http_client = reqwest::blocking::Client::builder().build()?;
        Ok(Self::with_client(http_client, credentials))
    }

    /// Reuse an existing `reqwest` client, e.g. one configured with a proxy.
    pub fn with_client(
        http_client: reqwest::blocking::Client,
        credentials: RunpodCredentials,
    ) -> Self {
        Self {
            http_client,
            credentials,
        }
    }
}

impl Transport for HttpClient {
    fn execute(&self, request: ApiRequest) -> Result<String, HttpError> {
        log::debug!("{} {}", request.method, request.url);

        let request_builder = self
            .http_client
            .request(request.method, request.url)
            .timeout(request.timeout)
            .bearer_auth(self.credentials.api_key())
            .header(CONTENT_TYPE, "application/json");

        let request_builder = if let Some(body) = request.body {
            request_builder.json(&body)
        } else {
            request_builder
        };

        let response = request_builder.send()?.map_to_runpod_err()?;

        Ok(response.text()?)
    }
}
