use std::str::FromStr;

use url::Url;

use crate::credentials::RunpodCredentials;
use crate::error::EndpointError;

/// Public serverless API, used unless another base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.runpod.ai/v2/";
/// Environment variable holding the endpoint id.
pub const ENDPOINT_ID_ENV: &str = "RUNPOD_ENDPOINT_ID";
/// Environment variable overriding the base URL.
pub const ENDPOINT_URL_ENV: &str = "RUNPOD_ENDPOINT_URL";

/// Validated configuration of an [Endpoint](crate::Endpoint). Can be created using
/// [EndpointConfigBuilder], which is created using the [EndpointConfig::builder] method.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    credentials: RunpodCredentials,
    endpoint_id: String,
    base_url: Url,
}

impl EndpointConfig {
    /// Create a new, empty [EndpointConfigBuilder].
    pub fn builder() -> EndpointConfigBuilder {
        EndpointConfigBuilder::default()
    }

    /// Read the configuration from `RUNPOD_API_KEY`, `RUNPOD_ENDPOINT_ID` and,
    /// when set, `RUNPOD_ENDPOINT_URL`.
    pub fn from_env() -> Result<Self, EndpointError> {
        let mut builder = EndpointConfig::builder();
        if let Ok(credentials) = RunpodCredentials::from_env() {
            builder = builder.with_credentials(credentials);
        }
        if let Ok(endpoint_id) = std::env::var(ENDPOINT_ID_ENV) {
            builder = builder.with_endpoint_id(endpoint_id);
        }
        if let Ok(base_url) = std::env::var(ENDPOINT_URL_ENV) {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }

    pub fn credentials(&self) -> &RunpodCredentials {
        &self.credentials
    }

    pub fn endpoint_id(&self) -> &str {
        &self.endpoint_id
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Builder for the EndpointConfig
#[derive(Debug, Default, Clone)]
pub struct EndpointConfigBuilder {
    credentials: Option<RunpodCredentials>,
    endpoint_id: Option<String>,
    base_url: Option<String>,
}

impl EndpointConfigBuilder {
    /// Set the API key used as bearer token
    pub fn with_api_key(self, api_key: impl Into<String>) -> EndpointConfigBuilder {
        self.with_credentials(RunpodCredentials::new(api_key))
    }

    pub fn with_credentials(mut self, credentials: RunpodCredentials) -> EndpointConfigBuilder {
        self.credentials = Some(credentials);
        self
    }

    /// Set the id of the endpoint jobs are submitted to
    pub fn with_endpoint_id(mut self, endpoint_id: impl Into<String>) -> EndpointConfigBuilder {
        self.endpoint_id = Some(endpoint_id.into());
        self
    }

    /// Set the base URL of the serverless API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> EndpointConfigBuilder {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the EndpointConfig, failing if the API key or the endpoint id is missing.
    pub fn build(self) -> Result<EndpointConfig, EndpointError> {
        let credentials = self
            .credentials
            .filter(|credentials| !credentials.is_empty())
            .ok_or(EndpointError::MissingApiKey)?;
        let endpoint_id = self
            .endpoint_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(EndpointError::MissingEndpointId)?;
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        Ok(EndpointConfig {
            credentials,
            endpoint_id,
            base_url,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, EndpointError> {
    let url = Url::from_str(raw)?;
    if url.cannot_be_a_base() {
        return Err(EndpointError::InvalidBaseUrl(raw.to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EndpointError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}
