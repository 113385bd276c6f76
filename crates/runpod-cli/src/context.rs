use anyhow::Context as _;
use runpod_client::{Endpoint, EndpointConfig};

use crate::app_config::{AppConfig, StoredCredentials};
use crate::cli::GlobalArgs;

pub struct CliContext {
    global: GlobalArgs,
    app_config: Option<AppConfig>,
}

impl CliContext {
    pub fn new(global: GlobalArgs, app_config: Option<AppConfig>) -> Self {
        Self { global, app_config }
    }

    pub fn app_config(&self) -> anyhow::Result<&AppConfig> {
        self.app_config
            .as_ref()
            .context("No configuration directory available on this platform")
    }

    /// API key given on the command line or through the environment.
    pub fn explicit_api_key(&self) -> Option<&str> {
        self.global
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// API key from the command line or the environment, then from the stored credentials.
    pub fn api_key(&self) -> anyhow::Result<String> {
        if let Some(api_key) = self.explicit_api_key() {
            return Ok(api_key.to_string());
        }

        let stored = match &self.app_config {
            Some(app_config) => app_config
                .load_credentials()
                .context("Failed to read stored credentials")?,
            None => None,
        };

        match stored {
            Some(StoredCredentials { api_key }) => {
                log::debug!("Using stored credentials");
                Ok(api_key)
            }
            None => anyhow::bail!(
                "No API key found. Pass --api-key, set RUNPOD_API_KEY or run `runpod login`."
            ),
        }
    }

    pub fn endpoint_config(&self) -> anyhow::Result<EndpointConfig> {
        let mut builder = EndpointConfig::builder().with_api_key(self.api_key()?);
        if let Some(endpoint_id) = &self.global.endpoint_id {
            builder = builder.with_endpoint_id(endpoint_id);
        }
        if let Some(base_url) = &self.global.base_url {
            builder = builder.with_base_url(base_url);
        }

        builder.build().context("Invalid endpoint configuration")
    }

    pub fn create_endpoint(&self) -> anyhow::Result<Endpoint> {
        let config = self.endpoint_config()?;
        log::debug!("Using endpoint {} at {}", config.endpoint_id(), config.base_url());
        Endpoint::new(config).context("Failed to create the HTTP client")
    }
}
