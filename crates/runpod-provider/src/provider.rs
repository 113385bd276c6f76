use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::pod::Pod;
use crate::resource::{BoxedResource, Resource, ResourceWrapper};

/// Name the provider is published under.
pub const NAME: &str = "runpod";
/// Version of the provider, the version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Provider level configuration supplied by the engine.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("token", &"***")
            .finish()
    }
}

/// A builder for creating a [Provider] with registered resources.
pub struct ProviderBuilder {
    provider: Provider,
}

impl ProviderBuilder {
    fn new() -> Self {
        Self {
            provider: Provider {
                config: None,
                resources: BTreeMap::new(),
            },
        }
    }

    pub fn resource<R: Resource>(&mut self, resource: R) -> Result<&mut Self, ProviderError> {
        let token = resource.token();
        if self.provider.resources.contains_key(token) {
            return Err(ProviderError::DuplicateResource(token.to_string()));
        }

        self.insert(resource);
        Ok(self)
    }

    fn insert<R: Resource>(&mut self, resource: R) {
        let resource: BoxedResource = Box::new(ResourceWrapper::new(resource));
        let token = resource.token();
        log::debug!("Registering resource: {token}");
        self.provider.resources.insert(token, resource);
    }

    pub fn build(self) -> Provider {
        self.provider
    }
}

/// The RunPod resource provider.
pub struct Provider {
    config: Option<ProviderConfig>,
    resources: BTreeMap<&'static str, BoxedResource>,
}

impl Provider {
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::new()
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn configure(&mut self, config: ProviderConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&ProviderConfig> {
        self.config.as_ref()
    }

    /// Type tokens of every registered resource, sorted.
    pub fn resource_tokens(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Create a resource of type `token` from JSON arguments, returning its id and state.
    pub fn create(
        &self,
        token: &str,
        name: &str,
        args: Value,
        preview: bool,
    ) -> Result<(String, Value), ProviderError> {
        if self.config.is_none() {
            return Err(ProviderError::NotConfigured);
        }

        let resource = self.resources.get(token).ok_or_else(|| {
            log::error!("Resource not found: {token}");
            ProviderError::UnknownResource(token.to_string())
        })?;

        resource.create_json(name, args, preview)
    }
}

impl Default for Provider {
    /// The provider with every built-in resource registered.
    fn default() -> Self {
        let mut builder = Provider::builder();
        builder.insert(Pod);
        builder.build()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &NAME)
            .field("version", &VERSION)
            .field("config", &self.config)
            .field("resources", &self.resource_tokens())
            .finish()
    }
}
