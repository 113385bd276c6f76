use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ProviderError;

/// A kind of infrastructure the provider knows how to create.
pub trait Resource: Send + Sync + 'static {
    /// Inputs declared by the user.
    type Args: DeserializeOwned;
    /// Outputs recorded once the resource exists.
    type State: Serialize;

    /// Type token under which the resource is registered, `runpod:index:<Name>`.
    fn token(&self) -> &'static str;

    /// Create a resource named `name`.
    ///
    /// When `preview` is set nothing may be provisioned; the returned state is the planned one.
    fn create(
        &self,
        name: &str,
        args: Self::Args,
        preview: bool,
    ) -> Result<(String, Self::State), ProviderError>;
}

/// Object safe view of a [Resource] working on JSON documents.
pub(crate) trait ErasedResource: Send + Sync {
    fn token(&self) -> &'static str;
    fn create_json(
        &self,
        name: &str,
        args: Value,
        preview: bool,
    ) -> Result<(String, Value), ProviderError>;
}

pub(crate) struct ResourceWrapper<R>(R);

impl<R: Resource> ResourceWrapper<R> {
    pub fn new(resource: R) -> Self {
        ResourceWrapper(resource)
    }
}

impl<R: Resource> ErasedResource for ResourceWrapper<R> {
    fn token(&self) -> &'static str {
        self.0.token()
    }

    fn create_json(
        &self,
        name: &str,
        args: Value,
        preview: bool,
    ) -> Result<(String, Value), ProviderError> {
        let token = self.0.token();
        let args = serde_json::from_value(args).map_err(|source| ProviderError::InvalidArgs {
            token: token.to_string(),
            source,
        })?;

        let (id, state) = self.0.create(name, args, preview)?;
        let state = serde_json::to_value(state).map_err(|source| ProviderError::InvalidState {
            token: token.to_string(),
            source,
        })?;

        Ok((id, state))
    }
}

pub(crate) type BoxedResource = Box<dyn ErasedResource>;
