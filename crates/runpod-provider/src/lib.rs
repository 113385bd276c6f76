//! Resource provider exposing RunPod infrastructure to declarative deployment engines.
//!
//! The provider only describes resources: creating one returns the planned state without
//! provisioning anything.

mod error;
mod pod;
mod provider;
mod resource;

pub use error::ProviderError;
pub use pod::{Pod, PodArgs, PodCloudType, PodState};
pub use provider::{NAME, Provider, ProviderBuilder, ProviderConfig, VERSION};
pub use resource::Resource;
