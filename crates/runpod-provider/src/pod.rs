use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ProviderError;
use crate::resource::Resource;

/// A GPU pod.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pod;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodArgs {
    pub gpu_type_id: String,
    pub gpu_count: u32,
    #[serde(default)]
    pub cloud_type: PodCloudType,
}

/// Where a pod may be scheduled.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PodCloudType {
    #[default]
    All,
    Secure,
    Community,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodState {
    #[serde(flatten)]
    pub args: PodArgs,
}

impl Resource for Pod {
    type Args = PodArgs;
    type State = PodState;

    fn token(&self) -> &'static str {
        "runpod:index:Pod"
    }

    fn create(
        &self,
        name: &str,
        args: PodArgs,
        preview: bool,
    ) -> Result<(String, PodState), ProviderError> {
        if name.trim().is_empty() {
            return Err(ProviderError::MissingName);
        }

        if preview {
            log::debug!("Previewing pod '{name}' on {}", args.cloud_type);
        } else {
            log::debug!(
                "Creating pod '{name}' with {} x {}",
                args.gpu_count,
                args.gpu_type_id
            );
        }

        Ok((name.to_string(), PodState { args }))
    }
}
