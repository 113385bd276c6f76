#![warn(missing_docs)]

//! # RunPod

/// Serverless endpoint client
#[cfg(feature = "client")]
pub use runpod_client::*;

/// Infrastructure resource provider
#[cfg(feature = "provider")]
pub mod provider {
    pub use runpod_provider::*;
}
