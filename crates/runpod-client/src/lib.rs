pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod http;

pub use crate::config::{EndpointConfig, EndpointConfigBuilder};
pub use crate::credentials::RunpodCredentials;
pub use crate::endpoint::*;
pub use crate::error::EndpointError;

pub use crossbeam::channel;
pub use runpod_api::schemas;
pub use runpod_api::schemas::*;
