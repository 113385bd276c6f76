//! API schemas for the RunPod serverless endpoint API
//!
//! This module contains all the request and response schemas used for
//! communicating with a serverless endpoint.
//!
//! # Organization
//!
//! - [`request`] - Schemas for job payloads sent to the API
//! - [`response`] - Schemas for data received from the API
//! - [`status`] - Job lifecycle states and the terminal state check
//!
//! Common types are re-exported at the module level for convenience.

pub mod request;
pub mod response;
pub mod status;

pub use request::*;
pub use response::*;
pub use status::*;
