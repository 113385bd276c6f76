//! Serverless endpoint client.
//!
//! An [`Endpoint`] exposes the job lifecycle of one serverless endpoint:
//! * Submission – [`Endpoint::run`] queues a job, [`Endpoint::run_sync`] queues it and waits.
//! * Polling – [`Endpoint::status`] takes a snapshot, [`Endpoint::status_sync`] waits for a terminal one.
//! * Streaming – [`Endpoint::stream`] and [`Endpoint::spawn_stream`] forward partial results through a channel.
//! * Queue management – [`Endpoint::health`], [`Endpoint::purge_queue`] and [`Endpoint::cancel`].
//!
//! Waiting operations long-poll the service and are bounded by an overall deadline;
//! each request runs on its own worker thread so that it can be abandoned when the
//! deadline fires.
mod cancellable;
mod client;
mod options;
mod stream;


pub use cancellable::CancelToken;
pub use client::Endpoint;
pub use options::*;
pub use stream::{StreamHandle, StreamSummary};
