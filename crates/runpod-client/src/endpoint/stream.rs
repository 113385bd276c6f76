use std::thread::JoinHandle;

use crossbeam::channel::{self, Sender, TrySendError, select};
use runpod_api::{JobStatus, StreamChunk};

use super::cancellable::{CancelToken, Deadline};
use crate::error::EndpointError;

/// How a stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub status: Option<JobStatus>,
    pub error: Option<String>,
    /// Number of chunks delivered to the receiver.
    pub chunks: usize,
}

/// Push one chunk, blocking while the channel is full until the deadline or a cancellation.
pub(crate) fn deliver(
    sender: &Sender<StreamChunk>,
    chunk: StreamChunk,
    deadline: Deadline,
    cancel: Option<&CancelToken>,
) -> Result<(), EndpointError> {
    let chunk = match sender.try_send(chunk) {
        Ok(()) => return Ok(()),
        Err(TrySendError::Disconnected(_)) => return Err(EndpointError::StreamClosed),
        Err(TrySendError::Full(chunk)) => chunk,
    };

    let never = channel::never::<()>();
    let cancelled = cancel.map_or(&never, CancelToken::signal);

    select! {
        send(sender, chunk) -> result => result.map_err(|_| EndpointError::StreamClosed),
        recv(cancelled) -> _ => Err(EndpointError::Cancelled),
        recv(channel::at(deadline.instant())) -> _ => Err(EndpointError::timeout(None)),
    }
}

/// Handle on a stream produced by a background thread.
///
/// Chunks are read from [`stream`](StreamHandle::stream); the channel closes when the
/// producer stops for any reason. Drain it before calling [`join`](StreamHandle::join):
/// a producer blocked on a full channel only gives up at the deadline.
pub struct StreamHandle {
    pub job_id: String,
    pub stream: channel::Receiver<StreamChunk>,
    cancel: CancelToken,
    join: JoinHandle<Result<StreamSummary, EndpointError>>,
}

impl StreamHandle {
    pub(crate) fn new(
        job_id: String,
        stream: channel::Receiver<StreamChunk>,
        cancel: CancelToken,
        join: JoinHandle<Result<StreamSummary, EndpointError>>,
    ) -> Self {
        Self {
            job_id,
            stream,
            cancel,
            join,
        }
    }

    /// Stop polling. The in-flight request or pending delivery is abandoned and the
    /// channel closes.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Blocking iterator over the chunks, ending when the producer stops.
    pub fn chunks(&self) -> channel::Iter<'_, StreamChunk> {
        self.stream.iter()
    }

    /// Wait for the producer and return how the stream ended.
    pub fn join(self) -> Result<StreamSummary, EndpointError> {
        self.join
            .join()
            .unwrap_or_else(|_| Err(EndpointError::ThreadPanicked))
    }
}
