use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Sender};
use runpod_api::{
    CancelOutput, HealthOutput, JobInput, JobOutput, PurgeQueueOutput, RunOutput, StreamChunk,
    StreamOutput, Terminal,
};
use serde::de::DeserializeOwned;
use url::Url;

use super::cancellable::{CancelToken, Deadline, Outcome, race};
use super::options::{PollWindow, RequestOptions, StreamOptions, WaitOptions};
use super::stream::{StreamHandle, StreamSummary, deliver};
use crate::config::EndpointConfig;
use crate::error::EndpointError;
use crate::http::{ApiRequest, HttpClient, Transport};

/// A client for a single RunPod serverless endpoint.
///
/// The client submits jobs, waits for them, streams their partial results and manages the
/// endpoint queue. It holds no mutable state; clones share the underlying transport.
#[derive(Debug)]
pub struct Endpoint<T = HttpClient> {
    config: Arc<EndpointConfig>,
    transport: Arc<T>,
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Endpoint<HttpClient> {
    /// Create a new Endpoint talking HTTP to the configured base URL.
    pub fn new(config: EndpointConfig) -> Result<Self, EndpointError> {
        let http_client = HttpClient::new(config.credentials().clone())?;
        Ok(Self::with_transport(config, http_client))
    }

    /// Create a new Endpoint configured from the environment, see [EndpointConfig::from_env].
    pub fn from_env() -> Result<Self, EndpointError> {
        Self::new(EndpointConfig::from_env()?)
    }
}

impl<T: Transport> Endpoint<T> {
    pub fn with_transport(config: EndpointConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn endpoint_id(&self) -> &str {
        self.config.endpoint_id()
    }

    /// Queue a job and return its id without waiting for it.
    pub fn run(
        &self,
        input: &JobInput,
        options: RequestOptions,
    ) -> Result<RunOutput, EndpointError> {
        let url = self.route(&["run"], None)?;
        let body = serde_json::to_value(input).map_err(EndpointError::Serialization)?;

        self.single(ApiRequest::post(url, Some(body), options.timeout()))
    }

    /// Submit a job and wait for its terminal result.
    ///
    /// The submission itself long-polls; if the job is still running when it returns,
    /// the job is polled through `status-sync` until it finishes or the timeout elapses.
    /// On timeout the error carries the last snapshot received.
    pub fn run_sync(
        &self,
        input: &JobInput,
        options: WaitOptions,
    ) -> Result<JobOutput, EndpointError> {
        let window = options.window();
        let deadline = Deadline::after(window.overall);

        let url = self.route(&["runsync"], Some(window.wait))?;
        let body = serde_json::to_value(input).map_err(EndpointError::Serialization)?;

        let result: JobOutput = self
            .call(
                ApiRequest::post(url, Some(body), window.request_timeout),
                deadline,
                None,
            )
            .map_err(|err| self.log_timeout(err))?;

        if result.is_terminal() {
            return Ok(result);
        }

        let job_id = match result.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(EndpointError::MissingJobId),
        };
        log::debug!("job {job_id} queued, waiting through status-sync");

        self.poll_status(&job_id, window, deadline, Some(result))
    }

    /// Fetch the current state of a job.
    pub fn status(
        &self,
        job_id: &str,
        options: RequestOptions,
    ) -> Result<JobOutput, EndpointError> {
        let job_id = require_job_id(job_id)?;
        let url = self.route(&["status", job_id], None)?;

        self.single(ApiRequest::get(url, options.timeout()))
    }

    /// Wait for a previously submitted job to reach a terminal state.
    ///
    /// On timeout the error carries the last snapshot received.
    pub fn status_sync(
        &self,
        job_id: &str,
        options: WaitOptions,
    ) -> Result<JobOutput, EndpointError> {
        let job_id = require_job_id(job_id)?;
        let window = options.window();
        let deadline = Deadline::after(window.overall);

        self.poll_status(job_id, window, deadline, None)
    }

    /// Poll the partial results of a job and push them to `sender` in arrival order.
    ///
    /// Returns once the job is terminal. The sender is dropped on return whatever the
    /// outcome, which closes the channel unless the caller kept a clone of it; chunks
    /// already delivered can still be drained after a timeout.
    pub fn stream(
        &self,
        job_id: &str,
        options: WaitOptions,
        sender: Sender<StreamChunk>,
    ) -> Result<StreamSummary, EndpointError> {
        self.stream_until(job_id, options, sender, None)
    }

    /// Stream a job from a background thread.
    pub fn spawn_stream(
        &self,
        job_id: &str,
        options: StreamOptions,
    ) -> Result<StreamHandle, EndpointError> {
        let job_id = require_job_id(job_id)?.to_string();
        let (sender, receiver) = channel::bounded(options.capacity());
        let cancel = CancelToken::new();

        let endpoint = self.clone();
        let producer_id = job_id.clone();
        let producer_cancel = cancel.clone();
        let wait = options.wait_options();
        let join = thread::spawn(move || {
            endpoint.stream_until(&producer_id, wait, sender, Some(&producer_cancel))
        });

        Ok(StreamHandle::new(job_id, receiver, cancel, join))
    }

    /// Report worker and job counts of the endpoint.
    pub fn health(&self, options: RequestOptions) -> Result<HealthOutput, EndpointError> {
        let url = self.route(&["health"], None)?;

        self.single(ApiRequest::get(url, options.timeout()))
    }

    /// Remove every queued job. Running jobs are left alone.
    pub fn purge_queue(
        &self,
        options: RequestOptions,
    ) -> Result<PurgeQueueOutput, EndpointError> {
        let url = self.route(&["purge-queue"], None)?;

        self.single(ApiRequest::post(url, None, options.timeout()))
    }

    /// Cancel a queued or running job.
    pub fn cancel(
        &self,
        job_id: &str,
        options: RequestOptions,
    ) -> Result<CancelOutput, EndpointError> {
        let job_id = require_job_id(job_id)?;
        let url = self.route(&["cancel", job_id], None)?;

        self.single(ApiRequest::post(url, None, options.timeout()))
    }

    fn poll_status(
        &self,
        job_id: &str,
        window: PollWindow,
        deadline: Deadline,
        mut last: Option<JobOutput>,
    ) -> Result<JobOutput, EndpointError> {
        let url = self.route(&["status-sync", job_id], Some(window.wait))?;

        loop {
            if deadline.is_expired() {
                return Err(self.log_timeout(EndpointError::timeout(last)));
            }

            let request = ApiRequest::get(url.clone(), window.request_timeout);
            match self.call::<JobOutput>(request, deadline, None) {
                Ok(result) if result.is_terminal() => return Ok(result),
                Ok(result) => {
                    log::debug!("job {job_id} is {:?}, polling again", result.status);
                    last = Some(result);
                }
                Err(err) if err.is_timeout() => {
                    return Err(self.log_timeout(EndpointError::timeout(last)));
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn stream_until(
        &self,
        job_id: &str,
        options: WaitOptions,
        sender: Sender<StreamChunk>,
        cancel: Option<&CancelToken>,
    ) -> Result<StreamSummary, EndpointError> {
        let job_id = require_job_id(job_id)?;
        let window = options.window();
        let deadline = Deadline::after(window.overall);
        let url = self.route(&["stream", job_id], Some(window.wait))?;
        let mut chunks = 0;

        loop {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(EndpointError::Cancelled);
            }
            if deadline.is_expired() {
                return Err(self.log_timeout(EndpointError::timeout(None)));
            }

            let request = ApiRequest::get(url.clone(), window.request_timeout);
            let output: StreamOutput = self
                .call(request, deadline, cancel)
                .map_err(|err| self.log_timeout(err))?;

            let terminal = output.is_terminal();
            for chunk in output.stream {
                deliver(&sender, chunk, deadline, cancel)?;
                chunks += 1;
            }

            if terminal {
                log::debug!("stream of job {job_id} ended after {chunks} chunks");
                return Ok(StreamSummary {
                    status: output.status,
                    error: output.error,
                    chunks,
                });
            }
        }
    }

    /// Run a request that has no deadline of its own beyond its timeout.
    fn single<R>(&self, request: ApiRequest) -> Result<R, EndpointError>
    where
        R: DeserializeOwned,
    {
        let deadline = Deadline::after(request.timeout);
        self.call(request, deadline, None)
    }

    /// Send a request from a worker thread and decode its response, unless the
    /// deadline or a cancellation wins the race.
    fn call<R>(
        &self,
        request: ApiRequest,
        deadline: Deadline,
        cancel: Option<&CancelToken>,
    ) -> Result<R, EndpointError>
    where
        R: DeserializeOwned,
    {
        let transport = Arc::clone(&self.transport);
        let body = match race(deadline, cancel, move || transport.execute(request)) {
            Outcome::Completed(body) => body?,
            Outcome::Cancelled => return Err(EndpointError::Cancelled),
            Outcome::Expired => return Err(EndpointError::timeout(None)),
            Outcome::WorkerLost => return Err(EndpointError::ThreadPanicked),
        };

        serde_json::from_str(&body).map_err(EndpointError::Decode)
    }

    /// Build `{base}/{endpoint id}/{segments..}`, with the long-poll window if any.
    fn route(&self, segments: &[&str], wait: Option<Duration>) -> Result<Url, EndpointError> {
        let mut url = self.config.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| EndpointError::InvalidBaseUrl(self.config.base_url().to_string()))?
            .pop_if_empty()
            .push(self.config.endpoint_id())
            .extend(segments);

        if let Some(wait) = wait {
            url.query_pairs_mut()
                .append_pair("wait", &wait.as_millis().to_string());
        }

        Ok(url)
    }

    fn log_timeout(&self, err: EndpointError) -> EndpointError {
        if err.is_timeout() {
            log::warn!("endpoint {}: timeout reached", self.config.endpoint_id());
        }
        err
    }
}

fn require_job_id(job_id: &str) -> Result<&str, EndpointError> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        Err(EndpointError::MissingJobId)
    } else {
        Ok(job_id)
    }
}
