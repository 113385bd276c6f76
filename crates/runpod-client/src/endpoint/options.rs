use std::time::Duration;

/// Timeout of single requests (`run`, `status`, `health`, `purge_queue`, `cancel`).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);
/// Overall timeout of waiting operations (`run_sync`, `status_sync`, `stream`).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(120);
/// Longest time the server is asked to hold a long-poll request.
pub const MAX_WAIT: Duration = Duration::from_secs(90);
/// Capacity of the channel created by [`Endpoint::spawn_stream`](super::Endpoint::spawn_stream).
pub const DEFAULT_STREAM_CAPACITY: usize = 100;

/// Longest timeout honored; larger ones are clamped to it.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

const REQUEST_GRACE: Duration = Duration::from_secs(2);
const DEADLINE_GRACE: Duration = Duration::from_secs(3);

/// Options of a single request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
            .min(MAX_TIMEOUT)
    }
}

/// Options of an operation that waits for a job to finish.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Overall time to wait for a terminal result.
    pub timeout: Option<Duration>,
}

impl WaitOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub(crate) fn window(&self) -> PollWindow {
        PollWindow::new(self.timeout.unwrap_or(DEFAULT_WAIT_TIMEOUT))
    }
}

/// Options of a background stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    pub timeout: Option<Duration>,
    /// Number of chunks buffered before the producer blocks.
    pub capacity: Option<usize>,
}

impl StreamOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_STREAM_CAPACITY)
    }

    pub(crate) fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout: self.timeout,
        }
    }
}

/// Timing policy of a long-poll loop, derived from its overall timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PollWindow {
    /// How long the server may hold each request.
    pub wait: Duration,
    /// Client-side timeout of each request.
    pub request_timeout: Duration,
    /// Time after which the whole operation gives up.
    pub overall: Duration,
}

impl PollWindow {
    pub fn new(timeout: Duration) -> Self {
        let wait = timeout.min(MAX_WAIT);
        Self {
            wait,
            request_timeout: wait + REQUEST_GRACE,
            overall: timeout.min(MAX_TIMEOUT).saturating_add(DEADLINE_GRACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(120, 90, 92, 123)]
    #[case(90, 90, 92, 93)]
    #[case(30, 30, 32, 33)]
    #[case(0, 0, 2, 3)]
    fn test_poll_window(
        #[case] timeout: u64,
        #[case] wait: u64,
        #[case] request_timeout: u64,
        #[case] overall: u64,
    ) {
        let window = PollWindow::new(Duration::from_secs(timeout));

        assert_eq!(window.wait, Duration::from_secs(wait));
        assert_eq!(window.request_timeout, Duration::from_secs(request_timeout));
        assert_eq!(window.overall, Duration::from_secs(overall));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(RequestOptions::default().timeout(), Duration::from_secs(3));
        assert_eq!(
            WaitOptions::default().window(),
            PollWindow::new(Duration::from_secs(120))
        );
        assert_eq!(StreamOptions::default().capacity(), 100);
    }

    #[test]
    fn test_huge_timeouts_are_clamped() {
        let window = PollWindow::new(Duration::MAX);

        assert_eq!(window.wait, MAX_WAIT);
        assert_eq!(window.request_timeout, Duration::from_secs(92));
        assert_eq!(window.overall, MAX_TIMEOUT + Duration::from_secs(3));
        assert_eq!(
            RequestOptions::with_timeout(Duration::MAX).timeout(),
            MAX_TIMEOUT
        );
    }
}
