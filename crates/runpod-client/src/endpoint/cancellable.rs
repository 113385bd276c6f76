//! Deadline and cancellation plumbing for blocking requests
//!
//! Every network call of an [`Endpoint`](super::Endpoint) runs on a short-lived
//! worker thread while the caller waits for the first of three events: the worker's
//! result, the overall deadline, or a cancellation request. A worker that loses the
//! race is abandoned rather than aborted; it finishes on its own once its request
//! timeout fires and its result is discarded.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, TryRecvError, select};

use super::options::MAX_TIMEOUT;

/// Cancellation token shared between a streaming producer and its handle.
///
/// Cancelling drops the only sender of an internal channel, so every clone of the
/// token observes the disconnection, including threads blocked in a `select!`.
#[derive(Debug, Clone)]
pub struct CancelToken {
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    signal: Receiver<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (trigger, signal) = channel::bounded(0);
        Self {
            trigger: Arc::new(Mutex::new(Some(trigger))),
            signal,
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    pub(crate) fn signal(&self) -> &Receiver<()> {
        &self.signal
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed point in time after which an operation gives up.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `duration` from now, clamped to [`MAX_TIMEOUT`].
    pub fn after(duration: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now.checked_add(duration.min(MAX_TIMEOUT)).unwrap_or(now + MAX_TIMEOUT),
        }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// Result of a unit of work raced against a deadline.
#[derive(Debug)]
pub(crate) enum Outcome<T> {
    Completed(T),
    Cancelled,
    Expired,
    /// The worker went away without reporting, i.e. it panicked.
    WorkerLost,
}

/// Run `work` on a dedicated thread and wait for its result, the deadline or
/// a cancellation, whichever comes first.
pub(crate) fn race<T, F>(deadline: Deadline, cancel: Option<&CancelToken>, work: F) -> Outcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (done_tx, done_rx) = channel::bounded(1);
    thread::spawn(move || {
        // The receiver is gone when the caller already gave up.
        let _ = done_tx.send(work());
    });

    let never = channel::never::<()>();
    let cancelled = cancel.map_or(&never, CancelToken::signal);

    select! {
        recv(done_rx) -> result => match result {
            Ok(value) => Outcome::Completed(value),
            Err(_) => Outcome::WorkerLost,
        },
        recv(cancelled) -> _ => Outcome::Cancelled,
        recv(channel::at(deadline.instant())) -> _ => Outcome::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_returns_completed_work() {
        let outcome = race(Deadline::after(Duration::from_secs(5)), None, || 42);

        assert!(matches!(outcome, Outcome::Completed(42)));
    }

    #[test]
    fn test_race_gives_up_at_deadline() {
        let start = Instant::now();
        let outcome = race(Deadline::after(Duration::from_millis(50)), None, || {
            thread::sleep(Duration::from_secs(2));
            42
        });

        assert!(matches!(outcome, Outcome::Expired));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_race_observes_cancellation() {
        let token = CancelToken::new();
        let cancel_token = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cancel_token.cancel();
        });

        let outcome = race(Deadline::after(Duration::from_secs(5)), Some(&token), || {
            thread::sleep(Duration::from_secs(2));
        });

        assert!(matches!(outcome, Outcome::Cancelled));
    }

    #[test]
    fn test_race_reports_panicking_worker() {
        let outcome: Outcome<()> = race(Deadline::after(Duration::from_secs(5)), None, || {
            panic!("worker failure")
        });

        assert!(matches!(outcome, Outcome::WorkerLost));
    }

    #[test]
    fn test_zero_deadline_is_expired() {
        assert!(Deadline::after(Duration::ZERO).is_expired());
    }

    #[test]
    fn test_unbounded_deadline_does_not_overflow() {
        let deadline = Deadline::after(Duration::MAX);

        assert!(!deadline.is_expired());
        assert!(deadline.instant() > Instant::now() + Duration::from_secs(3600));
    }

    mod token {
        use super::*;

        #[test]
        fn test_cancel_token_basic() {
            let token = CancelToken::new();
            assert!(!token.is_cancelled());

            token.cancel();
            assert!(token.is_cancelled());

            token.cancel();
            assert!(token.is_cancelled());
        }

        #[test]
        fn test_cancel_token_clone() {
            let token = CancelToken::new();
            let token_clone = token.clone();

            token_clone.cancel();
            assert!(token.is_cancelled());
            assert!(token_clone.is_cancelled());
        }

        #[test]
        fn test_cancel_token_thread_safety() {
            let token = CancelToken::new();
            let token_clone = token.clone();

            let handle = thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                token_clone.cancel();
            });
            handle.join().unwrap();

            assert!(token.is_cancelled());
        }
    }
}
