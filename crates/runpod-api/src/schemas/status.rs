use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a job as reported by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum JobStatus {
    InQueue,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    TimedOut,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job can no longer change state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled | JobStatus::TimedOut
        )
    }
}

/// Implemented by every response that describes where a job stands.
///
/// A response is terminal once its status is final or it carries a
/// non-empty error, whatever the status says.
pub trait Terminal {
    fn status(&self) -> Option<JobStatus>;
    fn error(&self) -> Option<&str>;

    fn is_terminal(&self) -> bool {
        self.status().is_some_and(|status| status.is_final())
            || self.error().is_some_and(|error| !error.is_empty())
    }
}
