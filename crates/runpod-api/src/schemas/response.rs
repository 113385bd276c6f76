use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::{JobStatus, Terminal};

/// Acknowledgement returned when a job is queued.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Snapshot of a job, returned by `runsync`, `status` and `status-sync`.
///
/// Every field is optional on the wire: a queued job only carries its id and
/// status, a finished one adds timings and either an output or an error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Time spent in queue, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_time: Option<u64>,
    /// Time spent executing, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

impl Terminal for JobOutput {
    fn status(&self) -> Option<JobStatus> {
        self.status
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<WorkerCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<JobCounts>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttled: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_queue: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retried: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeQueueOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Number of queued jobs that were removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
}

/// One partial result pushed by a streaming worker.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamChunk(pub Map<String, Value>);

impl StreamChunk {
    /// The value the worker yielded, when it used the conventional `output` key.
    pub fn output(&self) -> Option<&Value> {
        self.0.get("output")
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Response to a single poll of the `stream` route.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub stream: Vec<StreamChunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Terminal for StreamOutput {
    fn status(&self) -> Option<JobStatus> {
        self.status
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_output_decodes_completed_job() {
        let output: JobOutput = serde_json::from_value(json!({
            "id": "job-1",
            "status": "COMPLETED",
            "output": { "text": "done" },
            "delayTime": 120,
            "executionTime": 3400,
            "retries": 0
        }))
        .unwrap();

        assert_eq!(output.id.as_deref(), Some("job-1"));
        assert_eq!(output.status, Some(JobStatus::Completed));
        assert_eq!(output.output, Some(json!({ "text": "done" })));
        assert_eq!(output.delay_time, Some(120));
        assert_eq!(output.execution_time, Some(3400));
        assert!(output.is_terminal());
    }

    #[test]
    fn test_error_makes_output_terminal() {
        let output = JobOutput {
            status: Some(JobStatus::InProgress),
            error: Some("worker crashed".to_string()),
            ..Default::default()
        };
        assert!(output.is_terminal());

        let empty_error = JobOutput {
            status: Some(JobStatus::InProgress),
            error: Some(String::new()),
            ..Default::default()
        };
        assert!(!empty_error.is_terminal());
    }

    #[test]
    fn test_output_without_status_is_not_terminal() {
        assert!(!JobOutput::default().is_terminal());
    }

    #[test]
    fn test_health_decodes_nested_counts() {
        let health: HealthOutput = serde_json::from_value(json!({
            "jobs": { "inProgress": 1, "inQueue": 4, "completed": 10, "failed": 0, "retried": 2 },
            "workers": { "running": 1, "idle": 2, "initializing": 0, "ready": 3, "throttled": 0 }
        }))
        .unwrap();

        let jobs = health.jobs.unwrap();
        assert_eq!(jobs.in_progress, Some(1));
        assert_eq!(jobs.in_queue, Some(4));
        assert_eq!(health.workers.unwrap().ready, Some(3));
    }

    #[test]
    fn test_stream_output_keeps_chunk_order() {
        let output: StreamOutput = serde_json::from_value(json!({
            "status": "IN_PROGRESS",
            "stream": [{ "output": "a" }, { "output": "b" }, { "metrics": 1 }]
        }))
        .unwrap();

        let outputs: Vec<_> = output.stream.iter().map(StreamChunk::output).collect();
        assert_eq!(outputs, vec![Some(&json!("a")), Some(&json!("b")), None]);
        assert!(!output.is_terminal());
    }
}
