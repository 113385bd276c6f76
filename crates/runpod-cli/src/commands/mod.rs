pub mod job;
pub mod login;
pub mod queue;
pub mod status;
pub mod stream;

use std::time::Duration;

use anyhow::Context as _;
use runpod_client::{EndpointError, JobInput};
use serde::Serialize;

use crate::print_warn;

/// Print a result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to format the result")?;
    println!("{json}");
    Ok(())
}

/// Parse the `--input` argument, a JSON object handed to the worker.
pub fn parse_input(raw: &str) -> anyhow::Result<JobInput> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("The job input is not valid JSON")?;
    JobInput::from_value(value).context("The job input must be a JSON object")
}

pub fn seconds(timeout: Option<u64>) -> Option<Duration> {
    timeout.map(Duration::from_secs)
}

/// Print the last known state of a job that timed out before failing the command.
pub fn report_wait_error(err: EndpointError) -> anyhow::Error {
    if let Some(last) = err.last_result() {
        print_warn!("Job did not finish in time, last known result:");
        if let Err(print_err) = print_json(last) {
            return print_err;
        }
    }
    anyhow::Error::new(err)
}
