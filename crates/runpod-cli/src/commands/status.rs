use clap::Args;
use runpod_client::{RequestOptions, WaitOptions};

use super::{print_json, report_wait_error, seconds};
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct StatusArgs {
    pub job_id: String,
    /// Timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn handle_status(args: StatusArgs, context: &CliContext) -> anyhow::Result<()> {
    let endpoint = context.create_endpoint()?;
    let output = endpoint.status(
        &args.job_id,
        RequestOptions {
            timeout: seconds(args.timeout),
        },
    )?;

    print_json(&output)
}

pub fn handle_status_sync(args: StatusArgs, context: &CliContext) -> anyhow::Result<()> {
    let endpoint = context.create_endpoint()?;
    let output = endpoint
        .status_sync(
            &args.job_id,
            WaitOptions {
                timeout: seconds(args.timeout),
            },
        )
        .map_err(report_wait_error)?;
    log::info!("Job {} finished with status {:?}", args.job_id, output.status);

    print_json(&output)
}
