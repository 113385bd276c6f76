use clap::Args;
use runpod_client::{RequestOptions, WaitOptions};

use super::{parse_input, print_json, report_wait_error, seconds};
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Job input, as a JSON object.
    #[arg(long)]
    pub input: String,
    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// URL called once the job is done.
    #[arg(long)]
    pub webhook: Option<String>,
}

#[derive(Args, Debug)]
pub struct RunSyncArgs {
    /// Job input, as a JSON object.
    #[arg(long)]
    pub input: String,
    /// Time to wait for the result, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn handle_run(args: RunArgs, context: &CliContext) -> anyhow::Result<()> {
    let mut input = parse_input(&args.input)?;
    if let Some(webhook) = args.webhook {
        input = input.with_webhook(webhook);
    }

    let endpoint = context.create_endpoint()?;
    let options = RequestOptions {
        timeout: seconds(args.timeout),
    };
    let output = endpoint.run(&input, options)?;
    log::info!("Job {:?} queued", output.id);

    print_json(&output)
}

pub fn handle_run_sync(args: RunSyncArgs, context: &CliContext) -> anyhow::Result<()> {
    let input = parse_input(&args.input)?;

    let endpoint = context.create_endpoint()?;
    let options = WaitOptions {
        timeout: seconds(args.timeout),
    };
    let output = endpoint
        .run_sync(&input, options)
        .map_err(report_wait_error)?;
    log::info!("Job {:?} finished with status {:?}", output.id, output.status);

    print_json(&output)
}
