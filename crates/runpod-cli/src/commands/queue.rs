use clap::Args;
use runpod_client::RequestOptions;

use super::{print_json, seconds};
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl RequestArgs {
    fn options(&self) -> RequestOptions {
        RequestOptions {
            timeout: seconds(self.timeout),
        }
    }
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    pub job_id: String,
    #[command(flatten)]
    pub request: RequestArgs,
}

pub fn handle_health(args: RequestArgs, context: &CliContext) -> anyhow::Result<()> {
    let output = context.create_endpoint()?.health(args.options())?;
    print_json(&output)
}

pub fn handle_purge_queue(args: RequestArgs, context: &CliContext) -> anyhow::Result<()> {
    let output = context.create_endpoint()?.purge_queue(args.options())?;
    print_json(&output)
}

pub fn handle_cancel(args: CancelArgs, context: &CliContext) -> anyhow::Result<()> {
    let output = context
        .create_endpoint()?
        .cancel(&args.job_id, args.request.options())?;
    print_json(&output)
}
