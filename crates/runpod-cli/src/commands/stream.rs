use std::thread;

use anyhow::Context as _;
use clap::Args;
use runpod_client::StreamOptions;

use super::{print_json, seconds};
use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct StreamArgs {
    pub job_id: String,
    /// Time to wait for the job to finish, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn handle_command(args: StreamArgs, context: &CliContext) -> anyhow::Result<()> {
    let endpoint = context.create_endpoint()?;
    let options = StreamOptions {
        timeout: seconds(args.timeout),
        capacity: None,
    };
    let handle = endpoint.spawn_stream(&args.job_id, options)?;

    let receiver = handle.stream.clone();
    let printer = thread::spawn(move || -> anyhow::Result<usize> {
        let mut printed = 0;
        for chunk in receiver {
            print_json(&chunk)?;
            printed += 1;
        }
        Ok(printed)
    });

    let summary = handle.join();
    let printed = printer
        .join()
        .map_err(|_| anyhow::anyhow!("Output thread panicked"))??;
    let summary = summary.with_context(|| format!("Streaming job {} failed", args.job_id))?;

    log::info!(
        "Stream ended with status {:?} after {printed} chunks",
        summary.status
    );
    if let Some(error) = summary.error {
        anyhow::bail!("Job {} failed: {error}", args.job_id);
    }
    Ok(())
}
