use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::app_config::AppConfig;
use crate::commands;
use crate::context::CliContext;
use crate::logging::init_logger;
use crate::print_err;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// API key used to authenticate.
    #[arg(long, global = true, env = "RUNPOD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Id of the serverless endpoint.
    #[arg(long, global = true, env = "RUNPOD_ENDPOINT_ID")]
    pub endpoint_id: Option<String>,
    /// Base URL of the serverless API.
    #[arg(long, global = true, env = "RUNPOD_ENDPOINT_URL")]
    pub base_url: Option<String>,
    /// Log every request.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Queue a job and print its id.
    Run(commands::job::RunArgs),
    /// Submit a job and wait for its result.
    RunSync(commands::job::RunSyncArgs),
    /// Print the current state of a job.
    Status(commands::status::StatusArgs),
    /// Wait for a job to finish and print its result.
    StatusSync(commands::status::StatusArgs),
    /// Print the partial results of a job as they arrive.
    Stream(commands::stream::StreamArgs),
    /// Print worker and job counts of the endpoint.
    Health(commands::queue::RequestArgs),
    /// Remove every queued job.
    PurgeQueue(commands::queue::RequestArgs),
    /// Cancel a job.
    Cancel(commands::queue::CancelArgs),
    /// Save the API key given with --api-key for later runs.
    Login(commands::login::LoginArgs),
}

pub fn cli_main() -> ExitCode {
    let args = CliArgs::parse();
    init_logger(args.global.verbose);

    let app_config = match AppConfig::new() {
        Ok(app_config) => Some(app_config),
        Err(e) => {
            log::warn!("Stored credentials unavailable: {e}");
            None
        }
    };
    let context = CliContext::new(args.global, app_config);

    match handle_command(args.command, &context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Commands, context: &CliContext) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::job::handle_run(args, context),
        Commands::RunSync(args) => commands::job::handle_run_sync(args, context),
        Commands::Status(args) => commands::status::handle_status(args, context),
        Commands::StatusSync(args) => commands::status::handle_status_sync(args, context),
        Commands::Stream(args) => commands::stream::handle_command(args, context),
        Commands::Health(args) => commands::queue::handle_health(args, context),
        Commands::PurgeQueue(args) => commands::queue::handle_purge_queue(args, context),
        Commands::Cancel(args) => commands::queue::handle_cancel(args, context),
        Commands::Login(args) => commands::login::handle_command(args, context),
    }
}
