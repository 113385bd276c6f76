use anyhow::Context as _;
use clap::Args;

use crate::app_config::StoredCredentials;
use crate::context::CliContext;
use crate::print_success;

/// Takes its key from the global `--api-key` flag.
#[derive(Args, Debug)]
pub struct LoginArgs {}

pub fn handle_command(_args: LoginArgs, context: &CliContext) -> anyhow::Result<()> {
    let api_key = context
        .explicit_api_key()
        .context("Pass the key to save with --api-key")?;

    let app_config = context.app_config()?;
    app_config
        .save_credentials(&StoredCredentials {
            api_key: api_key.to_string(),
        })
        .context("Failed to save credentials")?;

    print_success!(
        "API key saved to {}",
        app_config.credentials_path().display()
    );
    Ok(())
}
