//! `call`: sign and send one API request.

use anyhow::{Context, Result};
use clap::Parser;
use hiface_gateway::cloud::Credential;
use tracing::info;

use super::RequestArgs;
use crate::config::AppConfig;

/// Arguments for the call command
#[derive(Parser, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Print the response on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Sends the request and prints the `Response` payload.
///
/// Credentials come from `TENCENTCLOUD_SECRET_ID` / `TENCENTCLOUD_SECRET_KEY`.
pub async fn run(args: CallArgs, config: &AppConfig) -> Result<()> {
    let credential = Credential::from_env().context("Missing API credentials")?;
    let params = args.request.params()?;
    let client = args.request.client(config, credential)?;

    info!(action = %args.request.action, host = %client.host(), "Calling API");
    let response = client
        .request(&args.request.action, &params)
        .await
        .with_context(|| format!("{} failed", args.request.action))?;

    let output = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{output}");
    Ok(())
}
