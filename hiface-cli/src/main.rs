//! # Hiface CLI
//!
//! Command-line interface for the Hiface cloud SDK.
//!
//! This CLI provides commands for:
//! - Calling a cloud API action and printing the response
//! - Dry-run signing to inspect canonical requests and signatures
//! - Showing build and configuration information

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hiface_core::config::Configurable;
use hiface_telemetry::logging::{LogFormat, init_logging};
use hiface_telemetry::spans::command_span;
use tracing::Instrument;

use commands::{call, sign};
use config::{AppConfig, ENV_PREFIX};

/// Hiface - cloud API request signer and dispatcher
#[derive(Parser)]
#[command(name = "hiface")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "hiface.yaml")]
    config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sign and send one API request
    Call(call::CallArgs),

    /// Sign a request without sending it
    Sign(sign::SignArgs),

    /// Show version and effective configuration
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(&cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
    }
    let _guards = init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Call(args) => {
            call::run(args, &config)
                .instrument(command_span("call"))
                .await?;
        }
        Commands::Sign(args) => {
            let _enter = command_span("sign").entered();
            sign::run(&args, &config)?;
        }
        Commands::Info => print_info(&cli.config, &config),
    }

    Ok(())
}

fn print_info(path: &std::path::Path, config: &AppConfig) {
    let cloud = &config.cloud;
    println!("Hiface Cloud SDK");
    println!("================");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Rust Edition: 2024");
    println!();
    println!("Config file: {}", path.display());
    println!("  Endpoint:     {}", cloud.endpoint);
    println!("  API version:  {}", cloud.api_version);
    println!("  Region:       {}", cloud.region.as_deref().unwrap_or("-"));
    println!("  Sign method:  {}", cloud.profile.sign_method);
    println!(
        "  HTTP:         {} {}{}",
        cloud.profile.http_profile.req_method.as_str(),
        cloud.profile.http_profile.protocol,
        cloud
            .profile
            .http_profile
            .endpoint
            .as_deref()
            .unwrap_or(&cloud.endpoint)
    );
    println!("  Timeout:      {}s", cloud.profile.http_profile.req_timeout_secs);
    println!();
    println!("Environment overrides:");
    for name in AppConfig::env_var_names(ENV_PREFIX) {
        println!("  - {name}");
    }
    println!();
    println!("Signing schemes:");
    println!("  - HmacSHA1 / HmacSHA256 (query-string)");
    println!("  - TC3-HMAC-SHA256 (canonical request)");
}
