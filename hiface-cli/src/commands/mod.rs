//! CLI command implementations.

pub mod call;
pub mod sign;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use hiface_gateway::cloud::{CloudClient, Credential};
use serde_json::Value;

use crate::config::AppConfig;

/// Target and parameters shared by `call` and `sign`.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// API action, e.g. `AnalyzeFace`
    pub action: String,

    /// Request parameters as a JSON object
    #[arg(short, long, default_value = "{}", conflicts_with = "params_file")]
    pub params: String,

    /// Read request parameters from a JSON file
    #[arg(long)]
    pub params_file: Option<PathBuf>,

    /// Override the service endpoint host
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the API version
    #[arg(long)]
    pub api_version: Option<String>,

    /// Override the region
    #[arg(short, long)]
    pub region: Option<String>,
}

impl RequestArgs {
    /// Parses the request parameters.
    pub fn params(&self) -> Result<Value> {
        let text = match &self.params_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => self.params.clone(),
        };
        let value: Value =
            serde_json::from_str(&text).context("Request parameters are not valid JSON")?;
        if !value.is_object() {
            bail!("Request parameters must be a JSON object");
        }
        Ok(value)
    }

    /// Builds a client from the config file with command-line overrides applied.
    pub fn client(&self, config: &AppConfig, credential: Credential) -> Result<CloudClient> {
        let cloud = &config.cloud;
        let client = CloudClient::new(
            self.endpoint.clone().unwrap_or_else(|| cloud.endpoint.clone()),
            self.api_version
                .clone()
                .unwrap_or_else(|| cloud.api_version.clone()),
            credential,
            self.region.clone().or_else(|| cloud.region.clone()),
            cloud.profile.clone(),
        )?;
        Ok(client)
    }
}
