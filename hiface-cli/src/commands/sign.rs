//! `sign`: build a signed request without sending it.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use hiface_gateway::cloud::{Credential, FixedClock, FixedNonce, PreparedRequest, RequestBody};

use super::RequestArgs;
use crate::config::AppConfig;

/// Arguments for the sign command
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Sign at this unix timestamp instead of now
    #[arg(long)]
    pub timestamp: Option<i64>,

    /// Use this nonce instead of a random one (legacy signing only)
    #[arg(long)]
    pub nonce: Option<u16>,

    /// Secret id; defaults to `TENCENTCLOUD_SECRET_ID`
    #[arg(long, env = "TENCENTCLOUD_SECRET_ID", hide_env_values = true)]
    pub secret_id: String,

    /// Secret key; defaults to `TENCENTCLOUD_SECRET_KEY`
    #[arg(long, env = "TENCENTCLOUD_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

/// Prints the signed request and its intermediate values.
pub fn run(args: &SignArgs, config: &AppConfig) -> Result<()> {
    let credential = Credential::new(&args.secret_id, &args.secret_key);
    let mut client = args.request.client(config, credential)?;
    if let Some(ts) = args.timestamp {
        client = client.with_clock(Arc::new(FixedClock::from_unix_seconds(ts)));
    }
    if let Some(nonce) = args.nonce {
        client = client.with_nonce_source(Arc::new(FixedNonce(nonce)));
    }

    let prepared = client.prepare(&args.request.action, &args.request.params()?)?;
    print!("{}", render(&prepared));
    Ok(())
}

fn render(prepared: &PreparedRequest) -> String {
    let request = &prepared.request;
    let mut out = format!(
        "Scheme: {}\nTimestamp: {}\n{} {}\n",
        prepared.sign_method,
        prepared.timestamp,
        request.method.as_str(),
        request.url
    );
    for (name, value) in &request.headers {
        out.push_str(&format!("{name}: {value}\n"));
    }
    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Json(text) => out.push_str(&format!("\n{text}\n")),
        RequestBody::Form(params) | RequestBody::Query(params) => {
            out.push('\n');
            for (key, value) in params {
                out.push_str(&format!("{key}={value}\n"));
            }
        }
    }
    if let Some(canonical) = &prepared.canonical_request {
        out.push_str(&format!("\n--- canonical request ---\n{canonical}\n"));
    }
    out.push_str(&format!(
        "\n--- string to sign ---\n{}\n\nSignature: {}\n",
        prepared.string_to_sign, prepared.signature
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiface_gateway::cloud::SignatureMethod;

    fn sign_args(params: &str) -> SignArgs {
        SignArgs {
            request: RequestArgs {
                action: "DescribeInstances".to_string(),
                params: params.to_string(),
                params_file: None,
                endpoint: Some("cvm.tencentcloudapi.com".to_string()),
                api_version: Some("2017-03-12".to_string()),
                region: Some("ap-guangzhou".to_string()),
            },
            timestamp: Some(1_551_113_065),
            nonce: Some(11_886),
            secret_id: "AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE".to_string(),
            secret_key: "Gu5t9xGARNpq86cd98joQYCN3EXAMPLE".to_string(),
        }
    }

    #[test]
    fn test_render_tc3_dry_run() {
        let mut config = AppConfig::default();
        config.cloud.profile.sign_method = SignatureMethod::Tc3HmacSha256;
        let args = sign_args(r#"{"Limit": 10}"#);

        let client = args
            .request
            .client(
                &config,
                Credential::new(&args.secret_id, &args.secret_key),
            )
            .unwrap()
            .with_clock(Arc::new(FixedClock::from_unix_seconds(1_551_113_065)))
            .with_request_client("SDK_RUST_TEST");
        let prepared = client
            .prepare("DescribeInstances", &args.request.params().unwrap())
            .unwrap();
        let text = render(&prepared);

        assert!(text.contains("POST https://cvm.tencentcloudapi.com/"));
        assert!(text.contains("--- canonical request ---"));
        assert!(text.contains(
            "Signature: c311bcb3ab633bf7bf22bd40d3acc1c6e638c75b5de87ef1227962c5d14d799a"
        ));
    }

    #[test]
    fn test_run_legacy() {
        let config = AppConfig::default();
        assert!(run(&sign_args("{}"), &config).is_ok());
    }
}
