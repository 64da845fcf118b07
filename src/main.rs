//! Chaincode round trip against a live Tomago service.
//!
//! Usage: `tomago-demo [invoke.json] [query.json]`
//!
//! Connection settings come from `TOMAGO_*` environment variables (or a
//! `.env` file). `TOMAGO_CHANNEL_ID` selects the channel, `TOMAGO_LOG_JSON`
//! switches log output to JSON.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::info;

use tomago_sdk::app::{ChaincodeRoundTrip, TomagoClient};
use tomago_sdk::domain::{CHANNEL_ID_HEADER, PayloadWithTags};
use tomago_sdk::infra::{Config, init_tracing};

const DEFAULT_CHANNEL: &str = "pubchain";

fn read_payload(path: &Path) -> Result<PayloadWithTags> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;

    let json_logs = env::var("TOMAGO_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    init_tracing(json_logs).context("installing tracing subscriber")?;

    let client = TomagoClient::new(config).context("creating tomago client")?;

    let channel = env::var("TOMAGO_CHANNEL_ID").unwrap_or_else(|_| DEFAULT_CHANNEL.to_string());
    let mut headers = HeaderMap::new();
    headers.insert(
        CHANNEL_ID_HEADER,
        HeaderValue::from_str(&channel).context("TOMAGO_CHANNEL_ID is not a valid header value")?,
    );

    let mut args = env::args().skip(1);
    let invoke_path = args.next().unwrap_or_else(|| "./invoke.json".to_string());
    let query_path = args.next().unwrap_or_else(|| "./query.json".to_string());
    let invoke = read_payload(Path::new(&invoke_path))?;
    let query = read_payload(Path::new(&query_path))?;

    let report = ChaincodeRoundTrip::new(client.blockchain_client())
        .run(&headers, &invoke, &query)
        .await
        .context("chaincode round trip")?;

    info!(
        txn_id = %report.txn_id(),
        query_result = %report.query.result,
        channel = %report.transaction.channel_id,
        timestamp = ?report.transaction.timestamp.and_then(|t| t.to_datetime()),
        "Round trip complete"
    );

    Ok(())
}
