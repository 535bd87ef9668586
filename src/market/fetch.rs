use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use super::parse::parse_snapshot;
use super::record::Snapshot;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub fn fetch_snapshot(api_url: &str) -> Result<Snapshot> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(api_url)
        .send()
        .with_context(|| format!("request to {api_url} failed"))?
        .error_for_status()
        .with_context(|| format!("risk feed at {api_url} returned an error status"))?;

    let body = response
        .text()
        .context("risk feed response body was not readable")?;

    parse_snapshot(&body).with_context(|| format!("failed to parse snapshot from {api_url}"))
}
