//! Shared HTTP client construction.
//!
//! Both the Drive page client and the stream downloader build their
//! `reqwest` clients here so connect timeout and user-agent stay consistent.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

/// Connect timeout for every request. No overall timeout is set so long
/// stream transfers are never cut off.
pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Options that differ between the page client and the stream client.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClientPolicy {
    /// Name used in log lines only.
    pub name: &'static str,
    /// Request gzip encoding. Off for byte-range transfers.
    pub gzip: bool,
}

pub(crate) fn build_http_client(
    policy: ClientPolicy,
    user_agent: &str,
) -> Result<Client, reqwest::Error> {
    debug!(client = policy.name, gzip = policy.gzip, "building HTTP client");
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent)
        .gzip(policy.gzip)
        .build()
}
