use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::config::EnvSnapshot;

const PROXY_KEYS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Decide whether the index client should honor standard proxy environment variables.
///
/// Behavior:
/// - `PUBSMOKE_KEEP_PROXIES=1/true/yes/on` forces proxies on.
/// - `PUBSMOKE_KEEP_PROXIES=0/false/no/off/""` forces proxies off.
/// - If unset, proxies are enabled only when at least one proxy env var is set.
pub(crate) fn keep_proxies(snapshot: &EnvSnapshot) -> bool {
    match snapshot.var("PUBSMOKE_KEEP_PROXIES") {
        Some(raw) => {
            let value = raw.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        None => PROXY_KEYS
            .iter()
            .any(|key| snapshot.non_empty(key).is_some()),
    }
}

/// Blocking client for the index query. No timeout is applied: a stalled
/// index stalls the run.
pub(crate) fn build_http_client(keep_proxies: bool) -> Result<Client> {
    let builder = Client::builder()
        .user_agent(format!("pubsmoke/{}", env!("CARGO_PKG_VERSION")))
        .timeout(None::<Duration>);
    let builder = if keep_proxies {
        builder
    } else {
        builder.no_proxy()
    };
    builder.build().context("failed to build HTTP client")
}
