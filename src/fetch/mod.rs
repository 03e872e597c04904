mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TransitConfig;
use crate::error::ProxyError;

/// Client for the transit feed: `base`, plus the MTA key header when one is
/// configured. Other upstreams use `base` directly so the key never leaves
/// for a third party.
pub fn transit_client(
    base: Arc<dyn HttpClient>,
    transit: &TransitConfig,
) -> anyhow::Result<Arc<dyn HttpClient>> {
    let client: Arc<dyn HttpClient> = match &transit.api_key {
        Some(key) => Arc::new(auth::ApiKey::mta(base, key)?),
        None => base,
    };
    Ok(client)
}

/// GETs `url` and returns the body.
///
/// # Errors
///
/// [`ProxyError::Upstream`] when the upstream answers with a non-success
/// status, [`ProxyError::Transport`] when no response arrives at all.
#[tracing::instrument(skip_all, fields(url = %url))]
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: &Url,
) -> Result<Bytes, ProxyError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await?;
    debug!(bytes = body.len(), "Upstream body received");
    Ok(body)
}

/// GETs `url` and decodes the body as JSON.
///
/// A body that does not match `T` is a [`ProxyError::Structural`] error.
pub async fn fetch_json<C, T>(client: &C, url: &Url) -> Result<T, ProxyError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let body = fetch_bytes(client, url).await?;
    Ok(serde_json::from_slice(&body)?)
}
