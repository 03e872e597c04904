use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// Header the MTA developer portal expects keys in.
pub const MTA_KEY_HEADER: &str = "x-api-key";

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header name and value are checked when the wrapper is built, so a bad
/// key fails at startup rather than on every request.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> anyhow::Result<Self> {
        let mut key = HeaderValue::from_str(key)?;
        key.set_sensitive(true);
        Ok(Self {
            inner,
            header_name: HeaderName::from_bytes(header_name.as_bytes())?,
            key,
        })
    }

    /// Uses the `x-api-key` header.
    pub fn mta(inner: C, key: &str) -> anyhow::Result<Self> {
        Self::new(inner, MTA_KEY_HEADER, key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}
