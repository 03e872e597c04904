//! Error type shared by the transit and weather pipelines.

use thiserror::Error;

/// A request-scoped pipeline failure.
///
/// Every variant fails the whole request: no pipeline ever returns a partial
/// payload alongside an error.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream API answered with a non-success HTTP status.
    #[error("upstream returned status {status}")]
    Upstream { status: u16 },
    /// The transit feed bytes are not a valid GTFS-RT `FeedMessage`.
    #[error("feed decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The weather payload is missing a field or its hourly arrays disagree.
    #[error("malformed upstream payload: {0}")]
    Structural(String),
    /// The request never produced a status (DNS, TLS, connection reset...).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProxyError {
    /// The upstream HTTP status, when the failure came with one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProxyError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Structural(err.to_string())
    }
}
