//! Protobuf parser for GTFS Realtime feeds.

use prost::Message;

use crate::error::ProxyError;
use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded GTFS-RT [`FeedMessage`] from raw bytes.
///
/// # Errors
///
/// Returns [`ProxyError::Decode`] if the bytes are not valid protobuf for a
/// `FeedMessage`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage, ProxyError> {
    Ok(FeedMessage::decode(bytes)?)
}
