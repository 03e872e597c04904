//! Transit arrival pipeline: decoded feed entities to the soonest trains per
//! direction at the board's two platforms.

pub mod extract;
pub mod rank;
pub mod types;

pub use extract::{extract_arrivals, predicted_time};
pub use rank::rank_arrivals;
pub use types::{ArrivalRecord, Arrivals, Direction, Unranked};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::TransitConfig;
use crate::error::ProxyError;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::parse_feed;

/// Fetches the configured feed and ranks its arrivals.
///
/// "Now" is taken once, after the download, and used for every prediction.
pub async fn fetch_arrivals<C: HttpClient + ?Sized>(
    client: &C,
    transit: &TransitConfig,
) -> Result<Arrivals, ProxyError> {
    let bytes = fetch_bytes(client, &transit.feed_url).await?;
    arrivals_from_bytes(&bytes, transit, Utc::now())
}

/// Decodes raw feed bytes and ranks the arrivals at the configured stops.
///
/// Either the whole pipeline succeeds or the decode error is returned; no
/// partial result is produced.
pub fn arrivals_from_bytes(
    bytes: &[u8],
    transit: &TransitConfig,
    now: DateTime<Utc>,
) -> Result<Arrivals, ProxyError> {
    let feed = parse_feed(bytes)?;
    debug!(entities = feed.entity.len(), "Feed parsed successfully");
    let unranked = extract_arrivals(&feed.entity, &transit.stops, now);
    Ok(rank_arrivals(unranked, transit.window))
}
