use crate::arrivals::types::{Arrivals, Unranked};
use crate::series::rank_bounded;

/// Orders each direction by minutes and keeps the first `window` entries.
///
/// Ties keep feed order, so ranking the same input twice gives the same
/// result.
pub fn rank_arrivals(unranked: Unranked, window: usize) -> Arrivals {
    Arrivals {
        north: rank_bounded(unranked.north, |r| r.minutes, window),
        south: rank_bounded(unranked.south, |r| r.minutes, window),
    }
}
