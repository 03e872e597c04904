use chrono::{DateTime, Utc};
use tracing::debug;

use crate::arrivals::types::{ArrivalRecord, Direction, Unranked};
use crate::config::StopPair;
use crate::gtfs_rt::FeedEntity;
use crate::gtfs_rt::trip_update::{StopTimeEvent, StopTimeUpdate};
use crate::series::minutes_until;

/// Predicted epoch time for a stop: the arrival time when there is one,
/// otherwise the departure time.
///
/// An absent event counts as "no time" the same way an event without a
/// `time` does.
pub fn predicted_time(update: &StopTimeUpdate) -> Option<i64> {
    let time = |event: &Option<StopTimeEvent>| event.as_ref().and_then(|e| e.time);
    time(&update.arrival).or_else(|| time(&update.departure))
}

impl StopPair {
    fn direction_of(&self, stop_id: &str) -> Option<Direction> {
        if stop_id == self.north {
            Some(Direction::North)
        } else if stop_id == self.south {
            Some(Direction::South)
        } else {
            None
        }
    }
}

/// Collects upcoming arrivals at the two configured platforms.
///
/// `now` should be captured once per request so every record is measured
/// against the same instant. Predictions already in the past, without a time,
/// or at other stops are dropped.
pub fn extract_arrivals(entities: &[FeedEntity], stops: &StopPair, now: DateTime<Utc>) -> Unranked {
    let now = now.timestamp();
    let mut out = Unranked::default();
    let mut skipped_entities = 0usize;

    for entity in entities {
        let Some(trip_update) = &entity.trip_update else {
            skipped_entities += 1;
            continue;
        };
        if trip_update.stop_time_update.is_empty() {
            skipped_entities += 1;
            continue;
        }

        let train = trip_update.trip.route_id.as_deref().unwrap_or_default();

        for update in &trip_update.stop_time_update {
            let Some(direction) = update.stop_id.as_deref().and_then(|id| stops.direction_of(id))
            else {
                continue;
            };
            let Some(at) = predicted_time(update) else {
                continue;
            };
            let Ok(minutes) = u32::try_from(minutes_until(at, now)) else {
                continue;
            };

            out.push(
                direction,
                ArrivalRecord {
                    minutes,
                    train: train.to_string(),
                },
            );
        }
    }

    debug!(
        entities = entities.len(),
        skipped_entities,
        north = out.north.len(),
        south = out.south.len(),
        "Arrivals extracted"
    );

    out
}
