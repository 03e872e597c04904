//! Numeric and ordering helpers shared by the arrival and weather pipelines.
//!
//! Both pipelines reduce to "find where now is, then keep what follows" or
//! "order by a key, then keep the first few"; the two routines here are the
//! only implementations of those steps.

/// Rounds to the nearest integer, halves away from zero.
pub fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

/// Whole minutes from `now` until `at`, both in epoch seconds.
///
/// Negative when `at` is already in the past. The gap saturates at the
/// `i64` bounds, so feed-supplied extremes cannot overflow.
pub fn minutes_until(at: i64, now: i64) -> i64 {
    round_to_i64(at.saturating_sub(now) as f64 / 60.0)
}

/// Index of the first element matching `predicate`, or `0` when none does.
pub fn anchor_index<T>(series: &[T], predicate: impl FnMut(&T) -> bool) -> usize {
    series.iter().position(predicate).unwrap_or(0)
}

/// Sorts `items` ascending by `key` and keeps at most `limit` of them.
///
/// The sort is stable, so equal keys keep their encounter order and the
/// result is deterministic for a given input.
pub fn rank_bounded<T, K: Ord>(mut items: Vec<T>, key: impl FnMut(&T) -> K, limit: usize) -> Vec<T> {
    items.sort_by_key(key);
    items.truncate(limit);
    items
}
