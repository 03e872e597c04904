//! Data types produced by the arrival pipeline.

use serde::Serialize;

/// One predicted train at a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalRecord {
    /// Whole minutes until the train arrives. Never negative.
    pub minutes: u32,
    /// Route id of the trip (e.g. `"N"`, `"Q"`), not the trip instance id.
    pub train: String,
}

/// Direction a platform serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
}

/// Extractor output: predictions per direction, in feed order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Unranked {
    pub north: Vec<ArrivalRecord>,
    pub south: Vec<ArrivalRecord>,
}

impl Unranked {
    pub(crate) fn push(&mut self, direction: Direction, record: ArrivalRecord) {
        match direction {
            Direction::North => self.north.push(record),
            Direction::South => self.south.push(record),
        }
    }
}

/// Response body of the transit route: the soonest arrivals per direction,
/// ascending by minutes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Arrivals {
    pub north: Vec<ArrivalRecord>,
    pub south: Vec<ArrivalRecord>,
}
