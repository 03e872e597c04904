//! Open-Meteo payload (input) and board snapshot (output) types.

use serde::{Deserialize, Serialize};

/// The parts of an Open-Meteo `/v1/forecast` response the board uses.
///
/// Every field is required: a payload missing one fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current: CurrentBlock,
    pub hourly: HourlyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Local time label, e.g. `"2024-01-01T13:45"`.
    pub time: String,
    pub temperature_2m: f64,
    pub precipitation: f64,
    pub rain: f64,
    pub snowfall: f64,
    pub weather_code: u16,
}

/// Parallel hourly arrays; index `i` of each describes hour `time[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub visibility: Vec<f64>,
    pub is_day: Vec<u8>,
    pub weather_code: Vec<u16>,
}

impl HourlyBlock {
    /// `(name, len)` of every value array, for checking against `time`.
    pub(crate) fn value_lengths(&self) -> [(&'static str, usize); 5] {
        [
            ("temperature_2m", self.temperature_2m.len()),
            ("precipitation", self.precipitation.len()),
            ("visibility", self.visibility.len()),
            ("is_day", self.is_day.len()),
            ("weather_code", self.weather_code.len()),
        ]
    }
}

/// Response body of the weather route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Offset of `hourly[0]` in the upstream hourly arrays.
    pub start_index: usize,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temp: i64,
    pub code: u16,
    pub prec: f64,
    pub rain: f64,
    pub snow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyConditions {
    pub temp: i64,
    pub prec: f64,
    pub visib: i64,
    pub day: u8,
    pub code: u16,
}
