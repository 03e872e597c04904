use tracing::debug;

use crate::error::ProxyError;
use crate::series::{anchor_index, round_to_i64};
use crate::weather::types::{CurrentConditions, Forecast, HourlyConditions, WeatherSnapshot};

/// Truncates a local time label to its hour: `"2024-01-01T13:47"` becomes
/// `"2024-01-01T13:00"`.
///
/// Labels too short to hold an hour are returned unchanged; they will not
/// match any hourly label.
pub fn current_hour_label(time: &str) -> String {
    match time.get(..13) {
        Some(hour) => format!("{hour}:00"),
        None => time.to_string(),
    }
}

/// Anchors the hourly forecast at the current hour and reshapes it for the
/// board.
///
/// When the current hour is not among the hourly labels the forecast is
/// anchored at its first hour.
///
/// # Errors
///
/// [`ProxyError::Structural`] when an hourly value array is not the same
/// length as the hourly time labels.
pub fn align_forecast(forecast: &Forecast) -> Result<WeatherSnapshot, ProxyError> {
    let hourly = &forecast.hourly;
    let hours = hourly.time.len();
    for (name, len) in hourly.value_lengths() {
        if len != hours {
            return Err(ProxyError::Structural(format!(
                "hourly.{name} has {len} values for {hours} hours"
            )));
        }
    }

    let label = current_hour_label(&forecast.current.time);
    let start_index = anchor_index(&hourly.time, |t| *t == label);
    debug!(%label, start_index, hours, "Forecast anchored");

    let hourly = hourly.temperature_2m[start_index..]
        .iter()
        .zip(&hourly.precipitation[start_index..])
        .zip(&hourly.visibility[start_index..])
        .zip(&hourly.is_day[start_index..])
        .zip(&hourly.weather_code[start_index..])
        .map(|((((temp, prec), visib), day), code)| HourlyConditions {
            temp: round_to_i64(*temp),
            prec: *prec,
            visib: round_to_i64(*visib),
            day: *day,
            code: *code,
        })
        .collect();

    let current = &forecast.current;
    Ok(WeatherSnapshot {
        start_index,
        current: CurrentConditions {
            temp: round_to_i64(current.temperature_2m),
            code: current.weather_code,
            prec: current.precipitation,
            rain: current.rain,
            snow: current.snowfall,
        },
        hourly,
    })
}
