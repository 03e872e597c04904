//! Weather pipeline: an Open-Meteo hourly forecast anchored at the current
//! hour.

pub mod align;
pub mod types;

pub use align::{align_forecast, current_hour_label};
pub use types::{CurrentConditions, Forecast, HourlyConditions, WeatherSnapshot};

use reqwest::Url;

use crate::error::ProxyError;
use crate::fetch::{HttpClient, fetch_json};

/// Fetches the forecast at `url` and anchors it at the current hour.
pub async fn fetch_weather<C: HttpClient + ?Sized>(
    client: &C,
    url: &Url,
) -> Result<WeatherSnapshot, ProxyError> {
    let forecast: Forecast = fetch_json(client, url).await?;
    align_forecast(&forecast)
}
