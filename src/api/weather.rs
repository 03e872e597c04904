use axum::{Json, extract::State};
use tracing::info;

use super::AppState;
use super::error::ApiError;
use crate::weather::{WeatherSnapshot, fetch_weather};

/// Current conditions plus the hourly forecast from the current hour on.
#[tracing::instrument(skip_all)]
pub async fn get_weather(State(state): State<AppState>) -> Result<Json<WeatherSnapshot>, ApiError> {
    let snapshot = fetch_weather(state.weather_client.as_ref(), &state.config.weather_url)
        .await
        .map_err(ApiError::weather)?;

    info!(
        start_index = snapshot.start_index,
        hours = snapshot.hourly.len(),
        "Weather served"
    );
    Ok(Json(snapshot))
}
