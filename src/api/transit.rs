use axum::{Json, extract::State};
use tracing::info;

use super::AppState;
use super::error::ApiError;
use crate::arrivals::{Arrivals, fetch_arrivals};

/// Soonest trains per direction at the configured platforms.
#[tracing::instrument(skip_all)]
pub async fn get_arrivals(State(state): State<AppState>) -> Result<Json<Arrivals>, ApiError> {
    let arrivals = fetch_arrivals(state.transit_client.as_ref(), &state.config.transit)
        .await
        .map_err(ApiError::transit)?;

    info!(
        north = arrivals.north.len(),
        south = arrivals.south.len(),
        "Arrivals served"
    );
    Ok(Json(arrivals))
}
