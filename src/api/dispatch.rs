//! Single-endpoint variant: `GET /api?path=mta` and friends, for hosts that
//! route every request to one function.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use super::error::not_found;
use super::{health, transit, weather};

#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    pub path: Option<String>,
}

pub async fn dispatch(state: State<AppState>, Query(query): Query<DispatchQuery>) -> Response {
    match query.path.as_deref().unwrap_or_default() {
        "health" => health::health_check().await.into_response(),
        "mta" => transit::get_arrivals(state).await.into_response(),
        "weather" => weather::get_weather(state).await.into_response(),
        _ => not_found().await.into_response(),
    }
}
