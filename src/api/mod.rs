//! HTTP surface for the board.
//!
//! | Route                    | Pipeline            |
//! |--------------------------|---------------------|
//! | `GET /health`            | none                |
//! | `GET /mta`               | transit arrivals    |
//! | `GET /weather`           | weather alignment   |
//! | `GET /api?path=<route>`  | any of the above    |
//!
//! Every response allows any origin; `OPTIONS` answers `204`.

pub mod dispatch;
pub mod error;
pub mod health;
pub mod transit;
pub mod weather;

pub use error::{ApiError, ErrorResponse};

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
    },
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::fetch::{HttpClient, transit_client};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transit_client: Arc<dyn HttpClient>,
    pub weather_client: Arc<dyn HttpClient>,
}

impl AppState {
    /// Both pipelines call out through `client`; the transit side adds the
    /// configured API key.
    pub fn new(config: Config, client: Arc<dyn HttpClient>) -> anyhow::Result<Self> {
        Ok(Self {
            transit_client: transit_client(client.clone(), &config.transit)?,
            weather_client: client,
            config: Arc::new(config),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/mta", get(transit::get_arrivals))
        .route("/weather", get(weather::get_weather))
        .route("/api", get(dispatch::dispatch))
        .fallback(error::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // CorsLayer only lists methods/headers on preflights; the board
        // expects them on every response.
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .layer(middleware::from_fn(preflight_no_content))
}

/// Answers preflights with `204 No Content` instead of CorsLayer's `200`.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let preflight = req.method() == Method::OPTIONS;
    let mut resp = next.run(req).await;
    if preflight && resp.status() == StatusCode::OK {
        *resp.status_mut() = StatusCode::NO_CONTENT;
    }
    resp
}
