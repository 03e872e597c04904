use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::error::ProxyError;

/// JSON error body. Upstream failures carry `upstreamStatus`, processing
/// failures carry `detail`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            upstream_status: None,
            detail: None,
        }
    }
}

/// The pipeline a failed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Transit,
    Weather,
}

impl Pipeline {
    fn as_str(self) -> &'static str {
        match self {
            Pipeline::Transit => "transit",
            Pipeline::Weather => "weather",
        }
    }
}

/// A pipeline failure on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub pipeline: Pipeline,
    pub source: ProxyError,
}

impl ApiError {
    pub fn transit(source: ProxyError) -> Self {
        Self {
            pipeline: Pipeline::Transit,
            source,
        }
    }

    pub fn weather(source: ProxyError) -> Self {
        Self {
            pipeline: Pipeline::Weather,
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let pipeline = self.pipeline.as_str();
        error!(pipeline, error = %self.source, "Request failed");

        let (status, body) = match self.source.upstream_status() {
            Some(upstream) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    upstream_status: Some(upstream),
                    ..ErrorResponse::new(format!("{pipeline} upstream failed"))
                },
            ),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    detail: Some(self.source.to_string()),
                    ..ErrorResponse::new(format!("{pipeline} proxy error"))
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}
