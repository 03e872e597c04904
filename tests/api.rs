use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use board_feed::api::{AppState, router};
use board_feed::config::{Config, StopPair, TransitConfig, WeatherConfig};
use board_feed::fetch::HttpClient;
use board_feed::gtfs_rt::trip_update::{StopTimeEvent, StopTimeUpdate};
use board_feed::gtfs_rt::{FeedEntity, FeedHeader, FeedMessage, TripDescriptor, TripUpdate};
use prost::Message;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Upstream stand-in: answers by host with a queue of canned responses,
/// repeating the last one once the queue runs dry.
#[derive(Default)]
struct FakeUpstream {
    responses: Mutex<HashMap<String, Vec<(u16, Vec<u8>)>>>,
    hits: Mutex<Vec<String>>,
}

impl FakeUpstream {
    fn respond(self, host: &str, status: u16, body: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_default()
            .push((status, body));
        self
    }
}

#[async_trait]
impl HttpClient for FakeUpstream {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let host = req.url().host_str().unwrap_or_default().to_string();
        self.hits.lock().unwrap().push(host.clone());

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&host).expect("unexpected upstream host");
        let (status, body) = if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue[0].clone()
        };

        let resp = axum::http::Response::builder()
            .status(status)
            .body(body)
            .unwrap();
        Ok(resp.into())
    }
}

fn config() -> Config {
    let transit = TransitConfig {
        feed_url: "http://feed.test/gtfs-nqrw".parse().unwrap(),
        stops: StopPair {
            north: "R17N".to_string(),
            south: "R17S".to_string(),
        },
        window: 5,
        api_key: None,
    };
    let mut config = Config::new(transit, &WeatherConfig::default()).unwrap();
    config.weather_url = "http://weather.test/v1/forecast".parse().unwrap();
    config
}

fn app(upstream: FakeUpstream) -> (Router, Arc<FakeUpstream>) {
    let upstream = Arc::new(upstream);
    let state = AppState::new(config(), upstream.clone()).unwrap();
    (router(state), upstream)
}

fn feed_bytes(stops: &[(&str, &str, i64)]) -> Vec<u8> {
    let now = chrono::Utc::now().timestamp();
    let entity = stops
        .iter()
        .enumerate()
        .map(|(i, (route, stop_id, offset_secs))| FeedEntity {
            id: i.to_string(),
            trip_update: Some(TripUpdate {
                trip: TripDescriptor {
                    trip_id: Some(format!("0{i}0000_{route}..N")),
                    route_id: Some(route.to_string()),
                    ..Default::default()
                },
                stop_time_update: vec![StopTimeUpdate {
                    stop_id: Some(stop_id.to_string()),
                    arrival: Some(StopTimeEvent {
                        time: Some(now + offset_secs),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect();

    FeedMessage {
        header: FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            ..Default::default()
        },
        entity,
    }
    .encode_to_vec()
}

fn forecast_body() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "latitude": 40.75,
        "longitude": -73.99,
        "current": {
            "time": "2024-01-01T13:47",
            "interval": 900,
            "temperature_2m": 35.4,
            "precipitation": 0.0,
            "rain": 0.0,
            "showers": 0.0,
            "snowfall": 0.1,
            "weather_code": 71,
            "is_day": 1
        },
        "hourly": {
            "time": ["2024-01-01T13:00", "2024-01-01T14:00", "2024-01-01T15:00"],
            "temperature_2m": [35.2, 34.6, 33.1],
            "precipitation": [0.0, 0.01, 0.02],
            "visibility": [9000.4, 7000.6, 5000.0],
            "is_day": [1, 1, 0],
            "weather_code": [71, 73, 73]
        }
    }))
    .unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, value)
}

#[tokio::test]
async fn test_health_does_not_call_upstream() {
    let (app, upstream) = app(FakeUpstream::default());
    let (status, _, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
    assert!(upstream.hits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_arrivals_ranked_per_direction() {
    let feed = feed_bytes(&[
        ("N", "R17N", 9 * 60),
        ("Q", "R17N", 60),
        ("R", "R17N", 7 * 60),
        ("W", "R17N", 2 * 60),
        ("N", "R17N", 5 * 60),
        ("Q", "R17N", 3 * 60),
        ("R", "R17S", 121),
        ("W", "R17S", -30),
        ("N", "R20S", 60),
    ]);
    let (app, _) = app(FakeUpstream::default().respond("feed.test", 200, feed));
    let (status, headers, body) = get(&app, "/mta").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    let north: Vec<u64> = body["north"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["minutes"].as_u64().unwrap())
        .collect();
    assert_eq!(north, vec![1, 2, 3, 5, 7]);
    assert_eq!(body["north"][0]["train"], "Q");
    assert_eq!(body["south"], json!([{ "minutes": 2, "train": "R" }]));
}

#[tokio::test]
async fn test_feed_upstream_failure_is_bad_gateway() {
    let (app, _) = app(FakeUpstream::default().respond("feed.test", 503, b"down".to_vec()));
    let (status, headers, body) = get(&app, "/mta").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    assert_eq!(body["upstreamStatus"], 503);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_feed_is_internal_error_and_server_recovers() {
    let upstream = FakeUpstream::default()
        .respond("feed.test", 200, vec![0xFF, 0xFE, 0x00, 0x01])
        .respond("feed.test", 200, feed_bytes(&[("N", "R17N", 240)]));
    let (app, _) = app(upstream);

    let (status, _, body) = get(&app, "/mta").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("decode"));

    let (status, _, body) = get(&app, "/mta").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["north"][0]["minutes"], 4);
}

#[tokio::test]
async fn test_weather_snapshot() {
    let (app, upstream) = app(FakeUpstream::default().respond("weather.test", 200, forecast_body()));
    let (status, _, body) = get(&app, "/weather").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startIndex"], 0);
    assert_eq!(
        body["current"],
        json!({ "temp": 35, "code": 71, "prec": 0.0, "rain": 0.0, "snow": 0.1 })
    );
    assert_eq!(body["hourly"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["hourly"][1],
        json!({ "temp": 35, "prec": 0.01, "visib": 7001, "day": 1, "code": 73 })
    );
    assert_eq!(upstream.hits.lock().unwrap().as_slice(), &["weather.test".to_string()]);
}

#[tokio::test]
async fn test_weather_upstream_failure_is_bad_gateway() {
    let (app, _) = app(FakeUpstream::default().respond("weather.test", 429, Vec::new()));
    let (status, _, body) = get(&app, "/weather").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["upstreamStatus"], 429);
}

#[tokio::test]
async fn test_weather_missing_hourly_is_internal_error() {
    let body = serde_json::to_vec(&json!({ "current": { "time": "2024-01-01T13:47" } })).unwrap();
    let (app, _) = app(FakeUpstream::default().respond("weather.test", 200, body));
    let (status, _, body) = get(&app, "/weather").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_path_query_dispatch() {
    let (app, _) = app(FakeUpstream::default().respond("weather.test", 200, forecast_body()));

    let (status, _, body) = get(&app, "/api?path=health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (status, _, body) = get(&app, "/api?path=weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startIndex"], 0);

    let (status, _, body) = get(&app, "/api?path=trains").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));

    let (status, _, _) = get(&app, "/api").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found_with_cors() {
    let (app, _) = app(FakeUpstream::default());
    let (status, headers, body) = get(&app, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn test_preflight_is_no_content() {
    let (app, upstream) = app(FakeUpstream::default());
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/mta")
                .header(header::ORIGIN, "http://board.local")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
    assert!(upstream.hits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_key_only_sent_to_feed() {
    #[derive(Default)]
    struct KeySpy {
        seen: Mutex<Vec<(String, bool)>>,
    }

    #[async_trait]
    impl HttpClient for KeySpy {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let host = req.url().host_str().unwrap_or_default().to_string();
            let keyed = req.headers().contains_key("x-api-key");
            self.seen.lock().unwrap().push((host, keyed));
            Ok(axum::http::Response::builder()
                .status(500)
                .body(Vec::<u8>::new())
                .unwrap()
                .into())
        }
    }

    let mut config = config();
    config.transit.api_key = Some("k3y".to_string());
    let spy = Arc::new(KeySpy::default());
    let app = router(AppState::new(config, spy.clone()).unwrap());

    get(&app, "/mta").await;
    get(&app, "/weather").await;

    let seen = spy.seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[("feed.test".to_string(), true), ("weather.test".to_string(), false)]
    );
}
