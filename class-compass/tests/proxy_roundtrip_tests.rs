//! End-to-end tests against a fake distance-matrix provider on a local port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use class_compass::config::AppConfig;
use class_compass::schedule::TransportMode;
use class_compass::travel::{ProxyClient, TravelTime, TravelTimeSource, extract_travel_time};
use class_compass::web::{AppState, create_router};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct FakeProvider {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeProvider {
    fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

/// Answers "<mode> to <destination>" for every pair, except a few magic
/// destinations that simulate provider trouble.
async fn fake_matrix(
    State(fake): State<FakeProvider>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.queries.lock().unwrap().push(params.clone());

    let origin = params.get("origins").cloned().unwrap_or_default();
    let destination = params.get("destinations").cloned().unwrap_or_default();
    let mode = params.get("mode").cloned().unwrap_or_default();

    match destination.as_str() {
        "Nowhere" => (StatusCode::SERVICE_UNAVAILABLE, "provider down").into_response(),
        "Void" => Json(json!({
            "status": "OK",
            "rows": [{ "elements": [{ "status": "ZERO_RESULTS" }] }]
        }))
        .into_response(),
        _ => Json(json!({
            "status": "OK",
            "origin_addresses": [origin],
            "destination_addresses": [destination],
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "duration": { "text": format!("{mode} to {destination}"), "value": 600 },
                    "distance": { "text": "2 km", "value": 2000 }
                }]
            }]
        }))
        .into_response(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_provider() -> (FakeProvider, SocketAddr) {
    let fake = FakeProvider::default();
    let app = Router::new()
        .route("/maps/api/distancematrix/json", get(fake_matrix))
        .with_state(fake.clone());
    (fake, spawn(app).await)
}

fn config_for(provider: SocketAddr) -> AppConfig {
    let mut config = AppConfig::new("test-key");
    config.maps = config
        .maps
        .with_base_url(format!("http://{provider}/maps/api/distancematrix/json"));
    config
}

async fn spawn_app(config: &AppConfig) -> SocketAddr {
    let public = std::env::temp_dir();
    let state = AppState::from_config(config).unwrap();
    spawn(create_router(state, public)).await
}

fn class(name: &str, start: &str, end: &str, location: &str, mode: &str) -> Value {
    json!({
        "name": name,
        "startTime": start,
        "endTime": end,
        "location": location,
        "professor": "",
        "transportMode": mode
    })
}

async fn add(http: &reqwest::Client, app: SocketAddr, class: Value) -> Value {
    let response = http
        .post(format!("http://{app}/api/schedule"))
        .json(&class)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    response.json().await.unwrap()
}

fn travel_times(schedule: &Value) -> Vec<String> {
    schedule["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["travelTime"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn distance_relays_provider_json() {
    let (fake, provider) = spawn_provider().await;
    let app = spawn_app(&config_for(provider)).await;

    let response = reqwest::Client::new()
        .get(format!("http://{app}/distance"))
        .query(&[
            ("origin", "Building B"),
            ("destination", "Building A"),
            ("mode", "driving"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["rows"][0]["elements"][0]["duration"]["text"],
        "driving to Building A"
    );
    assert_eq!(body["origin_addresses"][0], "Building B");

    let queries = fake.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["origins"], "Building B");
    assert_eq!(queries[0]["destinations"], "Building A");
    assert_eq!(queries[0]["mode"], "driving");
    assert_eq!(queries[0]["key"], "test-key");
}

#[tokio::test]
async fn distance_provider_error_status_is_uniform_failure() {
    let (_fake, provider) = spawn_provider().await;
    let app = spawn_app(&config_for(provider)).await;

    let response = reqwest::Client::new()
        .get(format!("http://{app}/distance"))
        .query(&[("origin", "Home"), ("destination", "Nowhere"), ("mode", "walking")])
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to fetch distance data" }));
}

#[tokio::test]
async fn proxy_client_reads_through_the_app() {
    let (_fake, provider) = spawn_provider().await;
    let app = spawn_app(&config_for(provider)).await;

    let proxy = ProxyClient::new(&format!("http://{app}/")).unwrap();
    let response = proxy
        .distance_matrix("Library", "Gym", TransportMode::Bicycling)
        .await
        .unwrap();

    assert_eq!(
        extract_travel_time(&response).unwrap(),
        TravelTime::Duration("bicycling to Gym".into())
    );
}

#[tokio::test]
async fn schedule_shows_travel_time_from_previous_class() {
    let (fake, provider) = spawn_provider().await;
    let app = spawn_app(&config_for(provider)).await;
    let http = reqwest::Client::new();

    add(&http, app, class("Math", "09:00", "10:00", "Building A", "driving")).await;
    let schedule = add(
        &http,
        app,
        class("Physics", "08:00", "08:50", "Building B", "walking"),
    )
    .await;

    // Physics comes first, so Math is reached from Building B using Math's mode.
    assert_eq!(
        travel_times(&schedule),
        ["No travel time available", "driving to Building A"]
    );
    assert_eq!(schedule["classes"][1]["travelTimeKnown"], true);

    let last = fake.queries().pop().unwrap();
    assert_eq!(last["origins"], "Building B");
    assert_eq!(last["destinations"], "Building A");
    assert_eq!(last["mode"], "driving");
}

#[tokio::test]
async fn failed_segments_do_not_block_later_ones() {
    let (_fake, provider) = spawn_provider().await;
    let app = spawn_app(&config_for(provider)).await;
    let http = reqwest::Client::new();

    add(&http, app, class("Math", "09:00", "10:00", "Building A", "driving")).await;
    add(&http, app, class("Lab", "10:30", "11:30", "Nowhere", "walking")).await;
    add(&http, app, class("Seminar", "12:00", "13:00", "Void", "transit")).await;
    let schedule = add(
        &http,
        app,
        class("History", "14:00", "15:00", "Hall C", "bicycling"),
    )
    .await;

    assert_eq!(
        travel_times(&schedule),
        [
            "No travel time available",
            "No travel time available",
            "--",
            "bicycling to Hall C",
        ]
    );
}

#[tokio::test]
async fn resolver_can_route_through_a_remote_proxy() {
    let (fake, provider) = spawn_provider().await;
    let upstream_app = spawn_app(&config_for(provider)).await;

    // This instance's provider is unreachable; it must use the proxy.
    let mut config = AppConfig::new("unused-key");
    config.maps = config
        .maps
        .with_base_url("http://127.0.0.1:9/maps/api/distancematrix/json");
    config.proxy_url = Some(format!("http://{upstream_app}/"));
    config.max_in_flight = 2;
    let app = spawn_app(&config).await;

    let http = reqwest::Client::new();
    add(&http, app, class("Math", "09:00", "10:00", "Building A", "driving")).await;
    let schedule = add(
        &http,
        app,
        class("Chemistry", "11:00", "12:00", "Building D", "transit"),
    )
    .await;

    assert_eq!(
        travel_times(&schedule),
        ["No travel time available", "transit to Building D"]
    );

    let queries = fake.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["key"], "test-key");
}
