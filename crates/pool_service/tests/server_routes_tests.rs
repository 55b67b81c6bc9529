use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pool_core::test_helpers::random_batch;
use pool_service::config::ServerConfig;
use pool_service::server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::default());
    (router(state.clone(), &ServerConfig::default()), state)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn batch(mode: &str) -> Value {
    json!({
        "drivers": [
            {"id": "d1", "lat": 28.7, "lng": 77.1, "etaMin": 5, "capacity": 2},
            {"id": "d2", "lat": 28.75, "lng": 77.15, "etaMin": 3, "capacity": 1}
        ],
        "requests": [
            {"id": "r1", "src": {"lat": 28.705, "lng": 77.11}, "dst": {"lat": 28.72, "lng": 77.12}},
            {"id": "r2", "src": {"lat": 28.76, "lng": 77.16}, "dst": {"lat": 28.78, "lng": 77.18}},
            {"id": "r3", "src": {"lat": 28.71, "lng": 77.13}, "dst": {"lat": 28.73, "lng": 77.14}, "latest": 1}
        ],
        "mode": mode
    })
}

#[tokio::test]
async fn match_returns_result_and_updates_stats() {
    let (app, state) = app();
    let (status, body) = send(app, "POST", "/match", Some(batch("mcmf"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "mcmf");
    assert_eq!(body["assignments"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["unassigned"][0]["id"], "r3");
    assert_eq!(body["totalAddedTime"], 10.0);
    assert!(body["processingTimeMs"].is_u64());

    let stats = state.store.lock().stats();
    assert_eq!(stats.match_count, 1);
    assert_eq!(stats.total_assignments, 2);
}

#[tokio::test]
async fn match_rejects_invalid_driver_with_description() {
    let (app, state) = app();
    let mut body = batch("mcmf");
    body["drivers"][1]["capacity"] = json!(0);

    let (status, body) = send(app, "POST", "/match", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("Invalid driver: "), "{message}");
    assert!(message.contains("\"d2\""), "{message}");
    assert_eq!(state.store.lock().stats().match_count, 0);
}

#[tokio::test]
async fn match_rejects_unknown_mode() {
    let (app, _) = app();
    let (status, body) = send(app, "POST", "/match", Some(batch("fastest"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "mode must be \"mcmf\" or \"greedy\"");
}

#[tokio::test]
async fn drivers_and_requests_are_stored_once() {
    let (app, state) = app();
    let driver = json!({"id": "d1", "lat": 28.7, "lng": 77.1, "etaMin": 5, "capacity": 2});

    let (status, body) = send(app.clone(), "POST", "/drivers", Some(driver.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Driver added successfully");
    assert_eq!(body["driver"]["id"], "d1");

    let (status, body) = send(app.clone(), "POST", "/vehicles", Some(driver)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Driver ID already exists");

    let request = json!({"id": "r1", "src": {"lat": 1.0, "lng": 2.0}, "dst": {"lat": 1.1, "lng": 2.1}});
    let (status, body) = send(app.clone(), "POST", "/requests", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["src"]["lng"], 2.0);

    let (status, body) = send(app, "POST", "/requests", Some(json!({"id": "r2"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");

    let store = state.store.lock();
    assert_eq!(store.vehicles().len(), 1);
    assert_eq!(store.requests().len(), 1);
}

#[tokio::test]
async fn health_reports_counters() {
    let (app, _) = app();
    send(app.clone(), "POST", "/match", Some(batch("greedy"))).await;

    let (status, body) = send(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["stats"]["matchCount"], 1);
    assert_eq!(body["stats"]["totalAssignments"], 2);
    assert_eq!(body["stats"]["driversInMemory"], 0);
    assert!(body["timestamp"].as_str().is_some_and(|t| t.contains('T')));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_answers_while_a_match_is_solving() {
    let (app, state) = app();
    let (vehicles, requests) = random_batch(3, 200, 400);
    let body = json!({"vehicles": vehicles, "requests": requests});
    let matching = tokio::spawn(send(app.clone(), "POST", "/match", Some(body)));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let solving = !matching.is_finished();
    let (status, health) = send(app, "GET", "/health", None).await;
    let answered_first = !matching.is_finished();
    assert_eq!(status, StatusCode::OK);

    let (match_status, _) = matching.await.expect("match task");
    assert_eq!(match_status, StatusCode::OK);
    assert_eq!(state.store.lock().stats().match_count, 1);
    if solving {
        assert!(answered_first, "/health waited for the solver");
        assert_eq!(health["stats"]["matchCount"], 0);
    }
}
