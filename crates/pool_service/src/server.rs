//! HTTP surface: `/match`, `/drivers` (`/vehicles`), `/requests`, `/health`.

use std::any::Any;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use pool_core::model::{Request, Vehicle};
use serde::Serialize;
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::{health, run_batch, validate_match, HealthReport, MatchResponse};
use crate::store::FleetStore;

#[derive(Debug, Default)]
pub struct AppState {
    pub store: Mutex<FleetStore>,
}

impl AppState {
    pub fn new(store: FleetStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

#[derive(Debug, Serialize)]
struct Created<T> {
    message: &'static str,
    #[serde(flatten)]
    item: T,
}

#[derive(Debug, Serialize)]
struct DriverCreated {
    driver: Vehicle,
}

#[derive(Debug, Serialize)]
struct RequestCreated {
    request: Request,
}

async fn post_match(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<MatchResponse>, ApiError> {
    let batch = validate_match(&body)?;
    let response = tokio::task::spawn_blocking(move || run_batch(&batch))
        .await
        .map_err(|error| ApiError::InternalServerError(error.to_string()))?;
    state.store.lock().record_match(&response.result);
    info!(
        mode = %response.mode,
        assigned = response.result.assignments.len(),
        processing_time_ms = response.processing_time_ms,
        "served /match"
    );
    Ok(Json(response))
}

async fn post_vehicle(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Created<DriverCreated>>, ApiError> {
    let driver = state.store.lock().add_vehicle(&body)?.clone();
    Ok(Json(Created {
        message: "Driver added successfully",
        item: DriverCreated { driver },
    }))
}

async fn post_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Created<RequestCreated>>, ApiError> {
    let request = state.store.lock().add_request(&body)?.clone();
    Ok(Json(Created {
        message: "Request added successfully",
        item: RequestCreated { request },
    }))
}

async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(health(&state.store.lock()))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::InternalServerError(message).into_response()
}

pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/match", post(post_match))
        .route("/drivers", post(post_vehicle))
        .route("/vehicles", post(post_vehicle))
        .route("/requests", post(post_request))
        .route("/health", get(get_health))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer)
        .with_state(state)
}
