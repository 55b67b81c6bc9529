//! Transport-free request handling shared by the HTTP server and the CLI.

use std::time::Instant;

use pool_core::matching::{match_requests, MatchMode, MatchResult};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::contract::{parse_match_batch, MatchBatch, ValidationError};
use crate::store::{FleetStore, MatchStats};

/// Body of a successful `/match` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub processing_time_ms: u64,
    pub mode: MatchMode,
}

/// Run a validated batch through the engine, timing the call.
pub fn run_batch(batch: &MatchBatch) -> MatchResponse {
    let start = Instant::now();
    let result = match_requests(&batch.vehicles, &batch.requests, &batch.options);
    MatchResponse {
        result,
        processing_time_ms: start.elapsed().as_millis() as u64,
        mode: batch.options.mode,
    }
}

/// Validate a raw `/match` body into a batch ready for [`run_batch`].
pub fn validate_match(body: &Value) -> Result<MatchBatch, ValidationError> {
    parse_match_batch(body).inspect_err(|error| {
        warn!(%error, "rejected match batch");
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    #[serde(flatten)]
    pub matches: MatchStats,
    pub drivers_in_memory: usize,
    pub requests_in_memory: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub stats: HealthStats,
    /// Seconds since the store was created.
    pub uptime: f64,
}

pub fn health(store: &FleetStore) -> HealthReport {
    HealthReport {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        stats: HealthStats {
            matches: store.stats(),
            drivers_in_memory: store.vehicles().len(),
            requests_in_memory: store.requests().len(),
        },
        uptime: store.uptime().as_secs_f64(),
    }
}
