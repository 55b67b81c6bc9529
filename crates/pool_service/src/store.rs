//! In-memory fleet store and match counters.
//!
//! The store is owned by whoever serves requests and is passed explicitly to
//! the handlers. The matching engine never reads it: `/match` batches carry
//! their own vehicles and requests.

use std::time::{Duration, Instant};

use pool_core::matching::MatchResult;
use pool_core::model::{Request, Vehicle};
use serde::Serialize;
use serde_json::Value;

use crate::contract::{parse_request, parse_vehicle, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid driver data")]
    InvalidVehicle(#[source] ValidationError),
    #[error("Invalid request data")]
    InvalidRequest(#[source] ValidationError),
    #[error("Driver ID already exists")]
    DuplicateVehicle(String),
    #[error("Request ID already exists")]
    DuplicateRequest(String),
}

/// Aggregate counters across match calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub match_count: u64,
    pub total_assignments: u64,
}

#[derive(Debug)]
pub struct FleetStore {
    vehicles: Vec<Vehicle>,
    requests: Vec<Request>,
    stats: MatchStats,
    started_at: Instant,
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetStore {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            requests: Vec::new(),
            stats: MatchStats::default(),
            started_at: Instant::now(),
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Validate and store a vehicle; ids must be unique within the store.
    pub fn add_vehicle(&mut self, value: &Value) -> Result<&Vehicle, StoreError> {
        let vehicle = parse_vehicle(value).map_err(StoreError::InvalidVehicle)?;
        if self.vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(StoreError::DuplicateVehicle(vehicle.id));
        }
        self.vehicles.push(vehicle);
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    /// Validate and store a request; ids must be unique within the store.
    pub fn add_request(&mut self, value: &Value) -> Result<&Request, StoreError> {
        let request = parse_request(value).map_err(StoreError::InvalidRequest)?;
        if self.requests.iter().any(|r| r.id == request.id) {
            return Err(StoreError::DuplicateRequest(request.id));
        }
        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    pub fn record_match(&mut self, result: &MatchResult) {
        self.stats.match_count += 1;
        self.stats.total_assignments += result.assignments.len() as u64;
    }
}
