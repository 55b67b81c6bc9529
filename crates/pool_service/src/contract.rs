//! Batch contract: shape validation for vehicles, requests and match options.
//!
//! The engine trusts its inputs, so everything it relies on is checked here:
//! ids are non-empty strings, coordinates are finite numbers, eta is a
//! non-negative number, capacity is a positive integer, and ids are unique
//! within a batch. Errors describe the first offending item.

use std::collections::HashSet;

use pool_core::cost::CostMode;
use pool_core::matching::{MatchMode, MatchOptions};
use pool_core::model::{Request, Vehicle};
use pool_core::spatial::GeoPoint;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("drivers and requests must be arrays")]
    NotAnArray,
    #[error("Invalid driver: {0}")]
    InvalidVehicle(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Duplicate driver id: {0}")]
    DuplicateVehicleId(String),
    #[error("Duplicate request id: {0}")]
    DuplicateRequestId(String),
    #[error("mode must be \"mcmf\" or \"greedy\"")]
    InvalidMode,
    #[error("costMode must be \"approx\" or \"real\"")]
    InvalidCostMode,
}

/// A validated match batch, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBatch {
    pub vehicles: Vec<Vehicle>,
    pub requests: Vec<Request>,
    pub options: MatchOptions,
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|x| x.is_finite())
}

fn finite_f64(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object.get(key).and_then(finite)
}

/// Optional numeric field: absent or `null` is `Ok(None)`, anything non-numeric is `Err`.
fn optional_f64(object: &Map<String, Value>, key: &str) -> Result<Option<f64>, ()> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => finite(value).map(Some).ok_or(()),
    }
}

fn point(value: Option<&Value>) -> Option<GeoPoint> {
    let object = value?.as_object()?;
    let lat = finite_f64(object, "lat")?;
    let lng = finite_f64(object, "lng")?;
    Some(GeoPoint::new(lat, lng))
}

/// Validate one vehicle record.
pub fn parse_vehicle(value: &Value) -> Result<Vehicle, ValidationError> {
    let invalid = || ValidationError::InvalidVehicle(value.to_string());
    let object = value.as_object().ok_or_else(invalid)?;

    let id = non_empty_str(object, "id").ok_or_else(invalid)?;
    let lat = finite_f64(object, "lat").ok_or_else(invalid)?;
    let lng = finite_f64(object, "lng").ok_or_else(invalid)?;
    let eta_min = finite_f64(object, "etaMin")
        .filter(|eta| *eta >= 0.0)
        .ok_or_else(invalid)?;
    let capacity = object
        .get("capacity")
        .and_then(Value::as_u64)
        .filter(|c| *c > 0)
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(invalid)?;

    Ok(Vehicle::new(id, lat, lng, eta_min, capacity))
}

/// Validate one request record.
pub fn parse_request(value: &Value) -> Result<Request, ValidationError> {
    let invalid = || ValidationError::InvalidRequest(value.to_string());
    let object = value.as_object().ok_or_else(invalid)?;

    let id = non_empty_str(object, "id").ok_or_else(invalid)?;
    let src = point(object.get("src")).ok_or_else(invalid)?;
    let dst = point(object.get("dst")).ok_or_else(invalid)?;
    let earliest = optional_f64(object, "earliest").map_err(|_| invalid())?;
    let latest = optional_f64(object, "latest").map_err(|_| invalid())?;

    let mut request = Request::new(id, src, dst);
    request.earliest = earliest;
    request.latest = latest;
    Ok(request)
}

fn parse_options(object: &Map<String, Value>) -> Result<MatchOptions, ValidationError> {
    let mode = match object.get("mode") {
        None | Some(Value::Null) => MatchMode::default(),
        Some(value) => value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or(ValidationError::InvalidMode)?,
    };
    let cost_mode = match object.get("costMode") {
        None | Some(Value::Null) => CostMode::default(),
        Some(value) => value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or(ValidationError::InvalidCostMode)?,
    };
    Ok(MatchOptions { mode, cost_mode })
}

/// Validate a `/match` body: `{vehicles|drivers, requests, mode?, costMode?}`.
pub fn parse_match_batch(body: &Value) -> Result<MatchBatch, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let vehicles = object
        .get("vehicles")
        .or_else(|| object.get("drivers"))
        .and_then(Value::as_array)
        .ok_or(ValidationError::NotAnArray)?;
    let requests = object
        .get("requests")
        .and_then(Value::as_array)
        .ok_or(ValidationError::NotAnArray)?;

    let vehicles = vehicles
        .iter()
        .map(parse_vehicle)
        .collect::<Result<Vec<_>, _>>()?;
    let requests = requests
        .iter()
        .map(parse_request)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    if let Some(vehicle) = vehicles.iter().find(|v| !seen.insert(v.id.as_str())) {
        return Err(ValidationError::DuplicateVehicleId(vehicle.id.clone()));
    }
    let mut seen = HashSet::new();
    if let Some(request) = requests.iter().find(|r| !seen.insert(r.id.as_str())) {
        return Err(ValidationError::DuplicateRequestId(request.id.clone()));
    }

    let options = parse_options(object)?;

    Ok(MatchBatch {
        vehicles,
        requests,
        options,
    })
}
