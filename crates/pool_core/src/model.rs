//! Input records for one match computation.
//!
//! Field names on the wire follow the service contract (`etaMin`, `src`, `dst`, ...).
//! Both records are read-only for the duration of a match call.

use serde::{Deserialize, Serialize};

use crate::spatial::GeoPoint;

fn default_capacity() -> u32 {
    1
}

/// A vehicle offering seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Minutes until the vehicle becomes available (>= 0).
    #[serde(default)]
    pub eta_min: f64,
    /// Seat capacity (> 0).
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, eta_min: f64, capacity: u32) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            eta_min,
            capacity,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A passenger trip request with an optional pickup window (minutes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub src: GeoPoint,
    /// Drop-off point. Part of the contract; not used by the cost model.
    pub dst: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
}

impl Request {
    pub fn new(id: impl Into<String>, src: GeoPoint, dst: GeoPoint) -> Self {
        Self {
            id: id.into(),
            src,
            dst,
            earliest: None,
            latest: None,
        }
    }

    pub fn with_earliest(mut self, earliest: f64) -> Self {
        self.earliest = Some(earliest);
        self
    }

    pub fn with_latest(mut self, latest: f64) -> Self {
        self.latest = Some(latest);
        self
    }

    /// Window start used for greedy ordering; a missing bound counts as 0.
    pub fn earliest_or_zero(&self) -> f64 {
        self.earliest.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_defaults_eta_and_capacity() {
        let vehicle: Vehicle =
            serde_json::from_str(r#"{"id":"d1","lat":28.7,"lng":77.1}"#).expect("vehicle");
        assert_eq!(vehicle.eta_min, 0.0);
        assert_eq!(vehicle.capacity, 1);
    }

    #[test]
    fn request_uses_camel_case_wire_names() {
        let request = Request::new("r1", GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0));
        let json = serde_json::to_value(request.with_latest(15.0)).expect("serialize");
        assert_eq!(json["src"]["lat"], 1.0);
        assert_eq!(json["latest"], 15.0);
        assert!(json.get("earliest").is_none());

        let vehicle = Vehicle::new("d1", 0.0, 0.0, 5.0, 2);
        let json = serde_json::to_value(&vehicle).expect("serialize");
        assert_eq!(json["etaMin"], 5.0);
    }
}
