//! Pickup-time estimation and feasibility.
//!
//! Two interchangeable cost modes share one contract: given a vehicle and a
//! request, return the pickup time in minutes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Request, Vehicle};
use crate::spatial::{degree_distance, haversine_km};

/// Minutes per degree of Euclidean coordinate distance in approx mode.
pub const APPROX_MINUTES_PER_DEGREE: f64 = 50.0;

/// Assumed travel speed in real mode (km/h).
pub const AVG_SPEED_KMH: f64 = 40.0;

/// Pickups longer than this are rejected regardless of any window (minutes).
pub const MAX_PICKUP_MINUTES: f64 = 60.0;

/// Scale factor for integer edge costs (two decimal digits of a minute).
pub const COST_SCALE: f64 = 100.0;

/// How pickup time is derived from coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Euclidean degree distance × 50, rounded up to whole minutes.
    #[default]
    Approx,
    /// Haversine kilometres at 40 km/h.
    Real,
}

impl CostMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approx => "approx",
            Self::Real => "real",
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cost mode '{0}', expected \"approx\" or \"real\"")]
pub struct ParseCostModeError(pub String);

impl FromStr for CostMode {
    type Err = ParseCostModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approx" => Ok(Self::Approx),
            "real" => Ok(Self::Real),
            other => Err(ParseCostModeError(other.to_string())),
        }
    }
}

/// Convert kilometres to minutes at the assumed average speed.
pub fn km_to_minutes(distance_km: f64) -> f64 {
    (distance_km / AVG_SPEED_KMH) * 60.0
}

/// Minutes the vehicle needs to reach the request's pickup point.
pub fn estimate_pickup_time(vehicle: &Vehicle, request: &Request, cost_mode: CostMode) -> f64 {
    match cost_mode {
        CostMode::Approx => {
            (degree_distance(vehicle.position(), request.src) * APPROX_MINUTES_PER_DEGREE).ceil()
        }
        CostMode::Real => km_to_minutes(haversine_km(vehicle.position(), request.src)),
    }
}

/// Arrival time at pickup: availability eta plus pickup travel.
pub fn estimate_added_time(vehicle: &Vehicle, request: &Request, cost_mode: CostMode) -> f64 {
    vehicle.eta_min + estimate_pickup_time(vehicle, request, cost_mode)
}

/// Whether the vehicle may serve the request.
///
/// Early arrival relative to `earliest` is allowed (the vehicle waits). Only a
/// strict violation of `latest` or the pickup ceiling makes a pair infeasible.
pub fn is_feasible(vehicle: &Vehicle, request: &Request, cost_mode: CostMode) -> bool {
    let pickup = estimate_pickup_time(vehicle, request, cost_mode);
    let arrival = vehicle.eta_min + pickup;

    if request.latest.is_some_and(|latest| arrival > latest) {
        return false;
    }

    pickup <= MAX_PICKUP_MINUTES
}

/// Integer edge cost for an added time, rounded to the nearest hundredth of a minute.
pub fn scaled_cost(added_time: f64) -> i64 {
    (added_time * COST_SCALE).round() as i64
}

/// Inverse of [`scaled_cost`].
pub fn unscaled_cost(cost: i64) -> f64 {
    cost as f64 / COST_SCALE
}
