//! Spatial primitives: coordinates and the two distance measures used by the cost model.
//!
//! This module provides:
//!
//! - **GeoPoint**: a latitude/longitude pair in degrees
//! - **Haversine distance**: great-circle distance in kilometres
//! - **Degree distance**: planar Euclidean distance in coordinate-degree space
//!
//! Neither measure models a road network; both are geometric proxies.

use serde::{Deserialize, Serialize};

/// Mean earth radius (km) used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Euclidean distance in raw degree space (not a physical distance).
pub fn degree_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    (b.lat - a.lat).hypot(b.lng - a.lng)
}
