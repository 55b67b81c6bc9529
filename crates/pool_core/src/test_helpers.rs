//! Test helpers: fixed fixtures and seeded random batches.
//!
//! Shared by unit tests, integration tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Request, Vehicle};
use crate::spatial::GeoPoint;

/// Centre of generated batches (Delhi, as in the reference fixture).
pub const BATCH_CENTER: GeoPoint = GeoPoint {
    lat: 28.7,
    lng: 77.1,
};

fn trip(id: &str, src: (f64, f64), dst: (f64, f64)) -> Request {
    let src = GeoPoint::new(src.0, src.1);
    let dst = GeoPoint::new(dst.0, dst.1);
    Request::new(id, src, dst)
}

/// Two vehicles: `d1` (eta 5, 2 seats) and `d2` (eta 3, 1 seat).
pub fn reference_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle::new("d1", 28.7, 77.1, 5.0, 2),
        Vehicle::new("d2", 28.75, 77.15, 3.0, 1),
    ]
}

/// Three unwindowed requests. Approx added times:
///
/// | | r1 | r2 | r3 |
/// |----|----|----|----|
/// | d1 | 6 | 10 | 7 |
/// | d2 | 7 | 4 | 6 |
pub fn reference_requests() -> Vec<Request> {
    vec![
        trip("r1", (28.705, 77.11), (28.72, 77.12)),
        trip("r2", (28.76, 77.16), (28.78, 77.18)),
        trip("r3", (28.71, 77.13), (28.73, 77.14)),
    ]
}

/// Two single-seat vehicles on the equator.
pub fn rerouting_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle::new("d1", 0.0, 0.0, 0.0, 1),
        Vehicle::new("d2", 0.035, 0.0, 0.0, 1),
    ]
}

/// Requests whose locally cheapest pairing (d1→r1) is not optimal. Approx added times:
///
/// | | r1 | r2 |
/// |----|----|----|
/// | d1 | 1 | 2 |
/// | d2 | 2 | 4 |
pub fn rerouting_requests() -> Vec<Request> {
    vec![
        trip("r1", (0.01, 0.0), (0.02, 0.0)),
        trip("r2", (-0.03, 0.0), (-0.04, 0.0)),
    ]
}

/// Deterministic random batch scattered around [`BATCH_CENTER`].
///
/// Vehicles get 1–3 seats and an eta under 15 minutes, kept to two decimals so
/// approx-mode added times are exact in scaled cost units. Roughly half the
/// requests carry an `earliest` bound and most carry a `latest` bound, so the
/// batch mixes feasible and infeasible pairs.
pub fn random_batch(
    seed: u64,
    num_vehicles: usize,
    num_requests: usize,
) -> (Vec<Vehicle>, Vec<Request>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = 0.3;

    let vehicles = (0..num_vehicles)
        .map(|i| {
            Vehicle::new(
                format!("v{i}"),
                BATCH_CENTER.lat + rng.gen_range(-spread..spread),
                BATCH_CENTER.lng + rng.gen_range(-spread..spread),
                round_to_hundredths(rng.gen_range(0.0..15.0)),
                rng.gen_range(1..=3),
            )
        })
        .collect();

    let requests = (0..num_requests)
        .map(|j| {
            let src = GeoPoint::new(
                BATCH_CENTER.lat + rng.gen_range(-spread..spread),
                BATCH_CENTER.lng + rng.gen_range(-spread..spread),
            );
            let dst = GeoPoint::new(
                src.lat + rng.gen_range(-0.05..0.05),
                src.lng + rng.gen_range(-0.05..0.05),
            );
            let mut request = Request::new(format!("q{j}"), src, dst);
            if rng.gen_bool(0.5) {
                request.earliest = Some(rng.gen_range(0.0..30.0));
            }
            if rng.gen_bool(0.7) {
                request.latest = Some(request.earliest_or_zero() + rng.gen_range(5.0..40.0));
            }
            request
        })
        .collect();

    (vehicles, requests)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
