//! Match the reference batch with both strategies and print the assignments.
//!
//! Run with: cargo run -p pool_core --example reference_batch

use pool_core::matching::{match_requests, MatchMode, MatchOptions};
use pool_core::test_helpers::{reference_requests, reference_vehicles};

fn main() {
    let vehicles = reference_vehicles();
    let requests = reference_requests();

    for mode in [MatchMode::Mcmf, MatchMode::Greedy] {
        let options = MatchOptions::default().with_mode(mode);
        let result = match_requests(&vehicles, &requests, &options);
        let (nv, nr) = (vehicles.len(), requests.len());
        println!("--- {mode} ({nv} vehicles, {nr} requests) ---");
        for a in &result.assignments {
            let (vehicle, request) = (&a.vehicle_id, &a.request_id);
            println!("  {vehicle} -> {request}  {:.2} min", a.added_time);
        }
        println!("Total added time: {:.2} min", result.total_added_time);
        println!("Baseline added time: {:.2} min", result.baseline_added_time);
        println!("Unassigned: {}", result.unassigned.len());
    }
}
