use crate::cost::{estimate_added_time, is_feasible, CostMode};
use crate::model::{Request, Vehicle};

use super::algorithm::MatchingAlgorithm;
use super::types::{Assignment, AssignmentPlan, MatchMode};

/// Myopic baseline assignment.
///
/// Requests are considered by ascending `earliest` (missing = 0, stable on input
/// order). Each takes the feasible vehicle with seats left and the lowest added
/// time; the first vehicle seen wins ties. There is no backtracking, so a
/// request left without a vehicle stays unassigned.
///
/// Added times are kept unrounded.
pub fn compute_greedy_baseline(
    vehicles: &[Vehicle],
    requests: &[Request],
    cost_mode: CostMode,
) -> AssignmentPlan {
    let mut remaining: Vec<u32> = vehicles.iter().map(|v| v.capacity).collect();

    let mut order: Vec<&Request> = requests.iter().collect();
    let earliest = |request: &&Request| request.earliest_or_zero();
    order.sort_by(|a, b| earliest(a).total_cmp(&earliest(b)));

    let mut plan = AssignmentPlan::default();
    for request in order {
        let mut best: Option<(usize, f64)> = None;

        for (i, vehicle) in vehicles.iter().enumerate() {
            if remaining[i] == 0 || !is_feasible(vehicle, request, cost_mode) {
                continue;
            }
            let added_time = estimate_added_time(vehicle, request, cost_mode);
            if best.map_or(true, |(_, best_time)| added_time < best_time) {
                best = Some((i, added_time));
            }
        }

        if let Some((i, added_time)) = best {
            remaining[i] -= 1;
            plan.total_added_time += added_time;
            plan.assignments.push(Assignment {
                vehicle_id: vehicles[i].id.clone(),
                request_id: request.id.clone(),
                added_time,
            });
        }
    }

    plan
}

/// Greedy matching strategy; see [`compute_greedy_baseline`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMatching {
    pub cost_mode: CostMode,
}

impl GreedyMatching {
    pub fn new(cost_mode: CostMode) -> Self {
        Self { cost_mode }
    }
}

impl MatchingAlgorithm for GreedyMatching {
    fn mode(&self) -> MatchMode {
        MatchMode::Greedy
    }

    fn assign(&self, vehicles: &[Vehicle], requests: &[Request]) -> AssignmentPlan {
        compute_greedy_baseline(vehicles, requests, self.cost_mode)
    }
}
