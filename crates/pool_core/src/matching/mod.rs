pub mod algorithm;
pub mod greedy;
pub mod mcmf;
pub mod network;
pub mod types;

use std::collections::HashSet;

use tracing::info;

use crate::model::{Request, Vehicle};

pub use algorithm::{create_matching_algorithm, MatchingAlgorithm};
pub use greedy::{compute_greedy_baseline, GreedyMatching};
pub use mcmf::{solve_min_cost_max_flow, MinCostFlowMatching};
pub use network::{build_network, FlowNetwork};
pub use types::{
    Assignment, AssignmentPlan, FlowSolution, MatchMode, MatchOptions, MatchResult,
    ParseMatchModeError,
};

/// Run one match computation.
///
/// `Greedy` reports the baseline as both totals. `Mcmf` solves the flow network
/// and runs the baseline independently for comparison. Unassigned requests are
/// the input requests, in input order, whose id no assignment covers.
pub fn match_requests(
    vehicles: &[Vehicle],
    requests: &[Request],
    options: &MatchOptions,
) -> MatchResult {
    let (plan, baseline_added_time) = match options.mode {
        MatchMode::Greedy => {
            let plan = compute_greedy_baseline(vehicles, requests, options.cost_mode);
            let baseline = plan.total_added_time;
            (plan, baseline)
        }
        MatchMode::Mcmf => {
            let plan = MinCostFlowMatching::new(options.cost_mode).assign(vehicles, requests);
            let baseline = compute_greedy_baseline(vehicles, requests, options.cost_mode);
            (plan, baseline.total_added_time)
        }
    };

    let matched: HashSet<&str> = plan
        .assignments
        .iter()
        .map(|a| a.request_id.as_str())
        .collect();
    let unassigned: Vec<Request> = requests
        .iter()
        .filter(|r| !matched.contains(r.id.as_str()))
        .cloned()
        .collect();

    info!(
        mode = %options.mode,
        cost_mode = %options.cost_mode,
        vehicles = vehicles.len(),
        requests = requests.len(),
        assigned = plan.assignments.len(),
        unassigned = unassigned.len(),
        total_added_time = plan.total_added_time,
        baseline_added_time,
        "match computed"
    );

    MatchResult {
        assignments: plan.assignments,
        total_added_time: plan.total_added_time,
        baseline_added_time,
        unassigned,
    }
}
