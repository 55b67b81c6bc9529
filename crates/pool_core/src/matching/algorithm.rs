use crate::cost::CostMode;
use crate::model::{Request, Vehicle};

use super::greedy::GreedyMatching;
use super::mcmf::MinCostFlowMatching;
use super::types::{AssignmentPlan, MatchMode};

/// Trait for strategies that pair vehicles with requests.
///
/// Implementations are pure functions of their inputs: identical slices in the
/// same order always produce the same plan. They hold no state between calls,
/// so one instance may be shared across threads.
///
/// # Examples
///
/// ```rust
/// use pool_core::cost::CostMode;
/// use pool_core::matching::{MatchingAlgorithm, MinCostFlowMatching};
/// use pool_core::model::{Request, Vehicle};
/// use pool_core::spatial::GeoPoint;
///
/// let vehicles = vec![Vehicle::new("d1", 28.7, 77.1, 5.0, 2)];
/// let requests = vec![Request::new(
///     "r1",
///     GeoPoint::new(28.705, 77.11),
///     GeoPoint::new(28.72, 77.12),
/// )];
///
/// let plan = MinCostFlowMatching::new(CostMode::Approx).assign(&vehicles, &requests);
/// assert_eq!(plan.assignments.len(), 1);
/// assert_eq!(plan.total_added_time, 6.0);
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Strategy tag reported alongside results.
    fn mode(&self) -> MatchMode;

    /// Assign requests to vehicles, respecting feasibility and seat capacity.
    ///
    /// Requests that cannot be served are left out of the plan.
    fn assign(&self, vehicles: &[Vehicle], requests: &[Request]) -> AssignmentPlan;
}

/// Instantiate the strategy for a mode.
pub fn create_matching_algorithm(
    mode: MatchMode,
    cost_mode: CostMode,
) -> Box<dyn MatchingAlgorithm> {
    match mode {
        MatchMode::Mcmf => Box::new(MinCostFlowMatching::new(cost_mode)),
        MatchMode::Greedy => Box::new(GreedyMatching::new(cost_mode)),
    }
}
