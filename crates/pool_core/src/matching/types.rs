use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cost::{unscaled_cost, CostMode};
use crate::model::Request;

/// Which assignment strategy produces the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Min-cost max-flow, with the greedy baseline reported for comparison.
    #[default]
    Mcmf,
    /// Greedy baseline only.
    Greedy,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mcmf => "mcmf",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match mode '{0}', expected \"mcmf\" or \"greedy\"")]
pub struct ParseMatchModeError(pub String);

impl FromStr for MatchMode {
    type Err = ParseMatchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcmf" => Ok(Self::Mcmf),
            "greedy" => Ok(Self::Greedy),
            other => Err(ParseMatchModeError(other.to_string())),
        }
    }
}

/// Configuration for one match call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub cost_mode: CostMode,
}

impl MatchOptions {
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cost_mode(mut self, cost_mode: CostMode) -> Self {
        self.cost_mode = cost_mode;
        self
    }
}

/// A request served by a vehicle, with the realized added time in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub vehicle_id: String,
    pub request_id: String,
    pub added_time: f64,
}

/// Output of a matching strategy: assignments and their summed added time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPlan {
    pub assignments: Vec<Assignment>,
    pub total_added_time: f64,
}

/// Raw solver output. `total_cost` is in scaled integer units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowSolution {
    pub total_flow: u32,
    pub total_cost: i64,
    pub assignments: Vec<Assignment>,
}

impl FlowSolution {
    /// Total cost in minutes.
    pub fn total_added_time(&self) -> f64 {
        unscaled_cost(self.total_cost)
    }

    pub fn into_plan(self) -> AssignmentPlan {
        AssignmentPlan {
            total_added_time: self.total_added_time(),
            assignments: self.assignments,
        }
    }
}

/// Normalized result of [`match_requests`](super::match_requests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub assignments: Vec<Assignment>,
    pub total_added_time: f64,
    pub baseline_added_time: f64,
    pub unassigned: Vec<Request>,
}
