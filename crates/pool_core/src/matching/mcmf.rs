//! Min-cost max-flow by successive shortest augmenting paths.
//!
//! Each round runs Dijkstra on reduced costs `c + π(u) − π(v)`, lifts the
//! potentials by the new distances and pushes the bottleneck along the path.
//! Residual twins carry negative raw cost; the potentials keep their reduced
//! cost non-negative, which is what makes repeated Dijkstra valid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::cost::{unscaled_cost, CostMode};
use crate::model::{Request, Vehicle};

use super::algorithm::MatchingAlgorithm;
use super::network::{build_network, EdgeId, FlowNetwork, NodeId, SINK, SOURCE};
use super::types::{Assignment, AssignmentPlan, FlowSolution, MatchMode};

const UNREACHABLE: i64 = i64::MAX;

/// Per-call solver scratch space, sized to the network.
struct SolverState {
    potential: Vec<i64>,
    dist: Vec<i64>,
    prev_edge: Vec<Option<EdgeId>>,
    heap: BinaryHeap<Reverse<(i64, NodeId)>>,
}

impl SolverState {
    fn new(node_count: usize) -> Self {
        Self {
            potential: vec![0; node_count],
            dist: vec![UNREACHABLE; node_count],
            prev_edge: vec![None; node_count],
            heap: BinaryHeap::new(),
        }
    }

    /// Shortest reduced-cost distances from the source over edges with residual capacity.
    fn shortest_paths(&mut self, network: &FlowNetwork) {
        self.dist.fill(UNREACHABLE);
        self.prev_edge.fill(None);
        self.heap.clear();

        self.dist[SOURCE] = 0;
        self.heap.push(Reverse((0, SOURCE)));

        while let Some(Reverse((d, u))) = self.heap.pop() {
            if d != self.dist[u] {
                continue;
            }
            for &id in network.outgoing(u) {
                let edge = network.edge(id);
                if edge.residual == 0 {
                    continue;
                }
                let v = edge.head;
                let reduced = edge.cost + self.potential[u] - self.potential[v];
                let candidate = d + reduced;
                if candidate < self.dist[v] {
                    self.dist[v] = candidate;
                    self.prev_edge[v] = Some(id);
                    self.heap.push(Reverse((candidate, v)));
                }
            }
        }
    }

    fn lift_potentials(&mut self) {
        for (potential, &dist) in self.potential.iter_mut().zip(&self.dist) {
            if dist != UNREACHABLE {
                *potential += dist;
            }
        }
    }

    /// Edges of the shortest source→sink path, sink end first.
    ///
    /// # Panics
    ///
    /// Panics if the predecessor chain from a reachable sink does not lead back
    /// to the source. That means the network or the distance labels are corrupt.
    fn augmenting_path(&self, network: &FlowNetwork) -> Vec<EdgeId> {
        let mut path = Vec::new();
        let mut v = SINK;
        while v != SOURCE {
            let Some(id) = self.prev_edge[v] else {
                panic!("augmenting path broken at node {v}: sink has no predecessor chain");
            };
            assert!(
                path.len() < network.node_count(),
                "augmenting path revisits a node; predecessor chain contains a cycle"
            );
            path.push(id);
            v = network.edge(id).tail;
        }
        path
    }
}

/// Route as much flow as the network admits at minimum total cost.
///
/// Assignments are read back from vehicle→request edges that carry flow, in
/// vehicle then request input order. `total_cost` stays in scaled units.
pub fn solve_min_cost_max_flow(network: &mut FlowNetwork) -> FlowSolution {
    let mut state = SolverState::new(network.node_count());
    let mut total_flow: u32 = 0;
    let mut total_cost: i64 = 0;

    loop {
        state.shortest_paths(network);
        if state.dist[SINK] == UNREACHABLE {
            break;
        }
        state.lift_potentials();

        let path = state.augmenting_path(network);
        let bottleneck = path
            .iter()
            .map(|id| network.edge(*id).residual)
            .min()
            .unwrap_or(0);
        if bottleneck == 0 {
            break;
        }

        let path_cost: i64 = path.iter().map(|id| network.edge(*id).cost).sum();
        for &id in &path {
            network.push_flow(id, bottleneck);
        }

        total_flow += bottleneck;
        total_cost += i64::from(bottleneck) * path_cost;
        debug!(
            round = total_flow,
            bottleneck,
            path_len = path.len(),
            path_cost,
            "augmented flow"
        );
    }

    FlowSolution {
        total_flow,
        total_cost,
        assignments: extract_assignments(network),
    }
}

fn extract_assignments(network: &FlowNetwork) -> Vec<Assignment> {
    (0..network.vehicle_count())
        .flat_map(|i| network.outgoing(network.vehicle_node(i)))
        .map(|id| network.edge(*id))
        .filter(|edge| edge.flow() > 0)
        .filter_map(|edge| {
            edge.pairing.as_ref().map(|tag| Assignment {
                vehicle_id: tag.vehicle_id.clone(),
                request_id: tag.request_id.clone(),
                added_time: unscaled_cost(edge.cost),
            })
        })
        .collect()
}

/// Optimal matching: builds the flow network and solves it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinCostFlowMatching {
    pub cost_mode: CostMode,
}

impl MinCostFlowMatching {
    pub fn new(cost_mode: CostMode) -> Self {
        Self { cost_mode }
    }

    /// Full solver output, including the flow value.
    pub fn solve(&self, vehicles: &[Vehicle], requests: &[Request]) -> FlowSolution {
        let mut network = build_network(vehicles, requests, self.cost_mode);
        solve_min_cost_max_flow(&mut network)
    }
}

impl MatchingAlgorithm for MinCostFlowMatching {
    fn mode(&self) -> MatchMode {
        MatchMode::Mcmf
    }

    fn assign(&self, vehicles: &[Vehicle], requests: &[Request]) -> AssignmentPlan {
        self.solve(vehicles, requests).into_plan()
    }
}
