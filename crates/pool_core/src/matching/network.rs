//! Flow network for vehicle/request assignment.
//!
//! Nodes are laid out as source (0), sink (1), one node per vehicle, then one per
//! request, all in input order. Edges live in an arena and every forward edge is
//! pushed together with its residual twin, so augmentation touches both sides by
//! handle in O(1).

use tracing::debug;

use crate::cost::{estimate_added_time, is_feasible, scaled_cost, CostMode};
use crate::model::{Request, Vehicle};

pub type NodeId = usize;

pub const SOURCE: NodeId = 0;
pub const SINK: NodeId = 1;

/// Handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Origin of a vehicle→request edge, kept for assignment extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingTag {
    pub vehicle_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub tail: NodeId,
    pub head: NodeId,
    /// Capacity at construction; 0 on residual twins.
    pub capacity: u32,
    /// Remaining capacity.
    pub residual: u32,
    /// Per-unit cost; negated on the twin.
    pub cost: i64,
    pub twin: EdgeId,
    pub pairing: Option<PairingTag>,
}

impl Edge {
    /// Units routed through a forward edge.
    pub fn flow(&self) -> u32 {
        self.capacity.saturating_sub(self.residual)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
    vehicle_count: usize,
    request_count: usize,
}

impl FlowNetwork {
    /// Empty network with source, sink and the given partition sizes.
    pub fn new(vehicle_count: usize, request_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); 2 + vehicle_count + request_count],
            vehicle_count,
            request_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    pub fn vehicle_node(&self, vehicle_index: usize) -> NodeId {
        debug_assert!(vehicle_index < self.vehicle_count);
        2 + vehicle_index
    }

    pub fn request_node(&self, request_index: usize) -> NodeId {
        debug_assert!(request_index < self.request_count);
        2 + self.vehicle_count + request_index
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge handles leaving `node`, forward and residual alike, in insertion order.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node]
    }

    /// Forward vehicle→request edges.
    pub fn pairing_edges(&self) -> impl Iterator<Item = (&Edge, &PairingTag)> {
        self.edges
            .iter()
            .filter_map(|edge| edge.pairing.as_ref().map(|tag| (edge, tag)))
    }

    /// Add `tail → head` and its residual twin. Returns the forward handle.
    pub fn add_edge(
        &mut self,
        tail: NodeId,
        head: NodeId,
        capacity: u32,
        cost: i64,
        pairing: Option<PairingTag>,
    ) -> EdgeId {
        let forward = EdgeId(self.edges.len());
        let backward = EdgeId(self.edges.len() + 1);

        self.edges.push(Edge {
            tail,
            head,
            capacity,
            residual: capacity,
            cost,
            twin: backward,
            pairing,
        });
        self.edges.push(Edge {
            tail: head,
            head: tail,
            capacity: 0,
            residual: 0,
            cost: -cost,
            twin: forward,
            pairing: None,
        });

        self.adjacency[tail].push(forward);
        self.adjacency[head].push(backward);
        forward
    }

    /// Move `amount` units across `id`, crediting its twin.
    pub(crate) fn push_flow(&mut self, id: EdgeId, amount: u32) {
        let twin = self.edges[id.0].twin;
        self.edges[id.0].residual -= amount;
        self.edges[twin.0].residual += amount;
    }
}

/// Build the assignment network for one match call.
///
/// Vehicle→request edges exist only for feasible pairs; their cost is the added
/// time scaled by 100 and rounded. Vehicles or requests without any feasible
/// counterpart simply get no pairing edges.
pub fn build_network(
    vehicles: &[Vehicle],
    requests: &[Request],
    cost_mode: CostMode,
) -> FlowNetwork {
    let mut network = FlowNetwork::new(vehicles.len(), requests.len());

    for (i, vehicle) in vehicles.iter().enumerate() {
        let node = network.vehicle_node(i);
        network.add_edge(SOURCE, node, vehicle.capacity, 0, None);
    }

    for j in 0..requests.len() {
        let node = network.request_node(j);
        network.add_edge(node, SINK, 1, 0, None);
    }

    let mut feasible_pairs = 0usize;
    for (i, vehicle) in vehicles.iter().enumerate() {
        let vehicle_node = network.vehicle_node(i);
        for (j, request) in requests.iter().enumerate() {
            if !is_feasible(vehicle, request, cost_mode) {
                continue;
            }
            let cost = scaled_cost(estimate_added_time(vehicle, request, cost_mode));
            let request_node = network.request_node(j);
            network.add_edge(
                vehicle_node,
                request_node,
                1,
                cost,
                Some(PairingTag {
                    vehicle_id: vehicle.id.clone(),
                    request_id: request.id.clone(),
                }),
            );
            feasible_pairs += 1;
        }
    }

    debug!(
        vehicles = vehicles.len(),
        requests = requests.len(),
        feasible_pairs,
        edges = network.edges.len(),
        %cost_mode,
        "built assignment network"
    );

    network
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{reference_requests, reference_vehicles};

    fn reference_network() -> FlowNetwork {
        let vehicles = reference_vehicles();
        let requests = reference_requests();
        build_network(&vehicles, &requests, CostMode::Approx)
    }

    #[test]
    fn node_layout_follows_input_order() {
        let network = reference_network();
        assert_eq!(network.node_count(), 2 + 2 + 3);
        assert_eq!(network.vehicle_node(0), 2);
        assert_eq!(network.vehicle_node(1), 3);
        assert_eq!(network.request_node(0), 4);
        assert_eq!(network.request_node(2), 6);
    }

    #[test]
    fn every_edge_has_a_negated_twin() {
        let network = reference_network();
        // 2 source edges + 3 sink edges + 6 feasible pairings, each with a twin
        assert_eq!(network.edges().len(), 2 * (2 + 3 + 6));

        for edge in network.edges().iter().step_by(2) {
            let twin = network.edge(edge.twin);
            assert_eq!(twin.cost, -edge.cost);
            assert_eq!(twin.residual, 0);
            assert_eq!(edge.residual, edge.capacity);
            assert_eq!((twin.tail, twin.head), (edge.head, edge.tail));
            assert_eq!(network.edge(twin.twin), edge);
        }
    }

    #[test]
    fn source_and_sink_edges_carry_capacities() {
        let vehicles = reference_vehicles();
        let network = build_network(&vehicles, &reference_requests(), CostMode::Approx);

        for (i, vehicle) in vehicles.iter().enumerate() {
            let incoming: Vec<_> = network
                .outgoing(SOURCE)
                .iter()
                .map(|id| network.edge(*id))
                .filter(|edge| edge.head == network.vehicle_node(i))
                .collect();
            assert_eq!(incoming.len(), 1);
            assert_eq!(incoming[0].capacity, vehicle.capacity);
            assert_eq!(incoming[0].cost, 0);
        }

        for j in 0..3 {
            let to_sink: Vec<_> = network
                .outgoing(network.request_node(j))
                .iter()
                .map(|id| network.edge(*id))
                .filter(|edge| edge.head == SINK && edge.capacity > 0)
                .collect();
            assert_eq!(to_sink.len(), 1);
            assert_eq!(to_sink[0].capacity, 1);
        }
    }

    #[test]
    fn pairing_costs_are_scaled_added_times() {
        let network = reference_network();
        let cost_of = |vehicle: &str, request: &str| {
            network
                .pairing_edges()
                .filter(|(_, tag)| tag.vehicle_id == vehicle)
                .find(|(_, tag)| tag.request_id == request)
                .map(|(edge, _)| edge.cost)
        };
        assert_eq!(cost_of("d1", "r1"), Some(600));
        assert_eq!(cost_of("d1", "r2"), Some(1000));
        assert_eq!(cost_of("d2", "r2"), Some(400));
        assert_eq!(cost_of("d2", "r3"), Some(600));
    }

    #[test]
    fn infeasible_pairs_get_no_edge() {
        let vehicles = reference_vehicles();
        let requests = vec![reference_requests()[0].clone().with_latest(6.5)];
        let network = build_network(&vehicles, &requests, CostMode::Approx);
        // d1 arrives at 6, d2 at 7
        let pairs: Vec<_> = network
            .pairing_edges()
            .map(|(_, tag)| tag.vehicle_id.as_str())
            .collect();
        assert_eq!(pairs, vec!["d1"]);
    }

    #[test]
    fn empty_inputs_yield_a_well_formed_network() {
        let network = build_network(&[], &reference_requests(), CostMode::Approx);
        assert_eq!(network.node_count(), 2 + 3);
        assert_eq!(network.pairing_edges().count(), 0);
        assert!(network.outgoing(SOURCE).is_empty());

        let network = build_network(&reference_vehicles(), &[], CostMode::Real);
        assert_eq!(network.outgoing(SOURCE).len(), 2);
        assert_eq!(network.pairing_edges().count(), 0);
    }
}
