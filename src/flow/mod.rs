/*!
# Minimum-Cost Flow Solver

This module solves the balanced transportation problem on a directed instance via
**Successive Shortest Paths** (SSP):

1. The instance is converted into a residual network with a synthetic super-source feeding all
   producers and a super-sink draining all consumers (`residual.rs`).
2. A potential-adjusted Dijkstra repeatedly finds the cheapest augmenting path from source to
   sink and pushes the full bottleneck amount along it (`ssp.rs`). Johnson potentials keep
   reduced costs non-negative even though reverse arcs carry negated costs.
3. The final residual capacities are mapped back onto the original edges, filling in their
   `transported` fields.

The whole solve is a single blocking call over an in-memory instance; residual network and
potentials are created per call and discarded afterwards.

```
use minflow::prelude::*;

let nodes = vec![Node::new(0, 5), Node::new(1, -5)];
let mut edges = vec![Edge::new(0, 1)];

let summary = successive_shortest_path(&nodes, &mut edges).unwrap();
assert_eq!(summary, FlowSummary { flow: 5, cost: 5 });
assert_eq!(edges[0].transported, 5);
```
*/

use fxhash::FxHashMap;

use crate::error::{Result, TransportError};
use crate::prelude::*;

mod residual;
mod ssp;

use residual::ResidualNetwork;

/// Default capacity of an edge without a capacity override.
///
/// Practically unlimited: any feasible flow of a real instance must stay well below this value,
/// otherwise cost accumulation may overflow. The same goes for caller-supplied costs and
/// capacities.
pub const UNLIMITED_CAPACITY: i64 = 1_000_000_000_000;

/// Summary of a solve: total units routed and the total transportation cost
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    /// Units routed from producers to consumers; less than the total positive supply iff the
    /// instance is unbalanced or not fully routable
    pub flow: i64,
    /// Total cost, i.e. the sum of `transported * cost` over all edges
    pub cost: i64,
}

/// Configurable minimum-cost flow solver.
///
/// Costs and capacities are optional overrides keyed by `(source, target)`; edges without an
/// entry default to cost `1` and capacity [`UNLIMITED_CAPACITY`]. Costs must be non-negative
/// for the shortest-path search to be valid.
///
/// ```
/// use minflow::prelude::*;
///
/// let nodes = vec![Node::new(0, 3), Node::new(1, 2), Node::new(2, -5)];
/// let mut edges = vec![Edge::new(0, 2), Edge::new(1, 2)];
///
/// let summary = SuccessiveShortestPath::new()
///     .cost(0, 2, 2)
///     .cost(1, 2, 1)
///     .solve(&nodes, &mut edges)
///     .unwrap();
///
/// assert_eq!(summary, FlowSummary { flow: 5, cost: 8 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuccessiveShortestPath {
    costs: FxHashMap<(NodeId, NodeId), i64>,
    capacities: FxHashMap<(NodeId, NodeId), i64>,
}

impl SuccessiveShortestPath {
    /// Creates a solver with default costs and capacities for all edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the cost of the edge `(u, v)`
    pub fn cost(mut self, u: NodeId, v: NodeId, cost: i64) -> Self {
        self.costs.insert((u, v), cost);
        self
    }

    /// Overrides the costs of all edges in the given mapping
    pub fn costs<I>(mut self, costs: I) -> Self
    where
        I: IntoIterator<Item = ((NodeId, NodeId), i64)>,
    {
        self.costs.extend(costs);
        self
    }

    /// Overrides the capacity of the edge `(u, v)`
    pub fn capacity(mut self, u: NodeId, v: NodeId, capacity: i64) -> Self {
        self.capacities.insert((u, v), capacity);
        self
    }

    /// Overrides the capacities of all edges in the given mapping
    pub fn capacities<I>(mut self, capacities: I) -> Self
    where
        I: IntoIterator<Item = ((NodeId, NodeId), i64)>,
    {
        self.capacities.extend(capacities);
        self
    }

    /// Computes a minimum-cost flow satisfying as much of the supplies as possible.
    ///
    /// Writes the routed amount of every edge into its `transported` field (all edges end up
    /// assigned, including zero-flow ones) and returns the flow/cost summary. An instance
    /// whose supplies cannot be fully routed yields a partial result with
    /// `flow < total_supply`; only malformed input is an error, in which case no edge is
    /// mutated.
    pub fn solve(&self, nodes: &[Node], edges: &mut [Edge]) -> Result<FlowSummary> {
        // Ids are assumed dense, but size the arrays by the largest id to be robust
        let num_nodes = match nodes.iter().map(|node| node.id).max() {
            Some(max_id) => max_id + 1,
            None => return Err(TransportError::NoNodes),
        };
        TransportError::check_edge_count(num_nodes, edges.len() as u64)?;

        let mut network =
            ResidualNetwork::build(num_nodes, nodes, edges, &self.costs, &self.capacities)?;

        let (flow, cost) = ssp::min_cost_flow(&mut network);

        for (edge, slot) in edges.iter_mut().zip(network.slots()) {
            edge.transported = slot.initial_capacity - network.residual_capacity(slot);
        }

        log::debug!(
            "routed {flow}/{} units at total cost {cost}",
            network.target_flow()
        );

        Ok(FlowSummary { flow, cost })
    }
}

/// Solves the instance with default costs (`1`) and capacities ([`UNLIMITED_CAPACITY`]).
///
/// Shorthand for `SuccessiveShortestPath::new().solve(nodes, edges)`.
pub fn successive_shortest_path(nodes: &[Node], edges: &mut [Edge]) -> Result<FlowSummary> {
    SuccessiveShortestPath::new().solve(nodes, edges)
}
