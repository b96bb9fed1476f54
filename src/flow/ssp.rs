use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::NodeId;

use super::residual::ResidualNetwork;

/// Distance value for nodes not (yet) reached by Dijkstra
const UNREACHABLE: i64 = i64::MAX;

/// Per-call scratch state of the augmentation loop.
///
/// Holds the Johnson potentials along with the distance and predecessor arrays reused across
/// iterations. All arrays are sized to the residual network (instance nodes plus the two
/// synthetic endpoints) and are discarded with the solve call.
struct Augmentor {
    dist: Vec<i64>,
    potential: Vec<i64>,
    pred_node: Vec<NodeId>,
    pred_slot: Vec<u32>,
}

impl Augmentor {
    fn new(n: usize) -> Self {
        Self {
            dist: vec![UNREACHABLE; n],
            potential: vec![0; n],
            pred_node: vec![0; n],
            pred_slot: vec![0; n],
        }
    }

    /// Dijkstra from the super-source over all arcs with positive residual capacity, using
    /// reduced costs `cost(u, v) + potential(u) - potential(v)`.
    ///
    /// Reduced costs are non-negative: initially all usable arcs have non-negative cost and
    /// reverse arcs are unreachable (zero capacity); afterwards the potential update below
    /// re-establishes the invariant. Returns *true* if the sink was reached.
    fn dijkstra(&mut self, network: &ResidualNetwork) -> bool {
        self.dist.fill(UNREACHABLE);

        let s = network.source();
        self.dist[s as usize] = 0;

        let mut queue = BinaryHeap::new();
        queue.push(Reverse((0, s)));

        while let Some(Reverse((d, u))) = queue.pop() {
            // Stale entry, node was settled with a smaller distance already
            if d > self.dist[u as usize] {
                continue;
            }

            for (slot, arc) in network.arcs_of(u).iter().enumerate() {
                if arc.cap <= 0 {
                    continue;
                }

                let next =
                    d + arc.cost + self.potential[u as usize] - self.potential[arc.to as usize];
                if next < self.dist[arc.to as usize] {
                    self.dist[arc.to as usize] = next;
                    self.pred_node[arc.to as usize] = u;
                    self.pred_slot[arc.to as usize] = slot as u32;
                    queue.push(Reverse((next, arc.to)));
                }
            }
        }

        self.dist[network.sink() as usize] != UNREACHABLE
    }

    /// Folds the distances of all reachable nodes into the potentials.
    ///
    /// By the telescoping property the potential of the sink afterwards equals the true
    /// (non-reduced) cost of the shortest augmenting path just found.
    fn update_potentials(&mut self) {
        for (pot, &d) in self.potential.iter_mut().zip(&self.dist) {
            if d != UNREACHABLE {
                *pot += d;
            }
        }
    }

    /// Minimum residual capacity along the retrieved source-sink path, capped by `limit`
    fn bottleneck(&self, network: &ResidualNetwork, limit: i64) -> i64 {
        let mut amount = limit;

        let mut v = network.sink();
        while v != network.source() {
            let u = self.pred_node[v as usize];
            amount = amount.min(network.arc(u, self.pred_slot[v as usize]).cap);
            v = u;
        }

        amount
    }

    /// Pushes `amount` units along the retrieved path, flipping capacity onto the reverse arcs
    fn augment(&self, network: &mut ResidualNetwork, amount: i64) {
        let mut v = network.sink();
        while v != network.source() {
            let u = self.pred_node[v as usize];
            network.push_along(u, self.pred_slot[v as usize], amount);
            v = u;
        }
    }
}

/// Routes up to `target_flow` units from super-source to super-sink at minimum total cost via
/// successive shortest augmenting paths.
///
/// Each iteration pushes the full bottleneck amount of the current cheapest path in one step.
/// If the sink becomes unreachable before the target is met, the achieved flow is reported as
/// is; an infeasible or unbalanced instance yields a partial result, not an error.
pub(crate) fn min_cost_flow(network: &mut ResidualNetwork) -> (i64, i64) {
    let target_flow = network.target_flow();
    let mut augmentor = Augmentor::new(network.len());

    let mut flow = 0;
    let mut cost = 0;
    while flow < target_flow {
        if !augmentor.dijkstra(network) {
            break;
        }
        augmentor.update_potentials();

        let amount = augmentor.bottleneck(network, target_flow - flow);
        augmentor.augment(network, amount);

        flow += amount;
        cost += amount * augmentor.potential[network.sink() as usize];

        log::debug!(
            "augmented {amount} units at path cost {} ({flow}/{target_flow} routed)",
            augmentor.potential[network.sink() as usize]
        );
    }

    (flow, cost)
}
