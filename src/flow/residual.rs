use fxhash::FxHashMap;

use crate::error::{Result, TransportError};
use crate::prelude::*;

use super::UNLIMITED_CAPACITY;

/// Default cost of an edge without a cost override
pub(crate) const DEFAULT_COST: i64 = 1;

/// A directed arc of the residual network.
///
/// Every arc has a paired reverse arc stored in the adjacency list of its target; `rev` is the
/// slot index of that partner. Reverse arcs carry the negated forward cost and start with zero
/// capacity, so they only become usable once flow has been pushed along the forward arc.
#[derive(Debug, Clone)]
pub(crate) struct ResidualEdge {
    /// Target node of the arc
    pub to: NodeId,
    /// Slot index of the paired reverse arc in the adjacency list of `to`
    pub rev: u32,
    /// Remaining capacity, always non-negative
    pub cap: i64,
    /// Cost per unit of flow
    pub cost: i64,
}

/// Reference to the forward arc of an original edge, recorded during construction.
///
/// Slot indices stay stable since arcs are only ever appended to adjacency lists. Together with
/// the initial capacity this is all the result mapper needs to reconstruct the transported
/// amount as `initial_capacity - cap`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSlot {
    /// Node owning the forward arc
    pub node: NodeId,
    /// Slot index of the forward arc in the owning node's adjacency list
    pub slot: u32,
    /// Capacity the forward arc started with
    pub initial_capacity: i64,
}

/// Residual network over the instance nodes plus a synthetic super-source and super-sink.
///
/// Node ids `0..n` mirror the instance; the super-source is `n`, the super-sink `n + 1`.
/// Every producer is wired `source -> node` with its supply as capacity, every consumer
/// `node -> sink` with its demand. Routing `total_supply` units from source to sink then
/// solves the original multi-source, multi-sink problem.
pub(crate) struct ResidualNetwork {
    adj: Vec<Vec<ResidualEdge>>,
    source: NodeId,
    sink: NodeId,
    slots: Vec<EdgeSlot>,
    target_flow: i64,
}

impl ResidualNetwork {
    /// Builds the residual network for an instance.
    ///
    /// `costs` and `capacities` override the per-edge defaults ([`DEFAULT_COST`] and
    /// [`UNLIMITED_CAPACITY`]) keyed by `(source, target)`. All resolved capacities are
    /// validated **before** the first arc is created, so a malformed instance leaves no
    /// half-built state behind.
    pub(crate) fn build(
        num_nodes: NumNodes,
        nodes: &[Node],
        edges: &[Edge],
        costs: &FxHashMap<(NodeId, NodeId), i64>,
        capacities: &FxHashMap<(NodeId, NodeId), i64>,
    ) -> Result<Self> {
        let resolved: Vec<(i64, i64)> = edges
            .iter()
            .map(|e| {
                let cap = *capacities.get(&e.endpoints()).unwrap_or(&UNLIMITED_CAPACITY);
                if cap < 0 {
                    return Err(TransportError::NegativeCapacity {
                        source: e.source,
                        target: e.target,
                        capacity: cap,
                    });
                }

                let cost = *costs.get(&e.endpoints()).unwrap_or(&DEFAULT_COST);
                Ok((cap, cost))
            })
            .collect::<Result<_>>()?;

        let source = num_nodes;
        let sink = num_nodes + 1;
        let mut network = Self {
            adj: vec![Vec::new(); num_nodes as usize + 2],
            source,
            sink,
            slots: Vec::with_capacity(edges.len()),
            target_flow: 0,
        };

        for (e, (cap, cost)) in edges.iter().zip(resolved) {
            let slot = network.adj[e.source as usize].len() as u32;
            network.add_arc(e.source, e.target, cap, cost);
            network.slots.push(EdgeSlot {
                node: e.source,
                slot,
                initial_capacity: cap,
            });
        }

        // Wire producers and consumers to the synthetic endpoints
        for node in nodes {
            if node.is_producer() {
                network.add_arc(source, node.id, node.supply, 0);
                network.target_flow += node.supply;
            } else if node.is_consumer() {
                network.add_arc(node.id, sink, -node.supply, 0);
            }
        }

        Ok(network)
    }

    /// Appends a forward/reverse arc pair for `(u, v)` with the given capacity and cost
    fn add_arc(&mut self, u: NodeId, v: NodeId, cap: i64, cost: i64) {
        let rev_slot = self.adj[v as usize].len() as u32;
        let fwd_slot = self.adj[u as usize].len() as u32;

        self.adj[u as usize].push(ResidualEdge {
            to: v,
            rev: rev_slot,
            cap,
            cost,
        });
        self.adj[v as usize].push(ResidualEdge {
            to: u,
            rev: fwd_slot,
            cap: 0,
            cost: -cost,
        });
    }

    /// Returns the number of nodes including super-source and super-sink
    pub(crate) fn len(&self) -> usize {
        self.adj.len()
    }

    /// The synthetic super-source, id `n`
    pub(crate) fn source(&self) -> NodeId {
        self.source
    }

    /// The synthetic super-sink, id `n + 1`
    pub(crate) fn sink(&self) -> NodeId {
        self.sink
    }

    /// Sum of all positive supplies, i.e. the flow the augmentor tries to route
    pub(crate) fn target_flow(&self) -> i64 {
        self.target_flow
    }

    /// Arcs leaving node `u`
    pub(crate) fn arcs_of(&self, u: NodeId) -> &[ResidualEdge] {
        &self.adj[u as usize]
    }

    /// The arc in slot `slot` of node `u`'s adjacency list
    pub(crate) fn arc(&self, u: NodeId, slot: u32) -> &ResidualEdge {
        &self.adj[u as usize][slot as usize]
    }

    /// Moves `amount` units of capacity from the arc `(u, slot)` to its paired reverse arc.
    ///
    /// The capacity sum of an arc pair is invariant under this operation.
    pub(crate) fn push_along(&mut self, u: NodeId, slot: u32, amount: i64) {
        let arc = &mut self.adj[u as usize][slot as usize];
        debug_assert!(amount <= arc.cap);

        arc.cap -= amount;
        let (to, rev) = (arc.to, arc.rev);
        self.adj[to as usize][rev as usize].cap += amount;
    }

    /// Remaining capacity of an original edge's forward arc
    pub(crate) fn residual_capacity(&self, slot: &EdgeSlot) -> i64 {
        self.arc(slot.node, slot.slot).cap
    }

    /// Slot references of the original edges in input order
    pub(crate) fn slots(&self) -> &[EdgeSlot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_instance() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![Node::new(0, 5), Node::new(1, 0), Node::new(2, -5)];
        let edges = vec![Edge::new(0, 1), Edge::new(1, 2)];
        (nodes, edges)
    }

    #[test]
    fn arc_pairs_are_linked() {
        let (nodes, edges) = tiny_instance();
        let network =
            ResidualNetwork::build(3, &nodes, &edges, &Default::default(), &Default::default())
                .unwrap();

        for u in 0..network.len() as NodeId {
            for arc in network.arcs_of(u) {
                let partner = network.arc(arc.to, arc.rev);
                assert_eq!(partner.to, u);
                assert_eq!(arc.cost, -partner.cost);
                // exactly one side of a fresh pair carries capacity
                assert!(arc.cap == 0 || partner.cap == 0);
            }
        }
    }

    #[test]
    fn supplies_become_synthetic_arcs() {
        let (nodes, edges) = tiny_instance();
        let network =
            ResidualNetwork::build(3, &nodes, &edges, &Default::default(), &Default::default())
                .unwrap();

        assert_eq!(network.source(), 3);
        assert_eq!(network.sink(), 4);
        assert_eq!(network.target_flow(), 5);

        let source_arcs = network.arcs_of(network.source());
        assert_eq!(source_arcs.len(), 1);
        assert_eq!(source_arcs[0].to, 0);
        assert_eq!(source_arcs[0].cap, 5);
        assert_eq!(source_arcs[0].cost, 0);

        // the consumer's demand arc lives in its own adjacency list
        let demand = network
            .arcs_of(2)
            .iter()
            .find(|arc| arc.to == network.sink())
            .unwrap();
        assert_eq!(demand.cap, 5);
    }

    #[test]
    fn slots_reference_forward_arcs() {
        let (nodes, edges) = tiny_instance();
        let mut capacities = FxHashMap::default();
        capacities.insert((0, 1), 7);

        let network =
            ResidualNetwork::build(3, &nodes, &edges, &Default::default(), &capacities).unwrap();

        let slots = network.slots().to_vec();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].initial_capacity, 7);
        assert_eq!(slots[1].initial_capacity, UNLIMITED_CAPACITY);

        for (slot, edge) in slots.iter().zip(&edges) {
            let arc = network.arc(slot.node, slot.slot);
            assert_eq!(slot.node, edge.source);
            assert_eq!(arc.to, edge.target);
            assert_eq!(arc.cap, slot.initial_capacity);
        }
    }

    #[test]
    fn rejects_negative_capacity() {
        let (nodes, edges) = tiny_instance();
        let mut capacities = FxHashMap::default();
        capacities.insert((1, 2), -3);

        let res = ResidualNetwork::build(3, &nodes, &edges, &Default::default(), &capacities);
        assert_eq!(
            res.err(),
            Some(TransportError::NegativeCapacity {
                source: 1,
                target: 2,
                capacity: -3
            })
        );
    }

    #[test]
    fn push_along_preserves_pair_capacity() {
        let (nodes, edges) = tiny_instance();
        let mut network =
            ResidualNetwork::build(3, &nodes, &edges, &Default::default(), &Default::default())
                .unwrap();

        let slot = network.slots()[0];
        let before = network.arc(slot.node, slot.slot).cap;

        network.push_along(slot.node, slot.slot, 4);

        let arc = network.arc(slot.node, slot.slot).clone();
        let partner = network.arc(arc.to, arc.rev);
        assert_eq!(arc.cap, before - 4);
        assert_eq!(partner.cap, 4);
        assert_eq!(arc.cap + partner.cap, before);
    }
}
