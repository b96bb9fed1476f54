use std::fmt::{Debug, Display};

use crate::{Node, NodeId};

/// We limit the number of edges to `2^32 - 1`.
/// CHANGE it to `u64` if this does not suffice (which it usually should).
pub type NumEdges = u32;

/// Sentinel value for [`Edge::transported`] marking the edge as not yet assigned
pub const UNASSIGNED: i64 = -1;

/// A directed edge of a transportation instance.
///
/// Next to its endpoints, an edge stores `transported`: the number of units routed along it by
/// the solver. Freshly created edges carry the [`UNASSIGNED`] sentinel; after a successful solve
/// every edge holds a value in `0..=capacity`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Id of the emitting endpoint
    pub source: NodeId,
    /// Id of the receiving endpoint
    pub target: NodeId,
    /// Units routed along this edge, [`UNASSIGNED`] before a solve
    pub transported: i64,
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.source, self.target)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Creates a new unassigned edge from `source` to `target`
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            transported: UNASSIGNED,
        }
    }

    /// Returns *true* if `transported` holds a non-negative, i.e. assigned, value
    pub fn is_assigned(&self) -> bool {
        self.transported >= 0
    }

    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns the endpoints as a tuple, e.g. for keying cost/capacity maps
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    /// Simple bijection from `0..n * (n - 1)` to all possible directed loop-free edges of `n`
    /// nodes.
    ///
    /// Each node `u` is assigned the `n - 1` consecutive indices `u * (n - 1)..(u + 1) * (n - 1)`
    /// which enumerate its possible targets in increasing order, skipping `u` itself.
    pub fn from_u64(x: u64, n: u64) -> Self {
        debug_assert!(n > 1);
        debug_assert!(x < n * (n - 1));

        let u = x / (n - 1);
        let r = x % (n - 1);
        let v = r + (r >= u) as u64;

        Edge::new(u as NodeId, v as NodeId)
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from(value: (NodeId, NodeId)) -> Self {
        Edge::new(value.0, value.1)
    }
}

impl From<&(NodeId, NodeId)> for Edge {
    fn from(value: &(NodeId, NodeId)) -> Self {
        Edge::new(value.0, value.1)
    }
}

impl From<(&Node, &Node)> for Edge {
    fn from(value: (&Node, &Node)) -> Self {
        Edge::new(value.0.id, value.1.id)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn assignment_sentinel() {
        let mut edge = Edge::new(0, 1);
        assert!(!edge.is_assigned());
        assert_eq!(edge.transported, UNASSIGNED);

        edge.transported = 0;
        assert!(edge.is_assigned());
    }

    #[test]
    fn from_u64_is_bijective() {
        for n in 2..20u64 {
            let edges = (0..n * (n - 1)).map(|x| Edge::from_u64(x, n)).collect_vec();

            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges
                .iter()
                .all(|e| (e.source as u64) < n && (e.target as u64) < n));

            let distinct = edges.iter().map(Edge::endpoints).unique().count();
            assert_eq!(distinct as u64, n * (n - 1));
        }
    }
}
