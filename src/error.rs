/*!
# Error Taxonomy

Only *malformed* input is reported as an error: an instance without nodes, more edges than a
simple digraph admits, or a negative capacity override. All of these are detected up-front,
before any edge is mutated or any flow is pushed.

An instance whose supplies cannot be fully routed is **not** an error; the solver degrades to a
partial result whose shortfall is visible as `flow < total_supply` in the returned summary.
*/

use crate::{NodeId, NumEdges, NumNodes};

/// Errors raised for malformed transportation instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// An instance must contain at least one node
    NoNodes,

    /// A simple digraph on `n` nodes has at most `n * (n - 1)` edges
    TooManyEdges {
        /// Number of requested edges
        requested: u64,
        /// Number of nodes of the instance
        nodes: NumNodes,
        /// Maximum number of loop-free directed edges, i.e. `nodes * (nodes - 1)`
        max: u64,
    },

    /// Capacity overrides must be non-negative
    NegativeCapacity {
        /// Source endpoint of the offending edge
        source: NodeId,
        /// Target endpoint of the offending edge
        target: NodeId,
        /// The rejected capacity value
        capacity: i64,
    },
}

// Hand-written instead of `#[derive(thiserror::Error)]`: thiserror treats any field named
// `source` as the error's source and requires it to implement `Error`, which `NodeId` does not.
impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::NoNodes => write!(f, "instance must contain at least one node"),
            TransportError::TooManyEdges {
                requested,
                nodes,
                max,
            } => write!(
                f,
                "requested {requested} edges but a simple digraph on {nodes} nodes has at most {max}"
            ),
            TransportError::NegativeCapacity {
                source,
                target,
                capacity,
            } => write!(f, "negative capacity {capacity} on edge ({source},{target})"),
        }
    }
}

impl std::error::Error for TransportError {}

impl TransportError {
    /// Checks `m <= n * (n - 1)` and builds the matching error otherwise
    pub(crate) fn check_edge_count(n: NumNodes, m: u64) -> Result<NumEdges> {
        let max = n as u64 * (n as u64 - 1);
        if m > max {
            return Err(TransportError::TooManyEdges {
                requested: m,
                nodes: n,
                max,
            });
        }

        Ok(m as NumEdges)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TransportError>;
