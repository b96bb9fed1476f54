/*!
# Node Representation

We choose `NodeId = u32` as almost all use-cases involve less than `2^32` nodes.
This saves space compared to `usize`/`u64` and allows indexing arrays directly with node values.

On top of the raw id, a [`Node`] carries its `supply`: the signed amount of resources the node
must emit (positive) or absorb (negative). Nodes with zero supply are pure pass-through stations.
*/

use std::fmt::{Debug, Display};

/// Node ids can be any unsigned integer from `0` to `NodeId::MAX - 1`
pub type NodeId = u32;

/// There can be at most `2^32 - 1` nodes in an instance!
pub type NumNodes = NodeId;

/// Signed amount of resources a node produces (positive) or consumes (negative)
pub type Supply = i64;

/// A node of a transportation instance.
///
/// Ids are assumed to be dense, i.e. an instance with `n` nodes uses ids `0..n`.
/// The solver never mutates nodes; they act as read-only input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Node {
    /// Dense id in `0..n`
    pub id: NodeId,
    /// Positive values = production, negative values = consumption
    pub supply: Supply,
}

impl Node {
    /// Creates a new node with the given id and supply
    pub fn new(id: NodeId, supply: Supply) -> Self {
        Self { id, supply }
    }

    /// Returns *true* if the node produces resources (`supply > 0`)
    pub fn is_producer(&self) -> bool {
        self.supply > 0
    }

    /// Returns *true* if the node consumes resources (`supply < 0`)
    pub fn is_consumer(&self) -> bool {
        self.supply < 0
    }

    /// Returns *true* if the node is a neutral pass-through station (`supply == 0`)
    pub fn is_intermediate(&self) -> bool {
        self.supply == 0
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.id, self.supply)
    }
}

impl From<(NodeId, Supply)> for Node {
    fn from(value: (NodeId, Supply)) -> Self {
        Node::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Node::new(0, 5).is_producer());
        assert!(!Node::new(0, 5).is_consumer());

        assert!(Node::new(1, -3).is_consumer());
        assert!(!Node::new(1, -3).is_producer());

        assert!(Node::new(2, 0).is_intermediate());
        assert!(!Node::new(2, 0).is_producer());
        assert!(!Node::new(2, 0).is_consumer());
    }
}
