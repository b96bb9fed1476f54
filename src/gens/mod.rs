/*!
# Instance Generators

This module provides builder-style generators for random transportation instances.

Each generator allows parameterized control over structural properties of the instance (number
of nodes and edges, supply range, balancedness) and produces complete `(Vec<Node>, Vec<Edge>)`
pairs ready to be fed into the solver.

The typical usage workflow is:

1. Create a generator instance (e.g., `RandomInstance::new()`).
2. Set parameters using trait/builder methods (e.g., `.nodes(n).edges(m)`).
3. Generate the instance via `generate(&mut rng)`.

Generators draw all randomness from a caller-provided [`rand::Rng`], so a seeded generator
(e.g. `rand_pcg::Pcg64Mcg`) yields fully deterministic instances.
*/

use rand::Rng;

use crate::prelude::*;

mod digraph;

pub use digraph::*;

/// Trait for generators that allow setting the number of nodes.
///
/// This is the most common builder trait across all generators.
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen {
    /// Sets the number of nodes in the instance generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the number of edges.
///
/// Used by models where the edge count is fixed up-front.
pub trait NumEdgesGen {
    /// Sets the number of edges in the instance generator.
    fn edges(self, m: NumEdges) -> Self;
}
