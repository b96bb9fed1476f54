/*!
`minflow` solves the **balanced transportation problem** (minimum-cost flow) on directed graphs
with per-node supply and demand:

- Every node carries a signed `supply`: positive nodes must emit that many units, negative
  nodes must absorb them, zero nodes pass flow through.
- Every directed edge receives a non-negative integer `transported` amount such that all node
  balances are met and the total transportation cost is minimal.

# Representation

Nodes are identified by dense `u32` ids `0..n`; see [`node`] and [`edge`] for the plain value
records making up an instance. Supplies, costs, capacities, and flows are `i64`.

# Solver

The core lives in [`flow`]: a Successive-Shortest-Paths solver running potential-adjusted
Dijkstra over a residual network with synthetic super-source and super-sink. Costs and
capacities are optional per-edge overrides; edges default to cost `1` and a practically
unlimited capacity.

```
use minflow::prelude::*;

let nodes = vec![Node::new(0, 3), Node::new(1, 2), Node::new(2, -5)];
let mut edges = vec![Edge::new(0, 2), Edge::new(1, 2)];

let summary = SuccessiveShortestPath::new()
    .cost(0, 2, 2)
    .cost(1, 2, 1)
    .solve(&nodes, &mut edges)
    .unwrap();

assert_eq!(summary, FlowSummary { flow: 5, cost: 8 });
assert_eq!((edges[0].transported, edges[1].transported), (3, 2));
```

An instance whose supplies cannot be fully routed is not an error: the solver reports the best
achievable flow and its cost, with the shortfall visible as `flow < total_supply`. Only
malformed input (no nodes, too many edges, negative capacities) is rejected, see [`error`].

# Generators

[`gens`] provides builder-style random instance generators drawing from a caller-provided
[`rand::Rng`], e.g. `RandomInstance::new().nodes(n).edges(m).balanced(true)`. A seeded RNG
makes generation fully deterministic.

# Usage

In most use-cases, `use minflow::prelude::*;` suffices for your needs.
*/

pub mod edge;
pub mod error;
pub mod flow;
pub mod gens;
pub mod node;

/// `minflow::prelude` includes the node/edge records, the error taxonomy, and the solver.
pub mod prelude {
    pub use super::{edge::*, error::*, flow::*, node::*};
}

pub use prelude::*;
