use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;
use crate::error::{Result, TransportError};

/// Generator for uniform random transportation instances on a simple directed graph.
///
/// The generator can be parameterized via:
/// - `.nodes(n)` — total number of nodes (required, `n >= 1`)
/// - `.edges(m)` — total number of directed edges (at most `n * (n - 1)`)
/// - `.supply_range(r)` — supplies are drawn uniformly from `[-r, r]` (default `10`)
/// - `.balanced(b)` — whether the last node's supply offsets the others so that all supplies
///   sum to zero (default `false`)
///
/// Edges are sampled uniformly **without replacement** from all `n * (n - 1)` loop-free
/// directed pairs, so the result never contains self-loops or duplicate `(source, target)`
/// pairs.
///
/// When `balanced` is set, node `n - 1` receives the negated sum of all other supplies; note
/// that this value may lie outside `[-r, r]`. Otherwise the last node draws its supply like
/// every other node and the resulting imbalance is reported via `log::info!` — an unbalanced
/// instance is perfectly valid input for the solver, which then routes as much as it can.
#[derive(Debug, Copy, Clone)]
pub struct RandomInstance {
    n: NumNodes,
    m: NumEdges,
    supply_range: Supply,
    balanced: bool,
}

impl Default for RandomInstance {
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            supply_range: 10,
            balanced: false,
        }
    }
}

impl RandomInstance {
    /// Creates a new empty instance generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the supply range: supplies are drawn uniformly from `[-range, range]`
    pub fn supply_range(mut self, range: Supply) -> Self {
        assert!(range >= 0);
        self.supply_range = range;
        self
    }

    /// Updates whether the last node balances all other supplies to a total of zero
    pub fn balanced(mut self, balanced: bool) -> Self {
        self.balanced = balanced;
        self
    }

    /// Generates a random instance.
    ///
    /// Returns [`TransportError::NoNodes`] if no nodes were requested and
    /// [`TransportError::TooManyEdges`] if more edges were requested than a simple digraph on
    /// `n` nodes admits.
    pub fn generate<R>(&self, rng: &mut R) -> Result<(Vec<Node>, Vec<Edge>)>
    where
        R: Rng,
    {
        if self.n == 0 {
            return Err(TransportError::NoNodes);
        }
        TransportError::check_edge_count(self.n, self.m as u64)?;

        let mut nodes = (0..self.n - 1)
            .map(|id| {
                Node::new(
                    id,
                    rng.random_range(-self.supply_range..=self.supply_range),
                )
            })
            .collect_vec();

        let partial_sum: Supply = nodes.iter().map(|node| node.supply).sum();
        if self.balanced {
            nodes.push(Node::new(self.n - 1, -partial_sum));
        } else {
            let last = rng.random_range(-self.supply_range..=self.supply_range);
            nodes.push(Node::new(self.n - 1, last));
            log::info!(
                "generated unbalanced instance: supplies sum to {}",
                partial_sum + last
            );
        }

        let edges = DistinctEdgeSampler::new(rng, self.n as u64, self.m as u64).collect_vec();

        Ok((nodes, edges))
    }
}

impl NumNodesGen for RandomInstance {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl NumEdgesGen for RandomInstance {
    /// Updates `m`
    fn edges(mut self, m: NumEdges) -> Self {
        self.m = m;
        self
    }
}

/// Given `n` nodes and the edge space of all `n * (n - 1)` loop-free directed pairs, this
/// iterator produces exactly `m` uniformly random and distinct edges without replacement.
///
/// The algorithm used is based on:
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
///
/// The implementation avoids full shuffling by using a partial mapping technique
/// (sometimes called "hash-based sampling") to simulate an in-place permutation.
pub struct DistinctEdgeSampler<'a, R>
where
    R: Rng,
{
    n: u64,
    rem: u64,
    cur: u64,
    end: u64,
    map: FxHashMap<u64, u64>,
    rng: &'a mut R,
}

impl<'a, R> DistinctEdgeSampler<'a, R>
where
    R: Rng,
{
    /// Creates a new sampler yielding exactly `m` distinct edge indices in `[0, n * (n - 1))`.
    ///
    /// # Panics
    /// Panics if `m > n * (n - 1)`, which would violate sampling without replacement.
    pub fn new(rng: &'a mut R, n: u64, m: u64) -> Self {
        let end = n * (n - 1);
        assert!(m <= end);

        Self {
            n,
            rem: m,
            cur: 0,
            end,
            map: FxHashMap::with_capacity_and_hasher(m as usize, Default::default()),
            rng,
        }
    }

    /// Selects the next unique edge index using the Batagelj–Brandes partial mapping method.
    ///
    /// This method emulates a Fisher-Yates shuffle on-the-fly using a sparse map structure
    /// to track remappings. Ensures `m` unique samples from `[0, end)`.
    fn next_step(&mut self) -> Option<u64> {
        // Stop if `m` values were generated
        if self.rem == 0 {
            return None;
        }

        // Draw value and check if it was remapped earlier
        let next_rng = self.rng.random_range(self.cur..self.end);
        let next_u64 = match self.map.get(&next_rng) {
            Some(v) => *v,
            None => next_rng,
        };

        // Store possible replacements for later
        if let Some(v) = self.map.get(&self.cur) {
            self.map.insert(next_rng, *v);
        } else {
            self.map.insert(next_rng, self.cur);
        }

        self.cur += 1;
        self.rem -= 1;

        Some(next_u64)
    }
}

impl<'a, R> Iterator for DistinctEdgeSampler<'a, R>
where
    R: Rng,
{
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step().map(|x| Edge::from_u64(x, self.n))
    }

    /// Returns the number of edges remaining to be generated.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<'a, R> ExactSizeIterator for DistinctEdgeSampler<'a, R> where R: Rng {}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn rejects_empty_instance() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        assert_eq!(
            RandomInstance::new().generate(rng),
            Err(TransportError::NoNodes)
        );
    }

    #[test]
    fn rejects_too_many_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let res = RandomInstance::new().nodes(4).edges(13).generate(rng);
        assert_eq!(
            res,
            Err(TransportError::TooManyEdges {
                requested: 13,
                nodes: 4,
                max: 12
            })
        );
    }

    #[test]
    fn singleton_instance() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let (nodes, edges) = RandomInstance::new().nodes(1).generate(rng).unwrap();

        assert_eq!(nodes.len(), 1);
        assert!(edges.is_empty());
    }

    #[test]
    fn dense_ids_and_simple_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [2 as NumNodes, 5, 10, 30] {
            for m in [0, n - 1, n * (n - 1) / 2, n * (n - 1)] {
                let (nodes, edges) = RandomInstance::new()
                    .nodes(n)
                    .edges(m)
                    .generate(rng)
                    .unwrap();

                assert_eq!(
                    nodes.iter().map(|node| node.id).collect_vec(),
                    (0..n).collect_vec()
                );

                assert_eq!(edges.len(), m as usize);
                assert!(edges.iter().all(|e| !e.is_loop() && !e.is_assigned()));
                assert!(edges.iter().all(|e| e.source < n && e.target < n));

                let distinct = edges.iter().map(Edge::endpoints).unique().count();
                assert_eq!(distinct, edges.len());
            }
        }
    }

    #[test]
    fn balanced_supplies_sum_to_zero() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);

        for n in [1 as NumNodes, 2, 7, 50] {
            let (nodes, _) = RandomInstance::new()
                .nodes(n)
                .edges(n - 1)
                .supply_range(5)
                .balanced(true)
                .generate(rng)
                .unwrap();

            assert_eq!(nodes.iter().map(|node| node.supply).sum::<Supply>(), 0);
        }
    }

    #[test]
    fn unbalanced_keeps_all_nodes_in_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        let (nodes, _) = RandomInstance::new()
            .nodes(20)
            .edges(40)
            .supply_range(3)
            .generate(rng)
            .unwrap();

        assert_eq!(nodes.len(), 20);
        assert!(nodes.iter().all(|node| node.supply.abs() <= 3));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let generator = RandomInstance::new()
            .nodes(15)
            .edges(60)
            .supply_range(8)
            .balanced(true);

        let first = generator.generate(&mut Pcg64Mcg::seed_from_u64(42)).unwrap();
        let second = generator.generate(&mut Pcg64Mcg::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
    }
}
