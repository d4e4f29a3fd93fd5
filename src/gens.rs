//! Seeded random graphs for demos, benchmarks and parity tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::graph::{Edge, Graph};

// Up to `m` distinct non-loop edges (fewer if the graph saturates or the
// attempt limit runs out), weights from `weight`.
fn distinct_edges(n: usize, m: usize, rng: &mut SmallRng, mut weight: impl FnMut(&mut SmallRng, usize, usize) -> i64) -> Vec<Edge<i64>> {
    let target = m.min(n.saturating_mul(n.saturating_sub(1)));
    let mut seen = vec![false; n * n];
    let mut edges = Vec::with_capacity(target);
    let attempt_limit = target * 10 + 1000;
    let mut attempts = 0usize;
    while edges.len() < target && attempts < attempt_limit {
        attempts += 1;
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v || seen[u * n + v] {
            continue;
        }
        seen[u * n + v] = true;
        let w = weight(rng, u, v);
        edges.push(Edge::new(u + 1, v + 1, w));
    }
    edges
}

/// Random digraph with weights drawn uniformly from `lo..=hi`. Negative
/// cycles are likely once `lo < 0`.
pub fn random_graph(n: usize, m: usize, seed: u64, lo: i64, hi: i64) -> Result<Graph<i64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges = distinct_edges(n, m, &mut rng, |rng, _, _| rng.gen_range(lo..=hi));
    Graph::new(n, edges)
}

/// Random digraph with negative edges but no negative cycle.
///
/// Each edge gets `base + p(v) - p(u)` for a non-negative `base` in
/// `0..=max_base` and a hidden vertex potential `p` in `0..=max_shift`; every
/// cycle therefore sums to the (non-negative) sum of its bases.
pub fn random_graph_without_negative_cycles(n: usize, m: usize, seed: u64, max_base: i64, max_shift: i64) -> Result<Graph<i64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let p: Vec<i64> = (0..n).map(|_| rng.gen_range(0..=max_shift)).collect();
    let edges = distinct_edges(n, m, &mut rng, |rng, u, v| rng.gen_range(0..=max_base) + p[v] - p[u]);
    Graph::new(n, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reweight::bellman_ford_potential;

    #[test]
    fn same_seed_same_graph() {
        let a = random_graph(20, 60, 7, -5, 5).unwrap();
        let b = random_graph(20, 60, 7, -5, 5).unwrap();
        assert_eq!(a.edges(), b.edges());
        assert_eq!(a.edge_count(), 60);
    }

    #[test]
    fn saturates_at_complete_graph() {
        let g = random_graph(4, 100, 1, 1, 1).unwrap();
        assert_eq!(g.edge_count(), 12);
        assert!(g.edges().iter().all(|e| e.tail != e.head));
    }

    #[test]
    fn shifted_graph_has_negative_edges_but_no_cycle() {
        let g = random_graph_without_negative_cycles(30, 150, 11, 10, 50).unwrap();
        assert!(g.edges().iter().any(|e| e.weight < 0));
        assert!(bellman_ford_potential(&g).is_ok());
    }
}
