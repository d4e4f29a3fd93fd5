//! Johnson's algorithm: reweight once, then one label-setting search per
//! source over the non-negative reweighted edges.
//!
//! Unlike [`crate::dense`], a negative cycle anywhere in the graph fails the
//! whole run with [`ApspError::NegativeCycleDetected`]; no pair is computed.
//!
//! [`ApspError::NegativeCycleDetected`]: crate::ApspError::NegativeCycleDetected

use tracing::debug;

use crate::distance::Distance;
use crate::error::{ApspError, Result};
use crate::graph::Graph;
use crate::heap::{HeapItem, MinHeap};
use crate::result::{DistanceMatrix, PathMatrix, ShortestPaths, SolveStats, NO_PARENT};
use crate::reweight::{bellman_ford_potential, Potential};
use crate::solver::{ApspEngine, Strategy};
use crate::weight::Weight;

#[derive(Copy, Clone, Debug, Default)]
pub struct Johnson;

impl ApspEngine for Johnson {
    fn strategy(&self) -> Strategy {
        Strategy::Sparse
    }

    fn solve<W: Weight>(&self, graph: &Graph<W>) -> Result<ShortestPaths<W>> {
        johnson(graph)
    }
}

/// Scratch buffers reused across sources.
struct Search<W> {
    dist: Vec<Option<W>>,
    settled: Vec<bool>,
    heap: MinHeap<W>,
    relaxations: u64,
}

impl<W: Weight> Search<W> {
    fn new(n: usize) -> Self {
        Self {
            dist: vec![None; n],
            settled: vec![false; n],
            heap: MinHeap::with_capacity(n.min(1024)),
            relaxations: 0,
        }
    }

    // Fills `parents` (one row, indexed by 0-based target) with the index of
    // the edge that last improved each target.
    fn run(&mut self, graph: &Graph<W>, reweighted: &[W], source: usize, parents: &mut [usize]) -> Result<()> {
        self.dist.iter_mut().for_each(|d| *d = None);
        self.settled.iter_mut().for_each(|s| *s = false);
        self.heap.clear();

        self.dist[source] = Some(W::ZERO);
        self.heap.push(HeapItem { dist: W::ZERO, node: source });
        while let Some(HeapItem { dist: d, node: u }) = self.heap.pop() {
            if self.settled[u] {
                continue;
            }
            self.settled[u] = true;
            for &idx in graph.out_edge_indices(u + 1) {
                let v = graph.edges()[idx].head - 1;
                if self.settled[v] {
                    continue;
                }
                let nd = d.add_checked(reweighted[idx]).map_err(|_| ApspError::WeightOverflow)?;
                if self.dist[v].map_or(true, |cur| nd < cur) {
                    self.dist[v] = Some(nd);
                    parents[v] = idx;
                    self.heap.push(HeapItem { dist: nd, node: v });
                    self.relaxations += 1;
                }
            }
        }
        Ok(())
    }
}

fn reweight_edges<W: Weight>(graph: &Graph<W>, potential: &Potential<W>) -> Result<Vec<W>> {
    graph.edges().iter().map(|e| potential.reweight(e)).collect()
}

pub fn johnson<W: Weight>(graph: &Graph<W>) -> Result<ShortestPaths<W>> {
    let n = graph.vertex_count();
    let potential = bellman_ford_potential(graph)?;
    let reweighted = reweight_edges(graph, &potential)?;

    let mut dist = vec![Distance::NoPath; n * n];
    let mut parents = vec![NO_PARENT; n * n];
    let mut search = Search::new(n);

    for s in 0..n {
        search.run(graph, &reweighted, s, &mut parents[s * n..(s + 1) * n])?;
        for t in 0..n {
            if let Some(rw) = search.dist[t] {
                dist[s * n + t] = Distance::Finite(potential.restore(rw, s + 1, t + 1)?);
            }
        }
    }

    let stats = SolveStats {
        relaxations: potential.relaxations() + search.relaxations,
        bellman_ford_passes: potential.passes(),
        heap_pushes: search.heap.pushes,
        heap_pops: search.heap.pops,
        heap_max: search.heap.max_size,
        cycle_vertices: 0,
    };
    debug!(
        vertices = n,
        edges = graph.edge_count(),
        passes = stats.bellman_ford_passes,
        relaxations = stats.relaxations,
        heap_pushes = stats.heap_pushes,
        "johnson finished"
    );
    Ok(ShortestPaths::new(
        Strategy::Sparse,
        DistanceMatrix::from_raw(n, dist),
        PathMatrix::from_parents(n, parents, graph.edges().to_vec()),
        stats,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::result::PathEntry;

    #[test]
    fn chain_with_negative_edges() {
        let g = Graph::from_triples(4, &[(1, 2, -10i64), (2, 3, 20), (3, 4, -30)]).unwrap();
        let sp = johnson(&g).unwrap();
        assert_eq!(sp.distance(1, 4).unwrap(), Distance::Finite(-20));
        assert_eq!(sp.distance(2, 4).unwrap(), Distance::Finite(-10));
        assert_eq!(
            sp.path(1, 4).unwrap(),
            PathEntry::Path(vec![Edge::new(1, 2, -10), Edge::new(2, 3, 20), Edge::new(3, 4, -30)])
        );
        assert_eq!(sp.path(4, 1).unwrap(), PathEntry::NoPath);
        assert_eq!(sp.strategy(), Strategy::Sparse);
    }

    #[test]
    fn any_negative_cycle_aborts() {
        let g = Graph::from_triples(4, &[(1, 2, -10i64), (2, 1, -10), (3, 4, 20), (4, 3, 200)]).unwrap();
        assert!(matches!(johnson(&g), Err(ApspError::NegativeCycleDetected)));
    }

    #[test]
    fn parallel_edges_take_the_lighter_one() {
        // adjacency keeps both edges, so the search sees the cheaper one
        let g = Graph::from_triples(2, &[(1, 2, 1i64), (1, 2, 9)]).unwrap();
        let sp = johnson(&g).unwrap();
        assert_eq!(sp.distance(1, 2).unwrap(), Distance::Finite(1));
        assert_eq!(sp.path(1, 2).unwrap(), PathEntry::Path(vec![Edge::new(1, 2, 1)]));
    }

    #[test]
    fn prefers_cheaper_detour() {
        let g = Graph::from_triples(3, &[(1, 3, 5i64), (1, 2, 2), (2, 3, -4)]).unwrap();
        let sp = johnson(&g).unwrap();
        assert_eq!(sp.distance(1, 3).unwrap(), Distance::Finite(-2));
        assert_eq!(sp.path(1, 3).unwrap(), PathEntry::Path(vec![Edge::new(1, 2, 2), Edge::new(2, 3, -4)]));
        assert!(sp.stats().heap_pushes >= 3);
    }

    #[test]
    fn float_weights() {
        let g = Graph::from_triples(3, &[(1, 2, 0.5f64), (2, 3, -0.25), (1, 3, 1.0)]).unwrap();
        let sp = johnson(&g).unwrap();
        assert_eq!(sp.distance(1, 3).unwrap(), Distance::Finite(0.25));
    }
}
