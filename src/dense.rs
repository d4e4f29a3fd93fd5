//! Floyd-Warshall over the full distance matrix.
//!
//! Witnesses are kept as one [`Hop`] per pair instead of concatenated edge
//! lists. Negative cycles never abort the run: after the sweep every vertex
//! with a negative diagonal is a cycle vertex, and each pair `(i, j)` with
//! `i` reaching it and it reaching `j` is marked unbounded below.

use tracing::{debug, warn};

use crate::distance::Distance;
use crate::error::Result;
use crate::graph::Graph;
use crate::result::{DistanceMatrix, Hop, PathMatrix, ShortestPaths, SolveStats};
use crate::solver::{ApspEngine, Strategy};
use crate::weight::Weight;

#[derive(Copy, Clone, Debug, Default)]
pub struct FloydWarshall;

impl ApspEngine for FloydWarshall {
    fn strategy(&self) -> Strategy {
        Strategy::Dense
    }

    fn solve<W: Weight>(&self, graph: &Graph<W>) -> Result<ShortestPaths<W>> {
        floyd_warshall(graph)
    }
}

// Direct edges fill the matrix in input order, so a later parallel edge
// replaces an earlier one even when it is heavier. A self-loop only matters
// when negative; otherwise the diagonal stays 0.
fn initial_matrix<W: Weight>(graph: &Graph<W>) -> (Vec<Distance<W>>, Vec<Hop>) {
    let n = graph.vertex_count();
    let mut dist = vec![Distance::NoPath; n * n];
    let mut hops = vec![Hop::None; n * n];
    for i in 0..n {
        dist[i * n + i] = Distance::Finite(W::ZERO);
    }
    for e in graph.edges() {
        let idx = (e.tail - 1) * n + (e.head - 1);
        if e.tail == e.head && !e.weight.is_negative() {
            dist[idx] = Distance::Finite(W::ZERO);
            hops[idx] = Hop::None;
        } else {
            dist[idx] = Distance::Finite(e.weight);
            hops[idx] = Hop::Direct;
        }
    }
    (dist, hops)
}

pub fn floyd_warshall<W: Weight>(graph: &Graph<W>) -> Result<ShortestPaths<W>> {
    let n = graph.vertex_count();
    let (mut dist, mut hops) = initial_matrix(graph);
    let mut relaxations = 0u64;

    // k must settle completely before k + 1 uses it
    for k in 0..n {
        for i in 0..n {
            let ik = i * n + k;
            let d_ik = dist[ik];
            if !d_ik.is_reachable() {
                continue;
            }
            for j in 0..n {
                let kj = k * n + j;
                let ij = i * n + j;
                let candidate = d_ik.through(dist[kj])?;
                if candidate.is_shorter_than(dist[ij]) {
                    dist[ij] = candidate;
                    let witnessed = candidate.is_finite() && hops[ik] != Hop::Unknown && hops[kj] != Hop::Unknown;
                    hops[ij] = if witnessed { Hop::Via(k) } else { Hop::Unknown };
                    relaxations += 1;
                }
            }
        }
    }

    let cycle_vertices: Vec<usize> = (0..n)
        .filter(|&v| dist[v * n + v].is_shorter_than(Distance::Finite(W::ZERO)))
        .collect();
    if !cycle_vertices.is_empty() {
        warn!(count = cycle_vertices.len(), "negative cycle vertices found; invalidating affected pairs");
    }

    // reachability is read from the post-sweep matrix; marking a pair
    // UnboundedBelow keeps it reachable, so later cycle vertices see the same sets
    for &v in &cycle_vertices {
        let sources: Vec<usize> = (0..n).filter(|&i| dist[i * n + v].is_reachable()).collect();
        let targets: Vec<usize> = (0..n).filter(|&j| dist[v * n + j].is_reachable()).collect();
        for &i in &sources {
            for &j in &targets {
                dist[i * n + j] = Distance::UnboundedBelow;
                hops[i * n + j] = Hop::None;
            }
        }
    }

    let stats = SolveStats {
        relaxations,
        cycle_vertices: cycle_vertices.len() as u32,
        ..SolveStats::default()
    };
    debug!(
        vertices = n,
        edges = graph.edge_count(),
        relaxations,
        cycle_vertices = stats.cycle_vertices,
        "floyd-warshall finished"
    );
    Ok(ShortestPaths::new(
        Strategy::Dense,
        DistanceMatrix::from_raw(n, dist),
        PathMatrix::from_hops(n, hops),
        stats,
    ))
}
