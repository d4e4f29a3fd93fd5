//! Vertex potentials from a Bellman-Ford pass over a virtual source.
//!
//! The virtual source is joined to every vertex by a zero-weight edge. It is
//! never materialised in the [`Graph`]; the relaxation loop walks the real
//! edges and then the synthetic ones. A potential `h` satisfies
//! `w(u, v) + h(u) - h(v) >= 0` for every edge once no negative cycle exists.

use tracing::{debug, trace, warn};

use crate::error::{ApspError, Result};
use crate::graph::{Edge, Graph};
use crate::weight::{Overflow, Weight};

#[derive(Clone, Debug)]
pub struct Potential<W> {
    values: Vec<W>,
    passes: u32,
    relaxations: u64,
}

impl<W: Weight> Potential<W> {
    /// Potential of `vertex` (1-based).
    #[inline]
    pub fn get(&self, vertex: usize) -> W {
        self.values[vertex - 1]
    }

    pub fn values(&self) -> &[W] {
        &self.values
    }

    /// Relaxation passes run before convergence (verification pass excluded).
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn relaxations(&self) -> u64 {
        self.relaxations
    }

    /// `w(u, v) + h(u) - h(v)`, non-negative for any edge of a graph without
    /// negative cycles.
    #[inline]
    pub fn reweight(&self, edge: &Edge<W>) -> Result<W> {
        let shift = self
            .get(edge.tail)
            .sub_checked(self.get(edge.head))
            .map_err(|_| ApspError::WeightOverflow)?;
        let w = edge.weight.add_checked(shift).map_err(|_| ApspError::WeightOverflow)?;
        // float rounding can leave a tiny negative residue
        Ok(if w.is_negative() { W::ZERO } else { w })
    }

    /// Inverse of [`Potential::reweight`] for a whole path `source -> target`.
    #[inline]
    pub fn restore(&self, reweighted: W, source: usize, target: usize) -> Result<W> {
        reweighted
            .add_checked(self.get(target))
            .and_then(|d| d.sub_checked(self.get(source)))
            .map_err(|_| ApspError::WeightOverflow)
    }
}

// Index 0 is the virtual source; vertex v lives at index v.
#[inline]
fn relax<W: Weight>(dist: &mut [Option<W>], tail: usize, head: usize, weight: W) -> Result<bool> {
    let Some(du) = dist[tail] else { return Ok(false) };
    let candidate = match du.add_checked(weight) {
        Ok(c) => c,
        // only a walk around a negative cycle can fall off the bottom
        Err(Overflow::Below) => return Err(ApspError::NegativeCycleDetected),
        Err(Overflow::Above) => return Err(ApspError::WeightOverflow),
    };
    match dist[head] {
        Some(dv) if !(candidate < dv) => Ok(false),
        _ => {
            dist[head] = Some(candidate);
            Ok(true)
        }
    }
}

fn relax_all<W: Weight>(graph: &Graph<W>, dist: &mut [Option<W>], relaxations: &mut u64) -> Result<bool> {
    let mut updated = false;
    for e in graph.edges() {
        if relax(dist, e.tail, e.head, e.weight)? {
            *relaxations += 1;
            updated = true;
        }
    }
    for v in 1..=graph.vertex_count() {
        if relax(dist, 0, v, W::ZERO)? {
            *relaxations += 1;
            updated = true;
        }
    }
    Ok(updated)
}

/// Computes potentials for every vertex.
///
/// Fails with [`ApspError::NegativeCycleDetected`] if any negative cycle
/// exists anywhere in the graph, whether or not it matters to a given pair.
pub fn bellman_ford_potential<W: Weight>(graph: &Graph<W>) -> Result<Potential<W>> {
    let n = graph.vertex_count();
    let mut dist: Vec<Option<W>> = vec![None; n + 1];
    dist[0] = Some(W::ZERO);

    let mut relaxations = 0u64;
    let mut passes = 0u32;
    let mut updated = false;
    // n + 1 vertices including the virtual source, so n passes suffice
    for _ in 0..n {
        passes += 1;
        updated = relax_all(graph, &mut dist, &mut relaxations)?;
        trace!(pass = passes, relaxations, "bellman-ford pass");
        if !updated {
            break;
        }
    }

    if updated {
        let mut probe = 0u64;
        if relax_all(graph, &mut dist, &mut probe)? {
            warn!(vertices = n, edges = graph.edge_count(), "negative cycle found during reweighting");
            return Err(ApspError::NegativeCycleDetected);
        }
    }

    debug!(vertices = n, passes, relaxations, "potentials computed");
    let values = dist[1..].iter().map(|d| d.unwrap_or(W::ZERO)).collect();
    Ok(Potential { values, passes, relaxations })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn potentials_make_edges_non_negative() {
        let g = Graph::from_triples(4, &[(1, 2, -10i64), (2, 3, 20), (3, 4, -30), (1, 4, 5)]).unwrap();
        let p = bellman_ford_potential(&g).unwrap();
        assert_eq!(p.values(), &[0, -10, 0, -30]);
        for e in g.edges() {
            assert!(p.reweight(e).unwrap() >= 0, "edge {} reweighted negative", e);
        }
        // path 1 -> 4 through 2, 3 weighs -20 before reweighting
        let rw: i64 = g.edges()[..3].iter().map(|e| p.reweight(e).unwrap()).sum();
        assert_eq!(p.restore(rw, 1, 4).unwrap(), -20);
    }

    #[test]
    fn all_positive_graph_converges_in_one_pass() {
        let g = Graph::from_triples(3, &[(1, 2, 3i64), (2, 3, 4)]).unwrap();
        let p = bellman_ford_potential(&g).unwrap();
        assert_eq!(p.values(), &[0, 0, 0]);
        // first pass seeds every vertex from the virtual source, second sees no change
        assert_eq!(p.passes(), 2);
    }

    #[test]
    fn detects_negative_cycle_anywhere() {
        let g = Graph::from_triples(4, &[(1, 2, -10i64), (2, 1, -10), (3, 4, 20), (4, 3, 200)]).unwrap();
        assert!(matches!(bellman_ford_potential(&g), Err(ApspError::NegativeCycleDetected)));
    }

    #[test]
    fn negative_self_loop_is_a_cycle() {
        let g = Graph::from_triples(2, &[(1, 2, 4i64), (2, 2, -1)]).unwrap();
        assert!(matches!(bellman_ford_potential(&g), Err(ApspError::NegativeCycleDetected)));
    }

    #[test]
    fn single_vertex() {
        let g = Graph::<i64>::new(1, vec![]).unwrap();
        let p = bellman_ford_potential(&g).unwrap();
        assert_eq!(p.values(), &[0]);
    }
}
