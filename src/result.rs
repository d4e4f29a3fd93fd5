//! Result assembly shared by both engines.
//!
//! Distances are stored flat (`n * n`, 0-based internally) and addressed with
//! 1-based vertex ids from outside. Witness paths are never stored as edge
//! lists; each engine leaves an index-based witness and paths are rebuilt on
//! demand, so memory stays `O(n^2)` regardless of path length.

use serde::Serialize;

use crate::distance::Distance;
use crate::error::{ApspError, Result};
use crate::graph::Edge;
use crate::solver::Strategy;
use crate::weight::Weight;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceMatrix<W> {
    n: usize,
    data: Vec<Distance<W>>,
}

/// Extreme finite distance and every ordered pair that attains it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extremum<W> {
    pub distance: W,
    pub pairs: Vec<(usize, usize)>,
}

#[inline]
pub(crate) fn check_vertex(vertex: usize, n: usize) -> Result<()> {
    if vertex == 0 || vertex > n {
        return Err(ApspError::VertexOutOfRange { vertex, n });
    }
    Ok(())
}

impl<W: Weight> DistanceMatrix<W> {
    pub(crate) fn from_raw(n: usize, data: Vec<Distance<W>>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self { n, data }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn get(&self, source: usize, destination: usize) -> Result<Distance<W>> {
        check_vertex(source, self.n)?;
        check_vertex(destination, self.n)?;
        Ok(self.at(source - 1, destination - 1))
    }

    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> Distance<W> {
        self.data[i * self.n + j]
    }

    /// Row of distances out of `source`; index `j` holds vertex `j + 1`.
    pub fn row(&self, source: usize) -> Result<&[Distance<W>]> {
        check_vertex(source, self.n)?;
        let start = (source - 1) * self.n;
        Ok(&self.data[start..start + self.n])
    }

    /// `(source, destination, distance)` for every ordered pair, 1-based.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Distance<W>)> + '_ {
        let n = self.n;
        self.data.iter().enumerate().map(move |(idx, &d)| (idx / n + 1, idx % n + 1, d))
    }

    /// The shortest of all finite shortest distances.
    pub fn min_finite(&self) -> Option<Extremum<W>> {
        self.extreme(|candidate, best| candidate < best)
    }

    /// The longest of all finite shortest distances.
    pub fn max_finite(&self) -> Option<Extremum<W>> {
        self.extreme(|candidate, best| candidate > best)
    }

    fn extreme(&self, better: impl Fn(W, W) -> bool) -> Option<Extremum<W>> {
        let mut best: Option<Extremum<W>> = None;
        for (i, j, d) in self.iter() {
            let Some(w) = d.finite() else { continue };
            match best.as_mut() {
                Some(b) if better(w, b.distance) => {
                    b.distance = w;
                    b.pairs.clear();
                    b.pairs.push((i, j));
                }
                Some(b) if w == b.distance => b.pairs.push((i, j)),
                Some(_) => {}
                None => best = Some(Extremum { distance: w, pairs: vec![(i, j)] }),
            }
        }
        best
    }
}

/// Per-pair witness step left by the dense engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Hop {
    /// No witness: unreachable, invalidated, or the empty path `i -> i`.
    None,
    /// The (last) direct edge `i -> j`.
    Direct,
    /// Split at intermediate vertex `k` (0-based).
    Via(usize),
    /// Distance improved through a leg without a witness.
    Unknown,
}

pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Debug)]
enum Witness<W> {
    Hops(Vec<Hop>),
    /// For each (source, target) the index of the last edge on the path.
    Parents { parents: Vec<usize>, edges: Vec<Edge<W>> },
}

/// Index-based witness storage for every pair.
#[derive(Clone, Debug)]
pub struct PathMatrix<W> {
    n: usize,
    witness: Witness<W>,
}

impl<W: Weight> PathMatrix<W> {
    pub(crate) fn from_hops(n: usize, hops: Vec<Hop>) -> Self {
        Self { n, witness: Witness::Hops(hops) }
    }

    pub(crate) fn from_parents(n: usize, parents: Vec<usize>, edges: Vec<Edge<W>>) -> Self {
        Self { n, witness: Witness::Parents { parents, edges } }
    }

    // Both walks are capped at n - 1 edges: a witness that needs more would
    // have to repeat a vertex, and is reported as unavailable instead.
    fn rebuild(&self, distances: &DistanceMatrix<W>, i: usize, j: usize) -> Option<Vec<Edge<W>>> {
        let n = self.n;
        match &self.witness {
            Witness::Hops(hops) => {
                let mut out = Vec::new();
                let mut stack = vec![(i, j)];
                let mut budget = 2 * n + 1;
                while let Some((a, b)) = stack.pop() {
                    if budget == 0 || out.len() >= n {
                        return None;
                    }
                    budget -= 1;
                    match hops[a * n + b] {
                        Hop::None if a == b => {}
                        Hop::None | Hop::Unknown => return None,
                        Hop::Direct => {
                            let weight = distances.at(a, b).finite()?;
                            out.push(Edge::new(a + 1, b + 1, weight));
                        }
                        Hop::Via(k) => {
                            stack.push((k, b));
                            stack.push((a, k));
                        }
                    }
                }
                (out.len() < n).then_some(out)
            }
            Witness::Parents { parents, edges } => {
                let mut out = Vec::new();
                let mut at = j;
                while at != i {
                    let idx = parents[i * n + at];
                    if idx == NO_PARENT || out.len() >= n - 1 {
                        return None;
                    }
                    let edge = edges[idx];
                    out.push(edge);
                    at = edge.tail - 1;
                }
                out.reverse();
                Some(out)
            }
        }
    }
}

/// Path for one ordered pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "edges", rename_all = "snake_case")]
pub enum PathEntry<W> {
    /// Witness shortest path; empty for `i -> i`.
    Path(Vec<Edge<W>>),
    NoPath,
    /// Invalidated by a negative cycle.
    UnboundedBelow,
    /// Distance is known but no witness could be rebuilt.
    Unavailable,
}

impl<W: Weight> PathEntry<W> {
    pub fn edges(&self) -> Option<&[Edge<W>]> {
        match self {
            PathEntry::Path(edges) => Some(edges),
            _ => None,
        }
    }

    /// Sum of the witness edge weights.
    pub fn total_weight(&self) -> Option<Result<W>> {
        let edges = self.edges()?;
        Some(edges.iter().try_fold(W::ZERO, |acc, e| {
            acc.add_checked(e.weight).map_err(|_| ApspError::WeightOverflow)
        }))
    }
}

/// Work counters for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    pub relaxations: u64,
    pub bellman_ford_passes: u32,
    pub heap_pushes: u64,
    pub heap_pops: u64,
    pub heap_max: u64,
    pub cycle_vertices: u32,
}

/// Distance and path for one ordered pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairQuery<W> {
    pub source: usize,
    pub destination: usize,
    pub distance: Distance<W>,
    pub path: PathEntry<W>,
}

/// Output of either engine. Built once and never mutated.
#[derive(Clone, Debug)]
pub struct ShortestPaths<W> {
    strategy: Strategy,
    distances: DistanceMatrix<W>,
    paths: PathMatrix<W>,
    stats: SolveStats,
}

impl<W: Weight> ShortestPaths<W> {
    pub(crate) fn new(strategy: Strategy, distances: DistanceMatrix<W>, paths: PathMatrix<W>, stats: SolveStats) -> Self {
        Self { strategy, distances, paths, stats }
    }

    /// The engine that produced the result (`Dense` or `Sparse`).
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn vertex_count(&self) -> usize {
        self.distances.vertex_count()
    }

    pub fn distances(&self) -> &DistanceMatrix<W> {
        &self.distances
    }

    pub fn path_matrix(&self) -> &PathMatrix<W> {
        &self.paths
    }

    pub fn distance(&self, source: usize, destination: usize) -> Result<Distance<W>> {
        self.distances.get(source, destination)
    }

    pub fn path(&self, source: usize, destination: usize) -> Result<PathEntry<W>> {
        let d = self.distances.get(source, destination)?;
        Ok(self.entry_for(source - 1, destination - 1, d))
    }

    fn entry_for(&self, i: usize, j: usize, d: Distance<W>) -> PathEntry<W> {
        match d {
            Distance::NoPath => PathEntry::NoPath,
            Distance::UnboundedBelow => PathEntry::UnboundedBelow,
            Distance::Finite(_) => match self.paths.rebuild(&self.distances, i, j) {
                Some(edges) => PathEntry::Path(edges),
                None => PathEntry::Unavailable,
            },
        }
    }

    /// Single-pair lookup against the computed matrices.
    pub fn query(&self, source: usize, destination: usize) -> Result<PairQuery<W>> {
        let distance = self.distances.get(source, destination)?;
        let path = self.entry_for(source - 1, destination - 1, distance);
        Ok(PairQuery { source, destination, distance, path })
    }

    /// Every ordered pair with its path, rebuilt lazily.
    pub fn iter_pairs(&self) -> impl Iterator<Item = PairQuery<W>> + '_ {
        self.distances.iter().map(move |(source, destination, distance)| PairQuery {
            source,
            destination,
            distance,
            path: self.entry_for(source - 1, destination - 1, distance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n: usize, raw: &[Option<i64>]) -> DistanceMatrix<i64> {
        DistanceMatrix::from_raw(n, raw.iter().map(|d| d.map_or(Distance::NoPath, Distance::Finite)).collect())
    }

    #[test]
    fn get_is_one_based_and_checked() {
        let m = matrix(2, &[Some(0), Some(4), None, Some(0)]);
        assert_eq!(m.get(1, 2).unwrap(), Distance::Finite(4));
        assert_eq!(m.get(2, 1).unwrap(), Distance::NoPath);
        assert!(matches!(m.get(3, 1), Err(ApspError::VertexOutOfRange { vertex: 3, n: 2 })));
        assert!(matches!(m.get(1, 0), Err(ApspError::VertexOutOfRange { vertex: 0, n: 2 })));
    }

    #[test]
    fn extremes_collect_all_ties() {
        let m = matrix(3, &[Some(0), Some(7), Some(-2), Some(7), Some(0), None, Some(-2), None, Some(0)]);
        let lo = m.min_finite().unwrap();
        assert_eq!(lo.distance, -2);
        assert_eq!(lo.pairs, vec![(1, 3), (3, 1)]);
        let hi = m.max_finite().unwrap();
        assert_eq!(hi.distance, 7);
        assert_eq!(hi.pairs, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn hops_rebuild_splits_recursively() {
        // 1 -> 2 -> 3 with 1 -> 3 routed via vertex 2 (index 1)
        let d = matrix(3, &[Some(0), Some(1), Some(3), None, Some(0), Some(2), None, None, Some(0)]);
        let hops = vec![
            Hop::None, Hop::Direct, Hop::Via(1),
            Hop::None, Hop::None, Hop::Direct,
            Hop::None, Hop::None, Hop::None,
        ];
        let sp = ShortestPaths::new(Strategy::Dense, d, PathMatrix::from_hops(3, hops), SolveStats::default());
        let p = sp.path(1, 3).unwrap();
        assert_eq!(p, PathEntry::Path(vec![Edge::new(1, 2, 1), Edge::new(2, 3, 2)]));
        assert_eq!(p.total_weight().unwrap().unwrap(), 3);
        assert_eq!(sp.path(2, 2).unwrap(), PathEntry::Path(vec![]));
        assert_eq!(sp.path(3, 1).unwrap(), PathEntry::NoPath);
    }

    #[test]
    fn unknown_hop_reports_unavailable() {
        let d = matrix(2, &[Some(0), Some(5), None, Some(0)]);
        let hops = vec![Hop::None, Hop::Unknown, Hop::None, Hop::None];
        let sp = ShortestPaths::new(Strategy::Dense, d, PathMatrix::from_hops(2, hops), SolveStats::default());
        assert_eq!(sp.path(1, 2).unwrap(), PathEntry::Unavailable);
    }

    #[test]
    fn parents_rebuild_walks_backwards() {
        let edges = vec![Edge::new(1, 2, -10i64), Edge::new(2, 3, 20)];
        let d = matrix(3, &[Some(0), Some(-10), Some(10), None, Some(0), Some(20), None, None, Some(0)]);
        let mut parents = vec![NO_PARENT; 9];
        parents[1] = 0;
        parents[2] = 1;
        parents[5] = 1;
        let sp = ShortestPaths::new(Strategy::Sparse, d, PathMatrix::from_parents(3, parents, edges.clone()), SolveStats::default());
        let q = sp.query(1, 3).unwrap();
        assert_eq!(q.distance, Distance::Finite(10));
        assert_eq!(q.path, PathEntry::Path(edges));
        assert_eq!(sp.iter_pairs().count(), 9);
    }
}
