//! Directed weighted graph over vertices `1..=n`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApspError, Result};
use crate::weight::Weight;

/// Directed edge `tail -> head`. Vertex ids are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge<W> {
    pub tail: usize,
    pub head: usize,
    pub weight: W,
}

impl<W> Edge<W> {
    pub fn new(tail: usize, head: usize, weight: W) -> Self {
        Self { tail, head, weight }
    }
}

impl<W: fmt::Display> fmt::Display for Edge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.tail, self.head, self.weight)
    }
}

/// Immutable graph: the edge list in input order plus a CSR index by tail.
///
/// Parallel edges are kept here; it is up to each engine how they collapse.
#[derive(Clone, Debug)]
pub struct Graph<W> {
    n: usize,
    edges: Vec<Edge<W>>,
    // CSR over 0-based tails; entries are indices into `edges`
    offsets: Vec<usize>,
    by_tail: Vec<usize>,
}

impl<W: Weight> Graph<W> {
    /// Validates every edge; nothing is repaired.
    pub fn new(n: usize, edges: Vec<Edge<W>>) -> Result<Self> {
        if n == 0 {
            return Err(ApspError::EmptyGraph);
        }
        for e in &edges {
            for vertex in [e.tail, e.head] {
                if vertex == 0 || vertex > n {
                    return Err(ApspError::VertexOutOfRange { vertex, n });
                }
            }
            if !e.weight.is_finite_weight() {
                return Err(ApspError::NonFiniteWeight { tail: e.tail, head: e.head });
            }
        }

        // counting sort keeps input order within a tail
        let mut offsets = vec![0usize; n + 1];
        for e in &edges {
            offsets[e.tail] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }
        let mut cursor = offsets.clone();
        let mut by_tail = vec![0usize; edges.len()];
        for (idx, e) in edges.iter().enumerate() {
            let slot = &mut cursor[e.tail - 1];
            by_tail[*slot] = idx;
            *slot += 1;
        }

        Ok(Self { n, edges, offsets, by_tail })
    }

    pub fn from_triples(n: usize, triples: &[(usize, usize, W)]) -> Result<Self> {
        Self::new(n, triples.iter().map(|&(t, h, w)| Edge::new(t, h, w)).collect())
    }
}

impl<W> Graph<W> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in input order.
    #[inline]
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// Indices into [`Graph::edges`] of the edges leaving `tail` (1-based).
    ///
    /// Panics if `tail` is outside `1..=n`.
    #[inline]
    pub fn out_edge_indices(&self, tail: usize) -> &[usize] {
        &self.by_tail[self.offsets[tail - 1]..self.offsets[tail]]
    }

    pub fn out_edges(&self, tail: usize) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.out_edge_indices(tail).iter().map(move |&i| &self.edges[i])
    }

    /// `m / n^2`, the fill ratio of the adjacency matrix.
    pub fn density(&self) -> f64 {
        self.edges.len() as f64 / (self.n as f64 * self.n as f64)
    }
}
