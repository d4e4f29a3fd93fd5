//! All-pairs shortest paths over directed graphs whose edge weights may be
//! negative, exposed as a Rust API and a stable C ABI.
//! Provides two interchangeable engines with one result contract:
//!  - Dense: Floyd-Warshall, marks each pair touched by a negative cycle as
//!    unbounded below and keeps computing everything else.
//!  - Sparse: Johnson (Bellman-Ford potentials + one heap search per source),
//!    refuses the whole graph if any negative cycle exists.
//!
//! ```
//! use apsp_core::{Distance, Graph, SolverConfig, Strategy};
//!
//! let g = Graph::from_triples(4, &[(1, 2, -10i64), (2, 3, 20), (3, 4, -30)]).unwrap();
//! let sp = apsp_core::solve(&g, &SolverConfig::new(Strategy::Sparse)).unwrap();
//! assert_eq!(sp.distance(1, 4).unwrap(), Distance::Finite(-20));
//! ```

pub mod dense;
pub mod distance;
pub mod error;
pub mod ffi;
pub mod gens;
pub mod graph;
mod heap;
pub mod io;
pub mod result;
pub mod reweight;
pub mod solver;
pub mod sparse;
pub mod weight;

pub use dense::{floyd_warshall, FloydWarshall};
pub use distance::Distance;
pub use error::{ApspError, Result};
pub use graph::{Edge, Graph};
pub use result::{DistanceMatrix, Extremum, PairQuery, PathEntry, PathMatrix, ShortestPaths, SolveStats};
pub use reweight::{bellman_ford_potential, Potential};
pub use solver::{solve, ApspEngine, SolverConfig, Strategy};
pub use sparse::{johnson, Johnson};
pub use weight::Weight;
