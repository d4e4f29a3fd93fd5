//! Strategy selection and the engine seam.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dense::FloydWarshall;
use crate::error::Result;
use crate::graph::Graph;
use crate::result::ShortestPaths;
use crate::sparse::Johnson;
use crate::weight::Weight;

/// An all-pairs shortest-path engine. Both engines honour the same result
/// contract; they differ in how negative cycles are reported.
pub trait ApspEngine {
    fn strategy(&self) -> Strategy;

    fn solve<W: Weight>(&self, graph: &Graph<W>) -> Result<ShortestPaths<W>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Floyd-Warshall; per-pair negative-cycle invalidation.
    Dense,
    /// Johnson; any negative cycle aborts the whole run.
    Sparse,
    /// Pick by edge density, see [`SolverConfig::dense_threshold`].
    Auto,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Dense => "dense",
            Strategy::Sparse => "sparse",
            Strategy::Auto => "auto",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "floyd" | "floyd-warshall" => Ok(Strategy::Dense),
            "sparse" | "johnson" => Ok(Strategy::Sparse),
            "auto" => Ok(Strategy::Auto),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

pub const DEFAULT_DENSE_THRESHOLD: f64 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Edge density `m / n^2` at or above which `Auto` runs the dense engine.
    pub dense_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { strategy: Strategy::Auto, dense_threshold: DEFAULT_DENSE_THRESHOLD }
    }
}

impl SolverConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, ..Self::default() }
    }

    /// Reads `APSP_STRATEGY` and `APSP_DENSE_THRESHOLD`; anything missing or
    /// unparseable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let strategy = std::env::var("APSP_STRATEGY").ok().and_then(|v| v.parse().ok()).unwrap_or(defaults.strategy);
        let dense_threshold: f64 = std::env::var("APSP_DENSE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|t: &f64| t.is_finite() && *t >= 0.0)
            .unwrap_or(defaults.dense_threshold);
        Self { strategy, dense_threshold }
    }

    /// Concrete engine for `graph`; never returns `Auto`.
    pub fn resolve<W>(&self, graph: &Graph<W>) -> Strategy {
        match self.strategy {
            Strategy::Auto if graph.density() >= self.dense_threshold => Strategy::Dense,
            Strategy::Auto => Strategy::Sparse,
            fixed => fixed,
        }
    }
}

/// Runs the engine chosen by `config` on `graph`.
pub fn solve<W: Weight>(graph: &Graph<W>, config: &SolverConfig) -> Result<ShortestPaths<W>> {
    let strategy = config.resolve(graph);
    debug!(
        requested = %config.strategy,
        resolved = %strategy,
        density = graph.density(),
        "dispatching all-pairs run"
    );
    match strategy {
        Strategy::Sparse => Johnson.solve(graph),
        _ => FloydWarshall.solve(graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strategy_names() {
        assert_eq!("Dense".parse::<Strategy>().unwrap(), Strategy::Dense);
        assert_eq!(" johnson ".parse::<Strategy>().unwrap(), Strategy::Sparse);
        assert_eq!("auto".parse::<Strategy>().unwrap(), Strategy::Auto);
        assert!("bfs".parse::<Strategy>().is_err());
    }

    #[test]
    fn auto_resolves_by_density() {
        let sparse = Graph::from_triples(4, &[(1, 2, 1i64)]).unwrap();
        let dense = Graph::from_triples(2, &[(1, 2, 1i64), (2, 1, 1)]).unwrap();
        let cfg = SolverConfig::default();
        assert_eq!(cfg.resolve(&sparse), Strategy::Sparse);
        assert_eq!(cfg.resolve(&dense), Strategy::Dense);
        assert_eq!(SolverConfig::new(Strategy::Sparse).resolve(&dense), Strategy::Sparse);
    }

    #[test]
    fn solve_reports_engine_used() {
        let g = Graph::from_triples(2, &[(1, 2, 1i64), (2, 1, 1)]).unwrap();
        let out = solve(&g, &SolverConfig::default()).unwrap();
        assert_eq!(out.strategy(), Strategy::Dense);
        let out = solve(&g, &SolverConfig::new(Strategy::Sparse)).unwrap();
        assert_eq!(out.strategy(), Strategy::Sparse);
    }
}
