//! Stable C ABI over flat edge arrays.
//!
//! Vertex ids are 1-based as everywhere else. Distances come back as `f64`
//! in row-major `n * n` order with `+inf` for no path and `-inf` for pairs
//! invalidated by a negative cycle. `out_pred`, when non-null, receives the
//! predecessor of each target on its witness path (`-1` when there is none).
//!
//! Return codes: `0` success, `-1` empty graph, `-2` vertex out of range,
//! `-3` null pointer, `-4` negative cycle (sparse only), `-5` overflow or
//! non-finite weight, `-6` anything else.

use core::slice;

use crate::distance::Distance;
use crate::error::ApspError;
use crate::graph::{Edge, Graph};
use crate::result::{PathEntry, ShortestPaths};
use crate::solver::{ApspEngine, Strategy};
use crate::{FloydWarshall, Johnson};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct ApspResultInfo {
    pub relaxations: u64,
    pub heap_pushes: u64,
    pub bellman_ford_passes: u32,
    pub cycle_vertices: u32,
    pub strategy: i32, // 0 dense, 1 sparse
    pub error_code: i32,
}

pub fn error_code(err: &ApspError) -> i32 {
    match err {
        ApspError::EmptyGraph => -1,
        ApspError::VertexOutOfRange { .. } => -2,
        ApspError::NegativeCycleDetected => -4,
        ApspError::WeightOverflow | ApspError::NonFiniteWeight { .. } => -5,
        ApspError::Parse { .. } | ApspError::Io(_) => -6,
    }
}

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 { &[] } else { slice::from_raw_parts(ptr, len) }
}

#[inline(always)]
unsafe fn as_mut_slice<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 { &mut [] } else { slice::from_raw_parts_mut(ptr, len) }
}

#[allow(clippy::too_many_arguments)]
unsafe fn run(
    strategy: Strategy,
    n: u32,
    m: u32,
    tails: *const u32,
    heads: *const u32,
    weights: *const f64,
    out_dist: *mut f64,
    out_pred: *mut i32,
    info: *mut ApspResultInfo,
) -> i32 {
    if n == 0 { return -1; }
    if out_dist.is_null() || (m > 0 && (tails.is_null() || heads.is_null() || weights.is_null())) { return -3; }

    let n_usize = n as usize;
    let m_usize = m as usize;
    let tl = as_slice(tails, m_usize);
    let hd = as_slice(heads, m_usize);
    let wt = as_slice(weights, m_usize);
    let edges: Vec<Edge<f64>> = (0..m_usize).map(|i| Edge::new(tl[i] as usize, hd[i] as usize, wt[i])).collect();

    let outcome = Graph::new(n_usize, edges).and_then(|g| match strategy {
        Strategy::Sparse => Johnson.solve(&g),
        _ => FloydWarshall.solve(&g),
    });
    let result = match outcome {
        Ok(r) => r,
        Err(e) => {
            let rc = error_code(&e);
            if !info.is_null() { *info = ApspResultInfo { error_code: rc, ..ApspResultInfo::default() }; }
            return rc;
        }
    };

    let dist = as_mut_slice(out_dist, n_usize * n_usize);
    for (idx, (_, _, d)) in result.distances().iter().enumerate() {
        dist[idx] = match d {
            Distance::Finite(w) => w,
            Distance::NoPath => f64::INFINITY,
            Distance::UnboundedBelow => f64::NEG_INFINITY,
        };
    }
    if !out_pred.is_null() {
        let pred = as_mut_slice(out_pred, n_usize * n_usize);
        fill_predecessors(&result, pred);
    }
    if !info.is_null() {
        let stats = result.stats();
        *info = ApspResultInfo {
            relaxations: stats.relaxations,
            heap_pushes: stats.heap_pushes,
            bellman_ford_passes: stats.bellman_ford_passes,
            cycle_vertices: stats.cycle_vertices,
            strategy: if result.strategy() == Strategy::Sparse { 1 } else { 0 },
            error_code: 0,
        };
    }
    0
}

fn fill_predecessors(result: &ShortestPaths<f64>, pred: &mut [i32]) {
    for (idx, q) in result.iter_pairs().enumerate() {
        pred[idx] = match &q.path {
            PathEntry::Path(edges) => edges.last().map_or(-1, |e| e.tail as i32),
            _ => -1,
        };
    }
}

/// # Safety
/// `tails`, `heads`, `weights` must hold `m` elements; `out_dist` (and
/// `out_pred` if non-null) must hold `n * n`; `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn apsp_run_dense(
    n: u32,
    m: u32,
    tails: *const u32,
    heads: *const u32,
    weights: *const f64,
    out_dist: *mut f64,
    out_pred: *mut i32,
    info: *mut ApspResultInfo,
) -> i32 {
    run(Strategy::Dense, n, m, tails, heads, weights, out_dist, out_pred, info)
}

/// # Safety
/// Same contract as [`apsp_run_dense`].
#[no_mangle]
pub unsafe extern "C" fn apsp_run_sparse(
    n: u32,
    m: u32,
    tails: *const u32,
    heads: *const u32,
    weights: *const f64,
    out_dist: *mut f64,
    out_pred: *mut i32,
    info: *mut ApspResultInfo,
) -> i32 {
    run(Strategy::Sparse, n, m, tails, heads, weights, out_dist, out_pred, info)
}

#[no_mangle]
pub extern "C" fn apsp_version() -> u32 { 1 }
