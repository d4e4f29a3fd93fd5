use apsp_core::gens::{random_graph, random_graph_without_negative_cycles};
use apsp_core::{floyd_warshall, johnson, ApspError, Distance, Graph, PathEntry, ShortestPaths};

fn assert_distance_parity(a: &ShortestPaths<i64>, b: &ShortestPaths<i64>) {
    let mut diffs = Vec::new();
    for ((i, j, da), (_, _, db)) in a.distances().iter().zip(b.distances().iter()) {
        if da != db {
            diffs.push((i, j, da, db));
            if diffs.len() > 16 { break; }
        }
    }
    if !diffs.is_empty() {
        let mut msg = String::from("distance parity mismatch; first differences: ");
        for (i, j, x, y) in &diffs { msg.push_str(&format!("[({},{}): {} vs {}] ", i, j, x, y)); }
        panic!("{} ({} diffs; n={})", msg, diffs.len(), a.vertex_count());
    }
}

// Every finite entry must carry a walk i -> j whose weights sum to the distance.
fn assert_paths_consistent(sp: &ShortestPaths<i64>) {
    for q in sp.iter_pairs() {
        match (q.distance, &q.path) {
            (Distance::Finite(d), PathEntry::Path(edges)) => {
                let mut at = q.source;
                for e in edges {
                    assert_eq!(e.tail, at, "broken walk for ({}, {})", q.source, q.destination);
                    at = e.head;
                }
                assert_eq!(at, q.destination, "walk for ({}, {}) ends at {}", q.source, q.destination, at);
                let sum: i64 = edges.iter().map(|e| e.weight).sum();
                assert_eq!(sum, d, "path weight mismatch for ({}, {})", q.source, q.destination);
                if q.source == q.destination {
                    assert!(edges.is_empty());
                }
            }
            (Distance::Finite(_), other) => panic!("finite pair ({}, {}) has path {:?}", q.source, q.destination, other),
            (Distance::NoPath, p) => assert_eq!(p, &PathEntry::NoPath),
            (Distance::UnboundedBelow, p) => assert_eq!(p, &PathEntry::UnboundedBelow),
        }
    }
}

fn sample_graphs() -> Vec<Graph<i64>> {
    let mut graphs = Vec::new();
    for seed in 1..=5u64 {
        graphs.push(random_graph_without_negative_cycles(40, 160, seed * 7919, 20, 30).unwrap());
    }
    graphs.push(random_graph_without_negative_cycles(25, 600, 3, 5, 100).unwrap());
    graphs.push(random_graph(30, 90, 17, 1, 50).unwrap());
    graphs.push(random_graph(12, 10, 5, 0, 3).unwrap());
    graphs
}

#[test]
fn parity_random_graphs() {
    for g in &sample_graphs() {
        let dense = floyd_warshall(g).unwrap();
        let sparse = johnson(g).unwrap();
        assert_distance_parity(&dense, &sparse);
        assert_eq!(dense.stats().cycle_vertices, 0);
    }
}

#[test]
fn witness_paths_match_distances() {
    for g in &sample_graphs() {
        assert_paths_consistent(&floyd_warshall(g).unwrap());
        assert_paths_consistent(&johnson(g).unwrap());
    }
}

#[test]
fn diagonal_is_zero_without_cycles() {
    for g in &sample_graphs() {
        for sp in [floyd_warshall(g).unwrap(), johnson(g).unwrap()] {
            for v in 1..=g.vertex_count() {
                assert_eq!(sp.distance(v, v).unwrap(), Distance::Finite(0));
            }
        }
    }
}

#[test]
fn runs_are_idempotent() {
    let g = random_graph_without_negative_cycles(30, 120, 99, 10, 40).unwrap();
    let (a, b) = (floyd_warshall(&g).unwrap(), floyd_warshall(&g).unwrap());
    assert_eq!(a.distances(), b.distances());
    assert!(a.iter_pairs().eq(b.iter_pairs()));
    assert_eq!(a.stats(), b.stats());
    let (a, b) = (johnson(&g).unwrap(), johnson(&g).unwrap());
    assert_eq!(a.distances(), b.distances());
    assert!(a.iter_pairs().eq(b.iter_pairs()));
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn negative_cycles_split_the_engines() {
    // mixed-sign random graphs: dense must stay consistent, sparse must
    // refuse exactly when dense finds a cycle vertex
    for seed in 1..=8u64 {
        let g = random_graph(15, 40, seed, -6, 20).unwrap();
        let dense = floyd_warshall(&g).unwrap();
        assert_paths_consistent(&dense);
        match johnson(&g) {
            Ok(sparse) => {
                assert_eq!(dense.stats().cycle_vertices, 0, "seed {}", seed);
                assert_distance_parity(&dense, &sparse);
            }
            Err(ApspError::NegativeCycleDetected) => assert!(dense.stats().cycle_vertices > 0, "seed {}", seed),
            Err(e) => panic!("seed {}: unexpected error {}", seed, e),
        }
    }
}
