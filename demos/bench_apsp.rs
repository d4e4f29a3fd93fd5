use std::fs::File;
use std::io::Write;
use std::time::Instant;

use apsp_core::gens::random_graph_without_negative_cycles;
use apsp_core::{floyd_warshall, johnson};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn run_one(n: usize, avg_degree: f32, seed: u64) -> serde_json::Value {
    let m = (n as f32 * avg_degree) as usize;
    let g = random_graph_without_negative_cycles(n, m, seed, 100, 50).expect("graph");
    let t0 = Instant::now(); let dense = floyd_warshall(&g).expect("dense"); let dt_dense = t0.elapsed().as_secs_f64() * 1000.0;
    let t1 = Instant::now(); let sparse = johnson(&g).expect("sparse"); let dt_sparse = t1.elapsed().as_secs_f64() * 1000.0;
    let mismatches = dense.distances().iter().zip(sparse.distances().iter()).filter(|(a, b)| a.2 != b.2).count();
    assert_eq!(mismatches, 0, "parity fail n={} degree={}", n, avg_degree);
    serde_json::json!({
        "n": n, "m": g.edge_count(), "avg_degree": avg_degree, "density": g.density(),
        "dense_ms": dt_dense, "sparse_ms": dt_sparse,
        "sparse_speedup": dt_dense / dt_sparse.max(1e-9),
        "relaxations_dense": dense.stats().relaxations,
        "relaxations_sparse": sparse.stats().relaxations,
        "sparse_stats": sparse.stats(),
    })
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_apsp --sizes 100,200,400 --degrees 2,8,32 --seed 42 [--out benchmarks/apsp.json]"); return; }
    let sizes_arg = args.iter().position(|a| a == "--sizes").and_then(|i| args.get(i + 1)).cloned().unwrap_or("100,200,400".into());
    let degrees_arg = args.iter().position(|a| a == "--degrees").and_then(|i| args.get(i + 1)).cloned().unwrap_or("2,8,32".into());
    let seed: u64 = args.iter().position(|a| a == "--seed").and_then(|i| args.get(i + 1)).and_then(|v| v.parse().ok()).unwrap_or(42);
    let out_path = args.iter().position(|a| a == "--out").and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<usize> = sizes_arg.split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f32> = degrees_arg.split(',').filter_map(|s| s.parse().ok()).collect();

    let mut results = Vec::new();
    for &n in &sizes {
        for &deg in &degrees {
            let row = run_one(n, deg, seed);
            println!("{}", row);
            results.push(row);
        }
    }
    if let Some(out_path) = out_path {
        if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
        let mut f = File::create(&out_path).expect("create out");
        f.write_all(serde_json::to_string_pretty(&serde_json::Value::Array(results)).expect("json").as_bytes()).expect("write");
        eprintln!("wrote {}", out_path);
    }
}
