use apsp_core::gens::random_graph_without_negative_cycles;
use apsp_core::{solve, SolverConfig, Strategy};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 { eprintln!("usage: run_one <n> <avg_degree> <seed> <mode: dense|sparse|auto>"); std::process::exit(1); }
    let n: usize = args[1].parse().expect("n");
    let avg_degree: f32 = args[2].parse().expect("avg_degree");
    let seed: u64 = args[3].parse().expect("seed");
    let mode: Strategy = match args[4].parse() { Ok(s) => s, Err(e) => { eprintln!("{e}"); return; } };

    let m = (n as f32 * avg_degree.max(1.0)) as usize;
    let graph = match random_graph_without_negative_cycles(n, m, seed, 100, 50) {
        Ok(g) => g,
        Err(e) => { eprintln!("error {e}"); return; }
    };
    let mut config = SolverConfig::from_env();
    config.strategy = mode;
    let result = match solve(&graph, &config) {
        Ok(r) => r,
        Err(e) => { eprintln!("error {e}"); return; }
    };
    let stats = result.stats();
    print!(
        "mode={mode} ran={} n={n} m={} relax={} passes={} heap_pushes={} heap_pops={} heap_max={}",
        result.strategy(), graph.edge_count(), stats.relaxations, stats.bellman_ford_passes,
        stats.heap_pushes, stats.heap_pops, stats.heap_max
    );
    if let Some(lo) = result.distances().min_finite() {
        print!(" min={} min_pairs={}", lo.distance, lo.pairs.len());
    }
    if let Some(hi) = result.distances().max_finite() {
        print!(" max={} max_pairs={}", hi.distance, hi.pairs.len());
    }
    println!();
}
