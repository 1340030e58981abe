use std::thread;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;

use crate::{
    Error, Result,
    algo::{expand, optimizer},
    graph::{apsp::PathCompleter, sparse::SparseGraph},
    input::SolverInput,
    options::SolverOptions,
    route::Route,
};

const MIN_CYCLE_POINTS: usize = 3;
const START_NODE: usize = 0;

const THREAD_FALLBACK_PARALLELISM: usize = 2;
const THREAD_MIN_PARALLELISM: usize = 2;
const THREAD_RESERVED_CORES: usize = 1;

const ERR_NO_RESULTS: &str = "No results";
const ERR_INVALID_POINT: &str = "Input contains non-finite coordinates";
const ERR_ZERO_RUNS: &str = "runs must be > 0";

fn generate_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}

fn threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(THREAD_FALLBACK_PARALLELISM)
        .max(THREAD_MIN_PARALLELISM)
        - THREAD_RESERVED_CORES
}

/// Solve the sparse tour problem: complete the graph, run `options.runs`
/// independently seeded sweep searches over the dense table, keep the
/// cheapest tour, and expand it into a closed walk over real arcs.
pub fn solve_sparse_tour(input: &SolverInput, options: &SolverOptions) -> Result<Route> {
    if input.n() < MIN_CYCLE_POINTS {
        return Err(Error::invalid_input(format!(
            "Need at least {MIN_CYCLE_POINTS} points for a cycle"
        )));
    }
    if input.points.iter().any(|p| !p.is_valid()) {
        return Err(Error::invalid_input(ERR_INVALID_POINT));
    }
    if options.runs == 0 {
        return Err(Error::invalid_input(ERR_ZERO_RUNS));
    }

    let graph = SparseGraph::build(&input.points, &input.arcs)?;
    let completer = PathCompleter::complete(&graph)?;

    log::info!(
        "solver: start n={} arcs={} runs={} seed={}",
        input.n(),
        input.arcs.len(),
        options.runs,
        options.seed
    );

    let seeds = generate_seeds(options.seed, options.runs);
    let results: Vec<(Vec<usize>, f64)> = if options.runs == 1 {
        vec![run_search(&completer, 0, seeds[0], options)]
    } else {
        let parallelism = threads().min(options.runs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .build()
            .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

        pool.install(|| {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(idx, seed)| run_search(&completer, idx, seed, options))
                .collect()
        })
    };

    let run_count = results.len();
    let best = results
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| Error::other(ERR_NO_RESULTS))?;
    log::info!("solver: complete runs={run_count} best_cost={:.4}", best.1);

    let rotated = expand::rotate_to_start(&best.0, START_NODE);
    let walk = expand::expand(&rotated, &completer)?;
    Ok(Route::new(walk))
}

fn run_search(
    completer: &PathCompleter,
    idx: usize,
    seed: u64,
    options: &SolverOptions,
) -> (Vec<usize>, f64) {
    let distances = completer.complete_graph();

    let mut tour: Vec<usize> = (0..completer.n()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    tour.shuffle(&mut rng);

    log::debug!("solver.run: start idx={idx} seed={seed}");
    let cost = optimizer::optimize(&mut tour, &distances, options.sweep_mode, options.move_op);
    log::debug!("solver.run: done idx={idx} seed={seed} cost={cost:.4}");

    (tour, cost)
}
