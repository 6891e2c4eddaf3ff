//! Message-passing run mode.
//!
//! The coordinator builds the initial assignment and grid, then hands every
//! worker its own copy of both. Workers anneal only their range against the
//! private copy and never see each other's moves. Once all workers finish,
//! the coordinator gathers the owned ranges and rebuilds one grid from them.

use crate::RoutingOutcome;
use crate::algo::anneal::{AnnealParams, AnnealStats, anneal, worker_rng};
use crate::algo::walker::{COMMIT, EVALUATE, walk_all_routes};
use crate::grid::{DenseGrid, RoutingGrid};
use crate::partition::partition;
use rayon::prelude::*;
use std::ops::Range;
use wireroute_common::db::core::{Route, WireDB};
use wireroute_common::util::config::RoutingConfig;
use wireroute_common::util::profiler::ScopedTimer;

/// What a worker sends back: its final routes for the range it owns.
struct WorkerResult {
    range: Range<usize>,
    routes: Vec<Route>,
    stats: AnnealStats,
}

pub fn run(db: &WireDB, config: &RoutingConfig, seed: u64) -> Result<RoutingOutcome, String> {
    let params = AnnealParams::from(config);

    let (grid, routes, partitions) = {
        let _t = ScopedTimer::new("Initialization");
        let routes = crate::initial_routes(db, seed);
        let grid = DenseGrid::new(db.dim_x, db.dim_y);
        let initial = walk_all_routes(&grid, &routes, COMMIT);
        log::info!("Initial routes: {}", initial);
        let partitions = partition(&db.computation_costs(), config.num_workers);
        (grid, routes, partitions)
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(partitions.len().max(1))
        .build()
        .map_err(|e| format!("failed to build worker pool: {}", e))?;

    let results: Vec<WorkerResult> = {
        let _t = ScopedTimer::new("Computation");
        pool.install(|| {
            partitions
                .par_iter()
                .enumerate()
                .map(|(worker, range)| {
                    let local = grid.clone();
                    let mut local_routes = routes.clone();
                    let mut rng = worker_rng(seed, worker);
                    let stats = anneal(
                        &local,
                        &mut local_routes[range.clone()],
                        &params,
                        &mut rng,
                    );

                    let view = walk_all_routes(&local, &local_routes, EVALUATE);
                    log::debug!("Worker {} local view: {}", worker, view);

                    WorkerResult {
                        range: range.clone(),
                        routes: local_routes[range.clone()].to_vec(),
                        stats,
                    }
                })
                .collect()
        })
    };

    let (routes, stats) = gather(routes, results);
    log::info!(
        "Rerouted {} times ({} random, {} searched)",
        stats.total(),
        stats.random,
        stats.searched
    );

    let merged = DenseGrid::new(db.dim_x, db.dim_y);
    walk_all_routes(&merged, &routes, COMMIT);
    let metrics = walk_all_routes(&merged, &routes, EVALUATE);

    Ok(RoutingOutcome {
        costs: merged.snapshot(),
        routes,
        metrics,
        partitions,
        seed,
    })
}

/// Overwrites each worker's owned range with the routes it reported.
fn gather(mut routes: Vec<Route>, results: Vec<WorkerResult>) -> (Vec<Route>, AnnealStats) {
    let mut stats = AnnealStats::default();
    for result in results {
        routes[result.range].copy_from_slice(&result.routes);
        stats += result.stats;
    }
    (routes, stats)
}
