use crate::RoutingOutcome;
use crate::algo::anneal::{AnnealParams, AnnealStats, anneal, worker_rng};
use crate::algo::walker::{COMMIT, EVALUATE, walk_all_routes};
use crate::grid::{DenseGrid, RoutingGrid};
use crate::partition::{partition, split_mut};
use rayon::prelude::*;
use wireroute_common::db::core::WireDB;
use wireroute_common::util::config::RoutingConfig;
use wireroute_common::util::profiler::ScopedTimer;

/// Every worker anneals its own slice of routes against one shared grid.
///
/// Workers overlap on cells freely; the atomic counters keep the final grid
/// exact while the costs a worker reads mid-sweep may lag the others.
pub fn run(db: &WireDB, config: &RoutingConfig, seed: u64) -> Result<RoutingOutcome, String> {
    let params = AnnealParams::from(config);

    let (grid, mut routes, partitions) = {
        let _t = ScopedTimer::new("Initialization");
        let routes = crate::initial_routes(db, seed);
        let grid = DenseGrid::new(db.dim_x, db.dim_y);
        let initial = walk_all_routes(&grid, &routes, COMMIT);
        log::info!("Initial routes: {}", initial);
        let partitions = partition(&db.computation_costs(), config.num_workers);
        (grid, routes, partitions)
    };

    for (i, r) in partitions.iter().enumerate() {
        log::debug!("Worker {} owns wires [{}, {})", i, r.start, r.end);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(partitions.len().max(1))
        .build()
        .map_err(|e| format!("failed to build worker pool: {}", e))?;

    let stats = {
        let _t = ScopedTimer::new("Computation");
        let chunks = split_mut(&mut routes, &partitions);
        pool.install(|| {
            chunks
                .into_par_iter()
                .enumerate()
                .map(|(worker, chunk)| {
                    let mut rng = worker_rng(seed, worker);
                    anneal(&grid, chunk, &params, &mut rng)
                })
                .reduce(AnnealStats::default, |mut a, b| {
                    a += b;
                    a
                })
        })
    };

    log::info!(
        "Rerouted {} times ({} random, {} searched)",
        stats.total(),
        stats.random,
        stats.searched
    );

    let metrics = walk_all_routes(&grid, &routes, EVALUATE);
    log::debug!("Grid peak {} total {}", grid.max_cost(), grid.total_cost());

    Ok(RoutingOutcome {
        costs: grid.snapshot(),
        routes,
        metrics,
        partitions,
        seed,
    })
}
