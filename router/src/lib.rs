pub mod algo;
pub mod distributed_router;
pub mod grid;
pub mod partition;
pub mod shared_router;

use algo::Metrics;
use algo::enumerate::generate_random_route;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};
use wireroute_common::db::core::{Cost, Route, WireDB};
use wireroute_common::util::config::{RouteMode, RoutingConfig};

/// Final state of a routing run.
#[derive(Debug, Clone)]
pub struct RoutingOutcome {
    /// One committed route per wire, in wire order.
    pub routes: Vec<Route>,
    /// Row-major occupancy consistent with `routes`.
    pub costs: Vec<Cost>,
    /// Aggregate over every route read against `costs`.
    pub metrics: Metrics,
    pub partitions: Vec<Range<usize>>,
    pub seed: u64,
}

pub fn route(db: &WireDB, config: &RoutingConfig) -> Result<RoutingOutcome, String> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(wall_clock_seed);
    if config.num_workers > db.num_wires().max(1) {
        log::warn!(
            "{} workers requested for {} wires; extra workers stay idle.",
            config.num_workers,
            db.num_wires()
        );
    }

    log::info!(
        "Routing {} wires on {}x{} ({} mode, {} workers, sa_prob {}, sa_iters {}, seed {})",
        db.num_wires(),
        db.dim_x,
        db.dim_y,
        config.mode,
        config.num_workers,
        config.sa_prob,
        config.sa_iters,
        seed
    );

    let outcome = match config.mode {
        RouteMode::Shared => shared_router::run(db, config, seed)?,
        RouteMode::Distributed => distributed_router::run(db, config, seed)?,
    };

    log::info!("Final routes: {}", outcome.metrics);
    Ok(outcome)
}

/// Random starting route for every wire, drawn in wire order from `seed`.
pub fn initial_routes(db: &WireDB, seed: u64) -> Vec<Route> {
    let mut rng = StdRng::seed_from_u64(seed);
    db.wires
        .iter()
        .map(|w| generate_random_route(w, &mut rng))
        .collect()
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
