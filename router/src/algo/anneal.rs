//! Per-wire improvement loop.
//!
//! Each visit retracts the wire's current route, then either commits a fresh
//! random route (with probability `sa_prob`) or scores every candidate against
//! the grid and commits the cheapest. A worker repeats this for exactly
//! `sa_iters` sweeps over its own contiguous slice of routes.

use super::enumerate::{enumerate_routes, generate_random_route};
use super::metrics::Metrics;
use super::walker::{COMMIT, EVALUATE, RETRACT, walk_route};
use crate::grid::RoutingGrid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::ops::AddAssign;
use wireroute_common::db::core::Route;
use wireroute_common::util::config::RoutingConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnealParams {
    pub sa_prob: f64,
    pub sa_iters: usize,
    pub parallel_candidates: bool,
}

impl From<&RoutingConfig> for AnnealParams {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            sa_prob: config.sa_prob,
            sa_iters: config.sa_iters,
            parallel_candidates: config.parallel_candidates,
        }
    }
}

/// Which branch a reroute took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reroute {
    Random,
    Searched,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnnealStats {
    pub random: usize,
    pub searched: usize,
}

impl AnnealStats {
    pub fn total(&self) -> usize {
        self.random + self.searched
    }
}

impl AddAssign for AnnealStats {
    fn add_assign(&mut self, rhs: Self) {
        self.random += rhs.random;
        self.searched += rhs.searched;
    }
}

/// A candidate paired with the score it just received.
#[derive(Clone, Copy, Debug)]
pub struct ScoredRoute {
    pub route: Route,
    pub metrics: Metrics,
}

/// RNG for one worker, derived from the run seed.
pub fn worker_rng(seed: u64, worker: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(worker as u64 + 1))
}

/// Scores candidates in order and keeps the first strictly cheaper one.
pub fn best_candidate<G: RoutingGrid + ?Sized>(grid: &G, candidates: &[Route]) -> ScoredRoute {
    assert!(!candidates.is_empty(), "wire has no candidate routes");

    let mut best = (Metrics::MAX, 0);
    for (i, candidate) in candidates.iter().enumerate() {
        let metrics = walk_route(grid, candidate, EVALUATE);
        if metrics < best.0 {
            best = (metrics, i);
        }
    }
    ScoredRoute {
        route: candidates[best.1],
        metrics: best.0,
    }
}

/// Same answer as [`best_candidate`], scored on the rayon pool.
///
/// Ties are broken by candidate index so the earliest one wins, as in the
/// sequential scan.
pub fn best_candidate_par<G: RoutingGrid + ?Sized>(grid: &G, candidates: &[Route]) -> ScoredRoute {
    assert!(!candidates.is_empty(), "wire has no candidate routes");

    let (metrics, index) = candidates
        .par_iter()
        .enumerate()
        .map(|(i, candidate)| (walk_route(grid, candidate, EVALUATE), i))
        .reduce(|| (Metrics::MAX, usize::MAX), |a, b| a.min(b));

    ScoredRoute {
        route: candidates[index],
        metrics,
    }
}

/// Retracts `route` and replaces it with a random or searched one.
pub fn reroute_wire<G, R>(grid: &G, route: &mut Route, params: &AnnealParams, rng: &mut R) -> Reroute
where
    G: RoutingGrid + ?Sized,
    R: Rng + ?Sized,
{
    walk_route(grid, route, RETRACT);

    if rng.gen_bool(params.sa_prob) {
        let fresh = generate_random_route(&route.wire, rng);
        walk_route(grid, &fresh, COMMIT);
        *route = fresh;
        return Reroute::Random;
    }

    let candidates = enumerate_routes(&route.wire);
    let best = if params.parallel_candidates {
        best_candidate_par(grid, &candidates)
    } else {
        best_candidate(grid, &candidates)
    };

    walk_route(grid, &best.route, COMMIT);
    *route = best.route;
    Reroute::Searched
}

/// Runs `sa_iters` full sweeps over `routes`. Every route must already be
/// committed to `grid`.
pub fn anneal<G, R>(grid: &G, routes: &mut [Route], params: &AnnealParams, rng: &mut R) -> AnnealStats
where
    G: RoutingGrid + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = AnnealStats::default();

    for iter in 0..params.sa_iters {
        let mut sweep = AnnealStats::default();
        for route in routes.iter_mut() {
            match reroute_wire(grid, route, params, rng) {
                Reroute::Random => sweep.random += 1,
                Reroute::Searched => sweep.searched += 1,
            }
        }
        log::debug!(
            "Sweep {}: {} wires ({} random, {} searched)",
            iter,
            sweep.total(),
            sweep.random,
            sweep.searched
        );
        stats += sweep;
    }

    stats
}
