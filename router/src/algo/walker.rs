use super::metrics::Metrics;
use crate::grid::RoutingGrid;
use wireroute_common::db::core::{Cost, Route};
use wireroute_common::geom::line::line_cells;
use wireroute_common::geom::point::Point;

/// Commits a route's footprint.
pub const COMMIT: Cost = 1;
/// Retracts a previously committed footprint.
pub const RETRACT: Cost = -1;
/// Reads the footprint without touching the grid.
pub const EVALUATE: Cost = 0;

/// Applies `delta` to every cell from `p1` up to, but excluding, `p2`.
///
/// Panics when the points do not share a row or column.
pub fn walk_line<G: RoutingGrid + ?Sized>(grid: &G, p1: Point, p2: Point, delta: Cost) -> Metrics {
    let mut metrics = Metrics::default();
    for cell in line_cells(p1, p2) {
        metrics.record(grid.update(cell, delta));
    }
    metrics
}

/// Walks all three segments and the terminal cell.
///
/// Cells visited twice by overlapping segments are counted twice.
pub fn walk_route<G: RoutingGrid + ?Sized>(grid: &G, route: &Route, delta: Cost) -> Metrics {
    let mut metrics = Metrics::default();
    for (from, to) in route.segments() {
        metrics.merge(walk_line(grid, from, to, delta));
    }
    metrics.record(grid.update(route.wire.end, delta));
    metrics
}

pub fn walk_all_routes<G: RoutingGrid + ?Sized>(grid: &G, routes: &[Route], delta: Cost) -> Metrics {
    let mut metrics = Metrics::default();
    for route in routes {
        metrics.merge(walk_route(grid, route, delta));
    }
    metrics
}
