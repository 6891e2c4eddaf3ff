use rand::Rng;
use wireroute_common::db::core::{Route, Wire};
use wireroute_common::geom::point::Point;

/// Picks one of the two L/Z shapes with a uniformly random bend position.
///
/// A coin flip chooses whether the route leaves `start` vertically or
/// horizontally; the bend lands at `start + trunc(ratio * delta)` on that axis.
pub fn generate_random_route<R: Rng + ?Sized>(wire: &Wire, rng: &mut R) -> Route {
    let dx = wire.end.x - wire.start.x;
    let dy = wire.end.y - wire.start.y;

    let vertical_first = rng.gen_bool(0.5);
    let ratio: f64 = rng.gen_range(0.0..1.0);

    if vertical_first {
        let y = wire.start.y + (ratio * dy as f64) as i32;
        Route::new(*wire, Point::new(wire.start.x, y), Point::new(wire.end.x, y))
    } else {
        let x = wire.start.x + (ratio * dx as f64) as i32;
        Route::new(*wire, Point::new(x, wire.start.y), Point::new(x, wire.end.y))
    }
}

/// Every single-bend candidate for `wire`: one per row offset, then one per
/// column offset, walking from `start` towards `end`.
///
/// Wires whose terminals share a row or column have only the straight route.
pub fn enumerate_routes(wire: &Wire) -> Vec<Route> {
    if wire.is_degenerate() {
        return vec![Route::straight(*wire)];
    }

    let (start, end) = (wire.start, wire.end);
    let mut routes = Vec::with_capacity(wire.computation_cost() as usize);

    let step_y = (end.y - start.y).signum();
    let mut y = start.y;
    while y != end.y {
        routes.push(Route::new(
            *wire,
            Point::new(start.x, y),
            Point::new(end.x, y),
        ));
        y += step_y;
    }

    let step_x = (end.x - start.x).signum();
    let mut x = start.x;
    while x != end.x {
        routes.push(Route::new(
            *wire,
            Point::new(x, start.y),
            Point::new(x, end.y),
        ));
        x += step_x;
    }

    routes
}
