pub mod dense;

pub use dense::DenseGrid;

use wireroute_common::db::core::Cost;
use wireroute_common::geom::point::Point;

/// Dense per-cell occupancy counters shared by routing workers.
///
/// Updates take `&self` so several workers can hold the same grid.
pub trait RoutingGrid: Sync + Send {
    fn dim_x(&self) -> u32;
    fn dim_y(&self) -> u32;

    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.dim_x() && (p.y as u32) < self.dim_y()
    }

    /// Adds `delta` to the cell at `p` and returns the value after the update.
    /// A zero delta is a plain read.
    fn update(&self, p: Point, delta: Cost) -> Cost;
    fn cost(&self, p: Point) -> Cost;

    /// Row-major copy of every cell.
    fn snapshot(&self) -> Vec<Cost>;

    fn max_cost(&self) -> Cost;
    fn total_cost(&self) -> i64;
}
