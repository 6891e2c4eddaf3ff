use super::RoutingGrid;
use std::sync::atomic::{AtomicI32, Ordering};
use wireroute_common::db::core::Cost;
use wireroute_common::geom::point::Point;

/// Row-major grid of atomic counters.
///
/// Concurrent workers may touch the same cell; atomic adds keep the final
/// counts exact while reads taken mid-sweep are only approximate.
pub struct DenseGrid {
    dim_x: u32,
    dim_y: u32,
    cells: Vec<AtomicI32>,
}

impl DenseGrid {
    pub fn new(dim_x: u32, dim_y: u32) -> Self {
        let size = (dim_x as usize) * (dim_y as usize);

        if size > 500_000_000 {
            log::warn!(
                "Allocating large DenseGrid: {} cells. Ensure sufficient RAM.",
                size
            );
        }

        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || AtomicI32::new(0));
        Self {
            dim_x,
            dim_y,
            cells,
        }
    }

    /// Builds a grid from a row-major snapshot.
    pub fn from_costs(dim_x: u32, dim_y: u32, costs: &[Cost]) -> Self {
        assert_eq!(
            costs.len(),
            (dim_x as usize) * (dim_y as usize),
            "snapshot does not match a {}x{} grid",
            dim_x,
            dim_y
        );
        Self {
            dim_x,
            dim_y,
            cells: costs.iter().map(|&c| AtomicI32::new(c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    fn index(&self, p: Point) -> usize {
        assert!(
            self.contains(p),
            "cell ({}) is outside the {}x{} grid",
            p,
            self.dim_x,
            self.dim_y
        );
        (p.y as usize) * (self.dim_x as usize) + (p.x as usize)
    }
}

impl Clone for DenseGrid {
    fn clone(&self) -> Self {
        Self::from_costs(self.dim_x, self.dim_y, &self.snapshot())
    }
}

impl RoutingGrid for DenseGrid {
    fn dim_x(&self) -> u32 {
        self.dim_x
    }
    fn dim_y(&self) -> u32 {
        self.dim_y
    }

    #[inline(always)]
    fn update(&self, p: Point, delta: Cost) -> Cost {
        let cell = &self.cells[self.index(p)];
        if delta == 0 {
            return cell.load(Ordering::Relaxed);
        }
        cell.fetch_add(delta, Ordering::Relaxed) + delta
    }

    #[inline(always)]
    fn cost(&self, p: Point) -> Cost {
        self.cells[self.index(p)].load(Ordering::Relaxed)
    }

    fn snapshot(&self) -> Vec<Cost> {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }

    fn max_cost(&self) -> Cost {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .max()
            .unwrap_or(0)
    }

    fn total_cost(&self) -> i64 {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed) as i64)
            .sum()
    }
}
