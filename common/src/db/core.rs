use crate::db::indices::WireId;
use crate::geom::line::line_cells;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use std::fmt;
use std::iter;

/// Occupancy count stored in one grid cell.
pub type Cost = i32;

/// A fixed pair of terminals that has to be connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    pub id: WireId,
    pub start: Point,
    pub end: Point,
}

impl Wire {
    pub fn new(id: WireId, start: Point, end: Point) -> Self {
        Self { id, start, end }
    }

    /// Work estimate used for load balancing. Never changes after load.
    #[inline]
    pub fn computation_cost(&self) -> u64 {
        self.start.manhattan(self.end)
    }

    /// Start and end share a row or a column (or coincide).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start.is_aligned_with(self.end)
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }
}

/// Three-segment orthogonal path `start -> p1 -> p2 -> end`.
///
/// Segments collapse when consecutive points coincide. The route is plain
/// geometry; its cost is always recomputed against the live grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Route {
    pub wire: Wire,
    pub p1: Point,
    pub p2: Point,
}

impl Route {
    pub fn new(wire: Wire, p1: Point, p2: Point) -> Self {
        Self { wire, p1, p2 }
    }

    /// Direct path for a wire whose terminals share a row or column.
    pub fn straight(wire: Wire) -> Self {
        Self {
            wire,
            p1: wire.start,
            p2: wire.start,
        }
    }

    pub fn segments(&self) -> [(Point, Point); 3] {
        [
            (self.wire.start, self.p1),
            (self.p1, self.p2),
            (self.p2, self.wire.end),
        ]
    }

    pub fn is_rectilinear(&self) -> bool {
        self.segments().iter().all(|(a, b)| a.is_aligned_with(*b))
    }

    /// Turn points from start to end with repeated consecutive points removed.
    pub fn turn_points(&self) -> Vec<Point> {
        let mut points = vec![self.wire.start, self.p1, self.p2, self.wire.end];
        points.dedup();
        points
    }

    /// Every grid read made while walking this route, in walk order.
    ///
    /// Cells shared by overlapping segments appear once per visit.
    pub fn footprint(&self) -> impl Iterator<Item = Point> + use<> {
        let [s0, s1, s2] = self.segments();
        line_cells(s0.0, s0.1)
            .chain(line_cells(s1.0, s1.1))
            .chain(line_cells(s2.0, s2.1))
            .chain(iter::once(self.wire.end))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points = self.turn_points();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Grid dimensions plus the immutable wire list.
#[derive(Clone, Debug, Default)]
pub struct WireDB {
    pub dim_x: u32,
    pub dim_y: u32,
    pub wires: Vec<Wire>,
}

impl WireDB {
    pub fn new(dim_x: u32, dim_y: u32) -> Self {
        Self {
            dim_x,
            dim_y,
            wires: Vec::new(),
        }
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn num_cells(&self) -> usize {
        self.dim_x as usize * self.dim_y as usize
    }

    pub fn add_wire(&mut self, start: Point, end: Point) -> WireId {
        let id = WireId::new(self.wires.len());
        self.wires.push(Wire::new(id, start, end));
        id
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.dim_x && (p.y as u32) < self.dim_y
    }

    /// Row-major cell index. Caller guarantees `contains(p)`.
    #[inline]
    pub fn cell_index(&self, p: Point) -> usize {
        p.y as usize * self.dim_x as usize + p.x as usize
    }

    pub fn computation_costs(&self) -> Vec<u64> {
        self.wires.iter().map(Wire::computation_cost).collect()
    }
}
