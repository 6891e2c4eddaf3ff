use super::point::Point;

/// Inclusive axis-aligned box over grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Smallest box containing both corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_in_any_order() {
        let r = Rect::from_corners(Point::new(4, 1), Point::new(0, 3));
        assert_eq!(r.min, Point::new(0, 1));
        assert_eq!(r.max, Point::new(4, 3));
    }

    #[test]
    fn containment_is_inclusive() {
        let r = Rect::from_corners(Point::new(0, 0), Point::new(2, 2));
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 2)));
        assert!(!r.contains(Point::new(3, 2)));
    }
}
