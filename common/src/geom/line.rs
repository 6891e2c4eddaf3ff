use super::point::Point;
use std::iter::FusedIterator;

/// Cells visited when walking from `from` towards `to`, excluding `to`.
///
/// Panics unless the two points share a row or a column.
pub fn line_cells(from: Point, to: Point) -> LineCells {
    assert!(
        from.is_aligned_with(to),
        "segment ({}) -> ({}) is not axis-aligned",
        from,
        to
    );
    LineCells {
        cur: from,
        end: to,
        step_x: (to.x - from.x).signum(),
        step_y: (to.y - from.y).signum(),
    }
}

#[derive(Clone, Debug)]
pub struct LineCells {
    cur: Point,
    end: Point,
    step_x: i32,
    step_y: i32,
}

impl Iterator for LineCells {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur == self.end {
            return None;
        }
        let p = self.cur;
        self.cur.x += self.step_x;
        self.cur.y += self.step_y;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cur.manhattan(self.end) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineCells {}
impl FusedIterator for LineCells {}
