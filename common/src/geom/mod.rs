pub mod line;
pub mod point;
pub mod rect;

pub use line::line_cells;
pub use point::Point;
pub use rect::Rect;
