use crate::db::core::{Cost, Route, WireDB};
use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

/// Renders the occupancy grid as a heatmap with every route traced on top.
///
/// Each cell is drawn as a square of `size / max(dim_x, dim_y)` pixels, at
/// least one, so grids larger than `size` give images larger than `size`.
pub fn draw_congestion<P: AsRef<Path>>(
    db: &WireDB,
    costs: &[Cost],
    routes: &[Route],
    filename: P,
    size: u32,
) -> ImageResult<()> {
    let longest = db.dim_x.max(db.dim_y).max(1);
    let scale = (size / longest).max(1);
    let w = db.dim_x * scale;
    let h = db.dim_y * scale;
    let mut img = RgbImage::from_pixel(w.max(1), h.max(1), Rgb([20, 20, 20]));

    let max_cost = costs.iter().copied().max().unwrap_or(0).max(1);
    let dim_x = db.dim_x as usize;

    for (i, &c) in costs.iter().enumerate() {
        if c <= 0 {
            continue;
        }
        let x = (i % dim_x) as u32 * scale;
        let y = (i / dim_x) as u32 * scale;
        let rect = ImageRect::at(x as i32, y as i32).of_size(scale, scale);
        draw_filled_rect_mut(&mut img, rect, heat_color(c, max_cost));
    }

    if scale >= 4 {
        let half = scale as f32 / 2.0;
        let center = |p: crate::geom::point::Point| {
            (p.x as f32 * scale as f32 + half, p.y as f32 * scale as f32 + half)
        };
        let trace = Rgb([230, 230, 230]);
        for route in routes {
            let points = route.turn_points();
            for pair in points.windows(2) {
                draw_line_segment_mut(&mut img, center(pair[0]), center(pair[1]), trace);
            }
        }
    }

    img.save(filename.as_ref())
}

/// Blue for lightly used cells through red at the busiest cell.
fn heat_color(cost: Cost, max_cost: Cost) -> Rgb<u8> {
    let t = (cost as f32 / max_cost as f32).clamp(0.0, 1.0);
    let r = (255.0 * t) as u8;
    let g = (80.0 * (1.0 - (2.0 * t - 1.0).abs())) as u8;
    let b = (255.0 * (1.0 - t)) as u8;
    Rgb([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point::Point;
    use crate::util::check::occupancy;

    #[test]
    fn heat_scale_endpoints() {
        assert_eq!(heat_color(4, 4), Rgb([255, 0, 0]));
        assert_eq!(heat_color(0, 4), Rgb([0, 0, 255]));
    }

    #[test]
    fn writes_png() {
        let mut db = WireDB::new(8, 4);
        db.add_wire(Point::new(0, 0), Point::new(7, 3));
        let routes = vec![Route::new(db.wires[0], Point::new(0, 2), Point::new(7, 2))];
        let costs = occupancy(&db, &routes);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.png");
        draw_congestion(&db, &costs, &routes, &path, 64).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (64, 32));
    }
}
