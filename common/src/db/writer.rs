use crate::db::core::{Cost, Route, WireDB};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the occupancy grid: a `dim_x dim_y` header, then one line per row.
pub fn write_costs<P: AsRef<Path>>(
    filename: P,
    dim_x: u32,
    dim_y: u32,
    costs: &[Cost],
) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write_costs_to(&mut file, dim_x, dim_y, costs)?;
    file.flush()
}

pub fn write_costs_to<W: Write>(
    out: &mut W,
    dim_x: u32,
    dim_y: u32,
    costs: &[Cost],
) -> std::io::Result<()> {
    let row_len = dim_x as usize;
    if costs.len() != row_len * dim_y as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "cost grid has {} cells, expected {}x{}",
                costs.len(),
                dim_x,
                dim_y
            ),
        ));
    }

    writeln!(out, "{} {}", dim_x, dim_y)?;
    for row in costs.chunks(row_len.max(1)) {
        for (i, c) in row.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{}", c)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes one line per wire with the route's turn points.
pub fn write_routes<P: AsRef<Path>>(
    filename: P,
    db: &WireDB,
    routes: &[Route],
) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write_routes_to(&mut file, db, routes)?;
    file.flush()
}

pub fn write_routes_to<W: Write>(
    out: &mut W,
    db: &WireDB,
    routes: &[Route],
) -> std::io::Result<()> {
    writeln!(out, "{} {}", db.dim_x, db.dim_y)?;
    writeln!(out, "{}", routes.len())?;
    for route in routes {
        writeln!(out, "{}", route)?;
    }
    Ok(())
}
