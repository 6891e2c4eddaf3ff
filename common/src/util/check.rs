use crate::db::core::{Cost, Route, WireDB};
use rayon::prelude::*;

const MAX_REPORTED: usize = 10;

/// Verifies a finished run: route geometry first, then that the grid holds
/// exactly the footprint of the committed routes.
pub fn run(db: &WireDB, routes: &[Route], costs: &[Cost]) -> Result<(), String> {
    log::info!("Starting Route Verification...");

    if let Err(e) = check_geometry(db, routes) {
        log::error!("\x1b[31mFAIL\x1b[0m: Malformed routes detected");
        log::error!("{}", e);
        return Err(e);
    }
    log::info!("\x1b[32mPASS\x1b[0m: All routes are rectilinear and inside their wire boxes.");

    if let Err(e) = check_occupancy(db, routes, costs) {
        log::error!("\x1b[31mFAIL\x1b[0m: Cost grid disagrees with committed routes");
        log::error!("{}", e);
        return Err(e);
    }
    log::info!("\x1b[32mPASS\x1b[0m: Cost grid matches the committed routes.");

    Ok(())
}

pub fn check_geometry(db: &WireDB, routes: &[Route]) -> Result<(), String> {
    if routes.len() != db.num_wires() {
        return Err(format!(
            "{} routes for {} wires",
            routes.len(),
            db.num_wires()
        ));
    }

    let mut problems: Vec<String> = routes
        .par_iter()
        .zip(db.wires.par_iter())
        .enumerate()
        .filter_map(|(i, (route, wire))| {
            if route.wire != *wire {
                return Some(format!("route {} belongs to {:?}", i, route.wire.id));
            }
            if !route.is_rectilinear() {
                return Some(format!("route {} ({}) has a diagonal segment", i, route));
            }
            let bbox = wire.bounding_box();
            for p in [route.p1, route.p2] {
                if !bbox.contains(p) || !db.contains(p) {
                    return Some(format!(
                        "route {} bends at ({}) outside its wire box",
                        i, p
                    ));
                }
            }
            None
        })
        .collect();

    if problems.is_empty() {
        return Ok(());
    }
    let total = problems.len();
    problems.truncate(MAX_REPORTED);
    Err(format!("{} bad routes: {}", total, problems.join("; ")))
}

/// Rebuilds occupancy from scratch and compares it cell by cell.
pub fn check_occupancy(db: &WireDB, routes: &[Route], costs: &[Cost]) -> Result<(), String> {
    if costs.len() != db.num_cells() {
        return Err(format!(
            "cost grid has {} cells, expected {}",
            costs.len(),
            db.num_cells()
        ));
    }

    let expected = occupancy(db, routes);
    let mismatches: Vec<usize> = (0..costs.len())
        .into_par_iter()
        .filter(|&i| costs[i] != expected[i])
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }

    let dim_x = db.dim_x as usize;
    let detail: Vec<String> = mismatches
        .iter()
        .take(MAX_REPORTED)
        .map(|&i| {
            format!(
                "({} {}) holds {} expected {}",
                i % dim_x,
                i / dim_x,
                costs[i],
                expected[i]
            )
        })
        .collect();
    Err(format!(
        "{} mismatched cells: {}",
        mismatches.len(),
        detail.join("; ")
    ))
}

/// Cell counts produced by committing every route once on an empty grid.
pub fn occupancy(db: &WireDB, routes: &[Route]) -> Vec<Cost> {
    let mut counts = vec![0 as Cost; db.num_cells()];
    for route in routes {
        for p in route.footprint() {
            counts[db.cell_index(p)] += 1;
        }
    }
    counts
}
