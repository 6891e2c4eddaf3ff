use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Writes a random wire file. Each wire spans at most `max_span` cells per axis.
pub fn generate_random_wires(
    filename: &str,
    dim_x: u32,
    dim_y: u32,
    num_wires: usize,
    max_span: u32,
) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    let mut rng = rand::thread_rng();

    let dim_x = dim_x.max(1) as i32;
    let dim_y = dim_y.max(1) as i32;
    let span = max_span.max(1) as i32;

    log::info!(
        "Generating Benchmark: {} wires on a {}x{} grid (max span {})",
        num_wires,
        dim_x,
        dim_y,
        span
    );

    writeln!(file, "{} {}", dim_x, dim_y)?;
    writeln!(file, "{}", num_wires)?;

    for _ in 0..num_wires {
        let sx = rng.gen_range(0..dim_x);
        let sy = rng.gen_range(0..dim_y);
        let ex = (sx + rng.gen_range(-span..=span)).clamp(0, dim_x - 1);
        let ey = (sy + rng.gen_range(-span..=span)).clamp(0, dim_y - 1);
        writeln!(file, "{} {} {} {}", sx, sy, ex, ey)?;
    }

    file.flush()
}
