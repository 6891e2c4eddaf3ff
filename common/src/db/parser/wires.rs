//! Reader for the plain-text wire list.
//!
//! Layout is whitespace separated integers:
//!
//! ```text
//! dim_x dim_y
//! num_of_wires
//! sx sy ex ey     (one line per wire)
//! ```

use crate::db::core::WireDB;
use crate::geom::point::Point;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read wire file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unexpected end of input while reading {field}")]
    MissingField { field: String },

    #[error("invalid integer '{token}' for {field}")]
    InvalidNumber { field: String, token: String },

    #[error("grid dimensions must be positive, got {dim_x}x{dim_y}")]
    InvalidDimensions { dim_x: i64, dim_y: i64 },

    #[error("wire {wire}: point ({x}, {y}) lies outside the {dim_x}x{dim_y} grid")]
    OutOfBounds {
        wire: usize,
        x: i32,
        y: i32,
        dim_x: u32,
        dim_y: u32,
    },

    #[error("header declares {declared} wires but more data follows the last one")]
    WireCountMismatch { declared: usize },
}

pub fn parse<P: AsRef<Path>>(filename: P) -> Result<WireDB, ParseError> {
    let path = filename.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let db = parse_str(&text)?;
    log::info!(
        "Loaded {} wires on a {}x{} grid from {:?}",
        db.num_wires(),
        db.dim_x,
        db.dim_y,
        path
    );
    Ok(db)
}

pub fn parse_str(text: &str) -> Result<WireDB, ParseError> {
    let mut tokens = Tokens {
        inner: text.split_whitespace(),
    };

    let dim_x = tokens.next_i64("dim_x")?;
    let dim_y = tokens.next_i64("dim_y")?;
    if dim_x <= 0 || dim_y <= 0 || dim_x > u32::MAX as i64 || dim_y > u32::MAX as i64 {
        return Err(ParseError::InvalidDimensions { dim_x, dim_y });
    }

    let num_of_wires = tokens.next_i64("num_of_wires")?;
    let num_of_wires = usize::try_from(num_of_wires).map_err(|_| ParseError::InvalidNumber {
        field: "num_of_wires".to_string(),
        token: num_of_wires.to_string(),
    })?;

    let mut db = WireDB::new(dim_x as u32, dim_y as u32);
    // Each wire takes at least eight bytes of text.
    db.wires.reserve(num_of_wires.min(text.len() / 8));

    for i in 0..num_of_wires {
        let mut coord = |name: &str| tokens.next_i32(&format!("wire {} {}", i, name));
        let start = Point::new(coord("start.x")?, coord("start.y")?);
        let end = Point::new(coord("end.x")?, coord("end.y")?);

        for p in [start, end] {
            if !db.contains(p) {
                return Err(ParseError::OutOfBounds {
                    wire: i,
                    x: p.x,
                    y: p.y,
                    dim_x: db.dim_x,
                    dim_y: db.dim_y,
                });
            }
        }
        db.add_wire(start, end);
    }

    if tokens.inner.next().is_some() {
        return Err(ParseError::WireCountMismatch {
            declared: num_of_wires,
        });
    }

    Ok(db)
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl Tokens<'_> {
    fn next_token(&mut self, field: &str) -> Result<&str, ParseError> {
        self.inner.next().ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    fn next_i64(&mut self, field: &str) -> Result<i64, ParseError> {
        let token = self.next_token(field)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            field: field.to_string(),
            token: token.to_string(),
        })
    }

    fn next_i32(&mut self, field: &str) -> Result<i32, ParseError> {
        let token = self.next_token(field)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            field: field.to_string(),
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_header_and_wires() {
        let db = parse_str("5 4\n2\n0 0 4 3\n1 1 1 2\n").unwrap();
        assert_eq!(db.dim_x, 5);
        assert_eq!(db.dim_y, 4);
        assert_eq!(db.num_wires(), 2);
        assert_eq!(db.wires[0].end, Point::new(4, 3));
        assert_eq!(db.wires[1].id.index(), 1);
    }

    #[test]
    fn tolerates_irregular_whitespace() {
        let db = parse_str("  3 3 1\n\t0 0\n 2 2   ").unwrap();
        assert_eq!(db.num_wires(), 1);
        assert_eq!(db.wires[0].start, Point::new(0, 0));
    }

    #[test]
    fn empty_wire_list_is_valid() {
        let db = parse_str("10 10\n0\n").unwrap();
        assert_eq!(db.num_wires(), 0);
    }

    #[test]
    fn truncated_file_reports_missing_field() {
        let err = parse_str("5 5\n2\n0 0 1 1\n0 0").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { .. }));
        assert!(err.to_string().contains("wire 1 end.x"));
    }

    #[test]
    fn oversized_wire_count_reports_missing_field() {
        let err = parse_str("2 2\n1000000000000000000\n0 0 1 1\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { .. }));
        assert!(err.to_string().contains("wire 1 start.x"));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = parse_str("5 x\n").unwrap_err();
        match err {
            ParseError::InvalidNumber { field, token } => {
                assert_eq!(field, "dim_y");
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let err = parse_str("0 5\n0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidDimensions { dim_x: 0, dim_y: 5 }
        ));
    }

    #[test]
    fn out_of_grid_wire_is_rejected() {
        let err = parse_str("4 4\n1\n0 0 4 1\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfBounds { wire: 0, x: 4, .. }));
    }

    #[test]
    fn trailing_data_is_rejected() {
        let err = parse_str("4 4\n1\n0 0 1 1\n2 2 3 3\n").unwrap_err();
        assert!(matches!(err, ParseError::WireCountMismatch { declared: 1 }));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "8 8\n1\n7 0 0 7").unwrap();
        let db = parse(file.path()).unwrap();
        assert_eq!(db.wires[0].start, Point::new(7, 0));
        assert_eq!(db.wires[0].end, Point::new(0, 7));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }
}
