//! Reading lists of blocked cells.
//!
//! A single cell is written `row,col` or `{row,col}`. Blocked-cell files hold one cell per line;
//! empty lines and lines starting with `#` are ignored:
//!
//! ```text
//! # Blocked cells for a 3x3 grid
//! 0,1
//! 1,0
//! 2,2
//! ```
use crate::Coord;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::warn;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid cell '{input}', expected row,col or {{row,col}}")]
    InvalidCell { input: String },
}

/// Parses a single cell in the form `row,col` or `{row,col}`.
pub fn parse_cell(input: &str) -> Result<Coord, ParseError> {
    let invalid = || ParseError::InvalidCell {
        input: input.to_owned(),
    };
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);
    let (row, col) = inner.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse::<u16>().map_err(|_| invalid())?;
    let col = col.trim().parse::<u16>().map_err(|_| invalid())?;
    Ok(Coord::new(row, col))
}

/// Parses blocked cells line by line. Malformed lines are skipped with a warning, duplicates
/// are dropped and the remaining cells keep the order of their first appearance.
pub fn parse_blocked_cells<R: BufRead>(reader: R) -> Result<Vec<Coord>, ParseError> {
    let mut cells = FxIndexSet::default();
    for (line_ix, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_cell(line) {
            Ok(cell) => {
                cells.insert(cell);
            }
            Err(e) => warn!("Skipping line {}: {}", line_ix + 1, e),
        }
    }
    Ok(cells.into_iter().collect())
}

pub fn read_blocked_cells_file<P: AsRef<Path>>(path: P) -> Result<Vec<Coord>, ParseError> {
    let file = File::open(path)?;
    parse_blocked_cells(BufReader::new(file))
}
