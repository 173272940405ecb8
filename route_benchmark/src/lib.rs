use csv::{ReaderBuilder, Terminator, WriterBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Seed used for every scenario so that runs are reproducible.
pub const SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: u16,
    pub col: u16,
}

/// A grid size with an obstacle density and the route length to look for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub rows: u16,
    pub cols: u16,
    pub density: f64,
    pub path_length: u32,
}

impl Scenario {
    pub const fn new(name: &'static str, rows: u16, cols: u16, density: f64) -> Scenario {
        // Routes over 1% of the cells keep the larger scenarios tractable.
        let path_length = (rows as u32 * cols as u32) / 100;
        Scenario {
            name,
            rows,
            cols,
            density,
            path_length,
        }
    }

    /// Small enough for tests.
    pub fn tiny() -> Scenario {
        Scenario {
            path_length: 24,
            ..Scenario::new("tiny", 16, 16, 0.2)
        }
    }
    pub fn small() -> Scenario {
        Scenario::new("small", 100, 100, 0.45)
    }
    pub fn medium() -> Scenario {
        Scenario::new("medium", 200, 200, 0.45)
    }
    pub fn large() -> Scenario {
        Scenario::new("large", 500, 500, 0.45)
    }

    pub fn blocked_cells(&self) -> Vec<(u16, u16)> {
        random_blocked_cells(self.rows, self.cols, self.density, SEED)
    }
}

pub fn get_scenario(name: &str) -> Option<Scenario> {
    match name {
        "tiny" => Some(Scenario::tiny()),
        "small" => Some(Scenario::small()),
        "medium" => Some(Scenario::medium()),
        "large" => Some(Scenario::large()),
        _ => None,
    }
}

/// Draws `density * rows * cols` distinct cells, sorted row-major.
pub fn random_blocked_cells(rows: u16, cols: u16, density: f64, seed: u64) -> Vec<(u16, u16)> {
    let total = rows as usize * cols as usize;
    if total == 0 {
        return Vec::new();
    }
    let target = (total as f64 * density.clamp(0.0, 1.0)) as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut blocked = BTreeSet::new();
    while blocked.len() < target {
        blocked.insert((rng.gen_range(0..rows), rng.gen_range(0..cols)));
    }
    blocked.into_iter().collect()
}

/// Writes blocked cells in the blocked-cells file format: a commented header followed by one
/// `row,col` record per line.
pub fn write_blocked_cells<W: Write>(
    mut writer: W,
    rows: u16,
    cols: u16,
    cells: &[(u16, u16)],
) -> csv::Result<()> {
    writeln!(writer, "# Blocked cells coordinates for pathfinding tests")?;
    writeln!(writer, "# Format: row,col (0-indexed)")?;
    writeln!(writer, "# Matrix size: {}x{}", rows, cols)?;
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for &(row, col) in cells {
        csv_writer.serialize(CellRecord { row, col })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_blocked_cells<R: Read>(reader: R) -> csv::Result<Vec<(u16, u16)>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(reader);
    csv_reader
        .deserialize()
        .map(|record| record.map(|r: CellRecord| (r.row, r.col)))
        .collect()
}
