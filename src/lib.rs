//! # grid_route
//!
//! Finds a contiguous route of an exact length through the unblocked cells of a rectangular
//! grid, moving in the four cardinal directions and never visiting a cell twice. The search is
//! a [depth-first search](https://en.wikipedia.org/wiki/Depth-first_search) with backtracking,
//! started from one cell after another. Starting points are tried best connected first (most
//! unblocked neighbours), in batches. The first route found is returned; it is not meant to be
//! shortest or otherwise optimal.
//!
//! ```
//! use grid_route::{find_path, Coord, Grid};
//!
//! let mut grid = Grid::new(4, 4).unwrap();
//! grid.block_cells(&[Coord::new(1, 1), Coord::new(1, 2)]);
//! let route = find_path(&grid, 6, None).unwrap();
//! assert_eq!(route.len(), 6);
//! assert!(route.is_valid_on(&grid));
//! ```
pub mod error;
pub mod grid;
pub mod io;
pub mod route_path;
pub mod search;
pub mod selector;
pub mod solver;

use core::fmt;

pub use crate::error::{GridError, PathError, SearchError, SelectorError};
pub use crate::grid::Grid;
pub use crate::route_path::RoutePath;
pub use crate::search::PathSearch;
pub use crate::selector::StartPointSelector;

/// Number of starting points requested from the selector at a time unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// A cell position. Ordered row-major: by row, then by column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    pub const fn new(row: u16, col: u16) -> Coord {
        Coord { row, col }
    }

    /// Manhattan distance, computed without unsigned underflow.
    pub fn manhattan_distance(&self, other: &Coord) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }
}

impl From<(u16, u16)> for Coord {
    fn from((row, col): (u16, u16)) -> Self {
        Coord::new(row, col)
    }
}

impl From<Coord> for (u16, u16) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Searches `grid` for a route of `target_length` cells with the default [PathSearch], which
/// backtracks on an explicit stack.
/// `batch_size` defaults to [DEFAULT_BATCH_SIZE]. An empty route means none was found.
pub fn find_path(
    grid: &Grid,
    target_length: u32,
    batch_size: Option<usize>,
) -> Result<RoutePath, SearchError> {
    PathSearch::new()
        .with_batch_size(batch_size.unwrap_or(DEFAULT_BATCH_SIZE))
        .find_path(grid, target_length)
}
