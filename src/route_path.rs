use crate::error::PathError;
use crate::grid::Grid;
use crate::Coord;
use core::fmt;
use itertools::Itertools;

/// An ordered sequence of grid coordinates. During a search it doubles as the stack of the
/// depth-first traversal: cells are appended at the tail and removed from it when backtracking.
/// As a search result an empty path means no route was found.
///
/// Adjacency of consecutive cells is not enforced on mutation; check it with
/// [is_contiguous](Self::is_contiguous).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePath {
    coords: Vec<Coord>,
}

impl RoutePath {
    pub fn new() -> RoutePath {
        RoutePath::default()
    }

    pub fn with_capacity(capacity: usize) -> RoutePath {
        RoutePath {
            coords: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, row: u16, col: u16) {
        self.coords.push(Coord::new(row, col));
    }

    pub fn push(&mut self, coord: Coord) {
        self.coords.push(coord);
    }

    /// Removes and returns the tail coordinate.
    pub fn pop_back(&mut self) -> Result<Coord, PathError> {
        self.coords.pop().ok_or(PathError::EmptyPath)
    }

    /// Returns the tail coordinate without removing it.
    pub fn peek_back(&self) -> Result<Coord, PathError> {
        self.coords.last().copied().ok_or(PathError::EmptyPath)
    }

    /// Checks that every consecutive pair of coordinates is 4-adjacent, i.e. has a Manhattan
    /// distance of exactly one. Paths with fewer than two coordinates are contiguous.
    pub fn is_contiguous(&self) -> bool {
        self.coords
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.manhattan_distance(b) == 1)
    }

    /// Checks that no coordinate occurs twice.
    pub fn is_simple(&self) -> bool {
        self.coords.iter().all_unique()
    }

    /// A valid route on `grid` is contiguous, simple and only visits unblocked cells.
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        self.is_contiguous() && self.is_simple() && self.coords.iter().all(|c| grid.is_open(*c))
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn clear(&mut self) {
        self.coords.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }
}

impl<'a> IntoIterator for &'a RoutePath {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

impl IntoIterator for RoutePath {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

impl FromIterator<Coord> for RoutePath {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        RoutePath {
            coords: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.coords.iter().join(" -> "))
    }
}
