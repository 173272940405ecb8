use crate::{grid::Grid, route_path::RoutePath, Coord};
use fixedbitset::FixedBitSet;

pub mod recursive;
pub mod stack;

/// Depth-first growth of a route with backtracking.
///
/// Implementations extend `path` from its tail one cardinal step at a time, trying the
/// directions up, right, down, left in that order and only stepping onto cells that are
/// unblocked and not yet set in `visited`. A step that cannot be completed to `target_length`
/// cells is undone (tail removed, visited bit cleared) before the next direction is tried.
/// Implementations must explore in exactly this order so that they all return the same route.
pub trait RouteSolver {
    /// Returns [true] as soon as `path` holds `target_length` cells. On [false], `path` and
    /// `visited` are back in the state they were passed in.
    fn extend(
        &self,
        grid: &Grid,
        path: &mut RoutePath,
        visited: &mut FixedBitSet,
        target_length: usize,
    ) -> bool;

    /// Resets `path` and `visited`, seeds them with `start` and extends from there. Starts that
    /// are blocked or outside the grid fail immediately.
    fn attempt_from(
        &self,
        grid: &Grid,
        start: Coord,
        target_length: usize,
        path: &mut RoutePath,
        visited: &mut FixedBitSet,
    ) -> bool {
        path.clear();
        visited.clear();
        visited.grow(grid.total_cells());
        if !grid.is_open(start) {
            return false;
        }
        visited.insert(grid.cell_index(start));
        path.push(start);
        self.extend(grid, path, visited, target_length)
    }
}

/// Whether a search may step onto `coord`.
pub(crate) fn can_step_to(grid: &Grid, visited: &FixedBitSet, coord: Coord) -> bool {
    grid.is_open(coord) && !visited.contains(grid.cell_index(coord))
}
