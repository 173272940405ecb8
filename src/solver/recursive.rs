use fixedbitset::FixedBitSet;

use crate::{
    grid::Grid,
    route_path::RoutePath,
    solver::{can_step_to, RouteSolver},
};

/// Plain recursive backtracking. Recursion depth grows with the target length, so very long
/// targets are better served by [StackSolver](super::stack::StackSolver).
#[derive(Clone, Copy, Debug, Default)]
pub struct RecursiveSolver;

impl RouteSolver for RecursiveSolver {
    fn extend(
        &self,
        grid: &Grid,
        path: &mut RoutePath,
        visited: &mut FixedBitSet,
        target_length: usize,
    ) -> bool {
        if path.len() == target_length {
            return true;
        }
        let Ok(tail) = path.peek_back() else {
            return false;
        };
        for next in grid.cardinal_neighbours(tail) {
            if !can_step_to(grid, visited, next) {
                continue;
            }
            visited.insert(grid.cell_index(next));
            path.push(next);
            if self.extend(grid, path, visited, target_length) {
                return true;
            }
            if let Ok(dead_end) = path.pop_back() {
                visited.set(grid.cell_index(dead_end), false);
            }
        }
        false
    }
}
