use fixedbitset::FixedBitSet;

use crate::{
    grid::Grid,
    route_path::RoutePath,
    solver::{can_step_to, RouteSolver},
};

/// Backtracking with an explicit stack instead of recursion. Visits cells in the same order as
/// [RecursiveSolver](super::recursive::RecursiveSolver) and finds the same routes, but its
/// memory use for long targets lives on the heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackSolver;

impl RouteSolver for StackSolver {
    fn extend(
        &self,
        grid: &Grid,
        path: &mut RoutePath,
        visited: &mut FixedBitSet,
        target_length: usize,
    ) -> bool {
        let base_len = path.len();
        if base_len == 0 {
            return false;
        }
        // Remaining untried neighbours of every cell this call has pushed, plus the initial tail.
        let mut frontier = Vec::with_capacity(target_length.saturating_sub(base_len) + 1);
        loop {
            if path.len() == target_length {
                return true;
            }
            let Ok(tail) = path.peek_back() else {
                return false;
            };
            if frontier.len() < path.len() + 1 - base_len {
                // Reversed so that popping yields up, right, down, left.
                let mut untried = grid.cardinal_neighbours(tail);
                untried.reverse();
                frontier.push(untried);
            }
            let next = frontier.last_mut().and_then(|untried| untried.pop());
            match next {
                Some(next) => {
                    if can_step_to(grid, visited, next) {
                        visited.insert(grid.cell_index(next));
                        path.push(next);
                    }
                }
                None => {
                    frontier.pop();
                    if path.len() == base_len {
                        return false;
                    }
                    if let Ok(dead_end) = path.pop_back() {
                        visited.set(grid.cell_index(dead_end), false);
                    }
                }
            }
        }
    }
}
