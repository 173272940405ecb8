use fixedbitset::FixedBitSet;
use log::{debug, info, trace, warn};

use crate::{
    error::SearchError,
    grid::Grid,
    route_path::RoutePath,
    selector::StartPointSelector,
    solver::{stack::StackSolver, RouteSolver},
    DEFAULT_BATCH_SIZE,
};

/// Multi-start depth-first search for a route of an exact length.
///
/// Starting points are drawn best connected first from a [StartPointSelector], `batch_size` at
/// a time, and handed to the solver one by one until a route is found or every unblocked cell
/// has been tried. The first route found is returned; it need not be unique or optimal in any
/// sense.
#[derive(Clone, Debug)]
pub struct PathSearch<S = StackSolver> {
    /// Starting points requested from the selector at a time. Values above the number of cells
    /// of the searched grid are clamped.
    pub batch_size: usize,
    /// Skips starting points whose connected component is smaller than the target length.
    /// Requires up to date components on the grid, see [Grid::update].
    pub prune_small_components: bool,
    pub solver: S,
}

impl Default for PathSearch<StackSolver> {
    fn default() -> Self {
        PathSearch::with_solver(StackSolver)
    }
}

impl PathSearch<StackSolver> {
    pub fn new() -> Self {
        PathSearch::default()
    }
}

impl<S: RouteSolver> PathSearch<S> {
    pub fn with_solver(solver: S) -> Self {
        PathSearch {
            batch_size: DEFAULT_BATCH_SIZE,
            prune_small_components: false,
            solver,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_component_pruning(mut self, prune: bool) -> Self {
        self.prune_small_components = prune;
        self
    }

    /// Looks for a contiguous route of exactly `target_length` unblocked cells, none visited
    /// twice.
    ///
    /// Returns an empty [RoutePath] when no route exists from any starting point. Fails if the
    /// target length is zero or exceeds the number of cells, and with the selector's error if
    /// the grid has no unblocked cell or the batch size is zero.
    pub fn find_path(&self, grid: &Grid, target_length: u32) -> Result<RoutePath, SearchError> {
        if target_length == 0 {
            return Err(SearchError::ZeroTargetLength);
        }
        let total = grid.total_cells();
        let target = target_length as usize;
        if target > total {
            return Err(SearchError::TargetLengthExceedsGrid {
                target: target_length,
                total,
            });
        }
        let batch_size = self.batch_size.min(total);
        info!(
            "Searching a {}x{} grid ({} unblocked) for a route of length {}",
            grid.rows(),
            grid.cols(),
            grid.unblocked_count(),
            target
        );

        let component_sizes = self.component_sizes(grid);
        let mut visited = FixedBitSet::with_capacity(total);
        let mut path = RoutePath::with_capacity(target);
        let mut attempted = 0;
        for batch in StartPointSelector::new().into_batches(grid, batch_size) {
            let batch = batch?;
            debug!("Trying a batch of {} starting points", batch.len());
            for start in batch {
                if let Some(sizes) = &component_sizes {
                    let size = sizes[grid.cell_index(start)];
                    if size < target {
                        debug!("Skipping {}: its component only has {} cells", start, size);
                        continue;
                    }
                }
                attempted += 1;
                trace!("Attempting a route from {}", start);
                if self
                    .solver
                    .attempt_from(grid, start, target, &mut path, &mut visited)
                {
                    info!(
                        "Found a route of length {} from {} after {} starting points",
                        target, start, attempted
                    );
                    return Ok(path);
                }
            }
        }
        info!(
            "No route of length {} found after {} starting points",
            target, attempted
        );
        Ok(RoutePath::new())
    }

    fn component_sizes(&self, grid: &Grid) -> Option<Vec<usize>> {
        if !self.prune_small_components {
            return None;
        }
        let sizes = grid.component_sizes();
        if sizes.is_none() {
            warn!("Grid components are dirty, searching without component pruning");
        }
        sizes
    }
}
