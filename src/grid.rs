use crate::error::GridError;
use crate::route_path::RoutePath;
use crate::Coord;
use core::fmt;
use fixedbitset::FixedBitSet;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Row and column offsets of the four cardinal neighbours, in search order: up, right, down,
/// left.
pub const CARDINAL_OFFSETS: [(i16, i16); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// [Grid] stores the blocked ([true]) or unblocked ([false]) state of every cell of a
/// `rows x cols` board in a row-major [FixedBitSet], together with running counts of both states.
/// Connected components of unblocked cells are kept in a [UnionFind] structure. It is only built
/// by [generate_components](Self::generate_components), since a fresh grid stores nothing but
/// its cell bits, and has to be regenerated when blocking cells may have split a component
/// apart.
///
/// Lookups come in two flavours. Strict lookups ([index](Self::index),
/// [is_unblocked](Self::is_unblocked)) fail with a [GridError] for coordinates outside the grid.
/// Permissive operations ([set_cell](Self::set_cell), [is_open](Self::is_open),
/// [count_unblocked_neighbors](Self::count_unblocked_neighbors)) answer with `false` or `0`
/// instead, so bulk updates tolerate bad coordinates and neighbour scans tolerate grid edges.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: FixedBitSet,
    unblocked: u32,
    blocked: u32,
    pub components: Option<UnionFind<usize>>,
    pub components_dirty: bool,
}

impl Default for Grid {
    /// The empty `0x0` grid. Use [resize](Grid::resize) to give it cells.
    fn default() -> Grid {
        Grid {
            rows: 0,
            cols: 0,
            cells: FixedBitSet::default(),
            unblocked: 0,
            blocked: 0,
            components: None,
            components_dirty: true,
        }
    }
}

impl Grid {
    /// Creates a grid with every cell unblocked. Components start out dirty.
    pub fn new(rows: u16, cols: u16) -> Result<Grid, GridError> {
        let total = checked_cell_count(rows, cols)?;
        Ok(Grid {
            rows,
            cols,
            cells: FixedBitSet::with_capacity(total),
            // Fits: checked_cell_count bounds the total by u32::MAX.
            unblocked: total as u32,
            blocked: 0,
            components: None,
            components_dirty: true,
        })
    }

    /// Replaces the grid by a fresh, fully unblocked `rows x cols` grid. On invalid dimensions the
    /// grid is left untouched and `false` is returned.
    pub fn resize(&mut self, rows: u16, cols: u16) -> bool {
        match Grid::new(rows, cols) {
            Ok(grid) => {
                *self = grid;
                true
            }
            Err(e) => {
                debug!("Rejected resize to {}x{}: {}", rows, cols, e);
                false
            }
        }
    }

    /// Number of rows, i.e. the height of the grid.
    pub fn rows(&self) -> u16 {
        self.rows
    }
    /// Number of columns, i.e. the width of the grid.
    pub fn cols(&self) -> u16 {
        self.cols
    }
    pub fn width(&self) -> u16 {
        self.cols
    }
    pub fn height(&self) -> u16 {
        self.rows
    }
    /// The size of a single row, which is the number of columns.
    pub fn row_size(&self) -> u16 {
        self.cols
    }
    /// The size of a single column, which is the number of rows.
    pub fn col_size(&self) -> u16 {
        self.rows
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    pub fn unblocked_count(&self) -> u32 {
        self.unblocked
    }
    pub fn blocked_count(&self) -> u32 {
        self.blocked
    }
    /// True for the `0x0` grid.
    pub fn is_empty(&self) -> bool {
        self.cells.len() == 0
    }
    pub fn has_blocked_cells(&self) -> bool {
        self.blocked > 0
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Strict row-major index lookup.
    pub fn index(&self, row: u16, col: u16) -> Result<usize, GridError> {
        if self.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row as usize * self.cols as usize + col as usize)
    }

    /// Row-major index of a coordinate already known to be in bounds.
    pub(crate) fn cell_index(&self, coord: Coord) -> usize {
        debug_assert!(self.in_bounds(coord));
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    /// Strict passability check.
    pub fn is_unblocked(&self, row: u16, col: u16) -> Result<bool, GridError> {
        let ix = self.index(row, col)?;
        Ok(!self.cells.contains(ix))
    }

    /// Permissive passability check: anything outside the grid is not open.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !self.cells.contains(self.cell_index(coord))
    }

    /// Sets a single cell. Returns `false` for coordinates outside the grid (or an empty grid).
    /// Writing the state a cell already has succeeds without touching the counters.
    ///
    /// Blocking a cell marks the components as dirty, unblocking one joins it with its open
    /// neighbours.
    pub fn set_cell(&mut self, row: u16, col: u16, blocked: bool) -> bool {
        let Ok(ix) = self.index(row, col) else {
            return false;
        };
        if self.cells.contains(ix) == blocked {
            return true;
        }
        self.cells.set(ix, blocked);
        if blocked {
            if self.unblocked > 0 {
                self.unblocked -= 1;
                self.blocked += 1;
            }
            self.components_dirty = true;
        } else {
            if self.blocked > 0 {
                self.blocked -= 1;
                self.unblocked += 1;
            }
            let open_neighbours: SmallVec<[usize; 4]> = self
                .cardinal_neighbours(Coord::new(row, col))
                .into_iter()
                .filter(|n| self.is_open(*n))
                .map(|n| self.cell_index(n))
                .collect();
            if let Some(components) = &mut self.components {
                for n_ix in open_neighbours {
                    components.union(ix, n_ix);
                }
            }
        }
        true
    }

    /// Blocks every listed cell that is currently unblocked; already blocked cells are skipped.
    ///
    /// Returns `false` if any coordinate could not be applied (for example because it lies
    /// outside the grid). The remaining coordinates are still applied and nothing is rolled
    /// back, so a `false` result can leave the grid partially updated.
    pub fn block_cells(&mut self, coords: &[Coord]) -> bool {
        let mut all_applied = true;
        for &coord in coords {
            match self.is_unblocked(coord.row, coord.col) {
                Ok(true) => {
                    if !self.set_cell(coord.row, coord.col, true) {
                        all_applied = false;
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    debug!("Not blocking {}: {}", coord, e);
                    all_applied = false;
                }
            }
        }
        all_applied
    }

    /// Unblocks every cell and resets the counters. Returns `false` on an empty grid.
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.cells.clear();
        self.unblocked = self.cells.len() as u32;
        self.blocked = 0;
        self.components_dirty = true;
        true
    }

    /// The in-bounds cardinal neighbours of a coordinate, in the order up, right, down, left.
    /// Whether they are blocked is not considered.
    pub fn cardinal_neighbours(&self, coord: Coord) -> SmallVec<[Coord; 4]> {
        CARDINAL_OFFSETS
            .iter()
            .filter_map(|&offset| self.step(coord, offset))
            .collect()
    }

    fn step(&self, coord: Coord, (d_row, d_col): (i16, i16)) -> Option<Coord> {
        let row = coord.row.checked_add_signed(d_row)?;
        let col = coord.col.checked_add_signed(d_col)?;
        let next = Coord::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// Number of unblocked cardinal neighbours (0 to 4). Coordinates outside the grid score 0.
    pub fn count_unblocked_neighbors(&self, row: u16, col: u16) -> u8 {
        let coord = Coord::new(row, col);
        if !self.in_bounds(coord) {
            return 0;
        }
        self.cardinal_neighbours(coord)
            .into_iter()
            .filter(|n| self.is_open(*n))
            .count() as u8
    }

    pub fn blocked_to_unblocked_ratio(&self) -> Result<f64, GridError> {
        if self.blocked == 0 || self.unblocked == 0 {
            return Err(GridError::DivisionByZero {
                blocked: self.blocked,
                unblocked: self.unblocked,
            });
        }
        Ok(self.blocked as f64 / self.unblocked as f64)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        iproduct!(0..self.rows, 0..self.cols).map(|(row, col)| Coord::new(row, col))
    }

    /// All unblocked coordinates in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|c| self.is_open(*c))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.rows, self.cols
        );
        let mut components = UnionFind::new(self.total_cells());
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let point = Coord::new(row, col);
            if !self.is_open(point) {
                continue;
            }
            let parent_ix = self.cell_index(point);
            // Linking down and right covers every adjacent pair once.
            for n in [(1, 0), (0, 1)].into_iter().filter_map(|d| self.step(point, d)) {
                if self.is_open(n) {
                    components.union(parent_ix, self.cell_index(n));
                }
            }
        }
        self.components = Some(components);
        self.components_dirty = false;
    }

    /// Size of the component every cell belongs to, indexed row-major. Blocked cells get 0.
    /// [None] while the components are dirty or have never been generated.
    pub fn component_sizes(&self) -> Option<Vec<usize>> {
        let components = self.components.as_ref().filter(|_| !self.components_dirty)?;
        let total = self.total_cells();
        let mut root_sizes = vec![0; total];
        for ix in (0..total).filter(|&ix| !self.cells.contains(ix)) {
            root_sizes[components.find(ix)] += 1;
        }
        let sizes = (0..total)
            .map(|ix| {
                if self.cells.contains(ix) {
                    0
                } else {
                    root_sizes[components.find(ix)]
                }
            })
            .collect();
        Some(sizes)
    }

    /// Draws the grid with a route on it: `S` marks the first cell, `E` the last and `o` the
    /// cells in between. Route cells outside the grid are ignored.
    pub fn render_route(&self, path: &RoutePath) -> String {
        let mut canvas: Vec<char> = (0..self.total_cells())
            .map(|ix| if self.cells.contains(ix) { '#' } else { '.' })
            .collect();
        let last = path.len().saturating_sub(1);
        for (i, coord) in path.iter().enumerate() {
            if !self.in_bounds(*coord) {
                continue;
            }
            canvas[self.cell_index(*coord)] = match i {
                0 => 'S',
                i if i == last => 'E',
                _ => 'o',
            };
        }
        if self.cols == 0 {
            return String::new();
        }
        canvas
            .chunks(self.cols as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn checked_cell_count(rows: u16, cols: u16) -> Result<usize, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimension { rows, cols });
    }
    (rows as usize)
        .checked_mul(cols as usize)
        .filter(|&total| u32::try_from(total).is_ok())
        .ok_or(GridError::CapacityExceeded { rows, cols })
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| {
                    if self.is_open(Coord::new(row, col)) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_and_accessors() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        // One row holds a cell per column, one column a cell per row.
        assert_eq!(grid.row_size(), 4);
        assert_eq!(grid.col_size(), 3);
        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid.unblocked_count(), 12);
        assert_eq!(grid.blocked_count(), 0);
        assert!(!grid.has_blocked_cells());
    }

    #[test]
    fn invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            GridError::InvalidDimension { rows: 0, cols: 5 }
        );
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn set_cell_keeps_counters_consistent() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.set_cell(1, 1, true));
        assert!(!grid.is_unblocked(1, 1).unwrap());
        assert_eq!(grid.unblocked_count(), 8);
        assert_eq!(grid.blocked_count(), 1);
        assert!(grid.has_blocked_cells());

        // Writing the current state again is a successful no-op.
        assert!(grid.set_cell(1, 1, true));
        assert_eq!(grid.unblocked_count(), 8);
        assert_eq!(grid.blocked_count(), 1);

        assert!(grid.set_cell(1, 1, false));
        assert!(grid.is_unblocked(1, 1).unwrap());
        assert_eq!(grid.unblocked_count(), 9);
        assert_eq!(grid.blocked_count(), 0);
        assert_eq!(
            grid.unblocked_count() + grid.blocked_count(),
            grid.total_cells() as u32
        );
    }

    #[test]
    fn strict_and_permissive_out_of_bounds() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.set_cell(5, 5, true));
        assert!(!grid.set_cell(2, 1, true));
        assert!(!grid.set_cell(1, 2, true));
        assert_eq!(grid.blocked_count(), 0);
        assert!(matches!(
            grid.is_unblocked(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, .. })
        ));
        assert!(grid.index(0, 2).is_err());
        assert_eq!(grid.count_unblocked_neighbors(10, 10), 0);
        assert!(!grid.is_open(Coord::new(2, 2)));
    }

    #[test]
    fn empty_grid_lookups() {
        let mut grid = Grid::default();
        assert!(grid.is_empty());
        assert_eq!(grid.is_unblocked(0, 0), Err(GridError::EmptyGrid));
        assert!(!grid.set_cell(0, 0, true));
        assert!(!grid.clear());
        assert!(grid.resize(2, 3));
        assert_eq!(grid.total_cells(), 6);
        assert!(grid.is_unblocked(1, 2).unwrap());
    }

    #[test]
    fn resize_resets_state() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell(0, 0, true);
        assert!(!grid.resize(0, 3));
        assert_eq!(grid.blocked_count(), 1);
        assert!(grid.resize(4, 2));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.blocked_count(), 0);
        assert_eq!(grid.unblocked_count(), 8);
        assert!(grid.is_unblocked(0, 0).unwrap());
    }

    #[test]
    fn count_neighbors() {
        //  ___
        // |   |
        // |   |
        // |   |
        //  ___
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.count_unblocked_neighbors(1, 1), 4);
        assert_eq!(grid.count_unblocked_neighbors(0, 0), 2);
        assert_eq!(grid.count_unblocked_neighbors(0, 1), 3);
        //  ___
        // | # |
        // |#  |
        // |   |
        //  ___
        grid.set_cell(0, 1, true);
        grid.set_cell(1, 0, true);
        assert_eq!(grid.count_unblocked_neighbors(1, 1), 2);
        assert_eq!(grid.count_unblocked_neighbors(0, 0), 0);
    }

    #[test]
    fn cardinal_neighbour_order() {
        let grid = Grid::new(3, 3).unwrap();
        let centre: Vec<Coord> = grid.cardinal_neighbours(Coord::new(1, 1)).into_vec();
        assert_eq!(
            centre,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(1, 0)
            ]
        );
        let corner: Vec<Coord> = grid.cardinal_neighbours(Coord::new(0, 0)).into_vec();
        assert_eq!(corner, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn block_cells_is_partial() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_cell(0, 0, true);
        let coords = [Coord::new(0, 0), Coord::new(1, 1), Coord::new(7, 7), Coord::new(2, 2)];
        assert!(!grid.block_cells(&coords));
        // Everything valid was applied despite the bad coordinate.
        assert!(!grid.is_unblocked(1, 1).unwrap());
        assert!(!grid.is_unblocked(2, 2).unwrap());
        assert_eq!(grid.blocked_count(), 3);

        assert!(grid.block_cells(&[Coord::new(0, 1), Coord::new(0, 1)]));
        assert_eq!(grid.blocked_count(), 4);
    }

    #[test]
    fn ratio() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(matches!(
            grid.blocked_to_unblocked_ratio(),
            Err(GridError::DivisionByZero { .. })
        ));
        grid.set_cell(0, 0, true);
        assert!((grid.blocked_to_unblocked_ratio().unwrap() - 1.0 / 3.0).abs() < 1e-9);
        grid.block_cells(&[Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]);
        assert!(grid.blocked_to_unblocked_ratio().is_err());
    }

    #[test]
    fn clear_unblocks_everything() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.block_cells(&[Coord::new(0, 0), Coord::new(1, 2)]);
        assert!(grid.clear());
        assert_eq!(grid.blocked_count(), 0);
        assert_eq!(grid.unblocked_count(), 6);
        assert!(grid.open_cells().count() == 6);
    }

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 2x3 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set_cell(0, 1, true);
        grid.set_cell(1, 1, true);
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        let left = grid.index(0, 0).unwrap();
        let left_below = grid.index(1, 0).unwrap();
        let right = grid.index(0, 2).unwrap();
        let components = grid.components.as_ref().unwrap();
        assert!(components.equiv(left, left_below));
        assert!(!components.equiv(left, right));
        assert_eq!(grid.component_sizes().unwrap(), vec![2, 0, 2, 2, 0, 2]);

        // Opening the wall joins both halves without a regeneration.
        grid.set_cell(0, 1, false);
        assert!(!grid.components_dirty);
        assert!(grid.components.as_ref().unwrap().equiv(left, right));
        assert_eq!(grid.component_sizes().unwrap()[left], 5);

        // Blocking may split a component, so sizes are withheld until the next update.
        grid.set_cell(0, 1, true);
        assert!(grid.component_sizes().is_none());
    }

    #[test]
    fn components_at_maximum_height() {
        let mut grid = Grid::new(u16::MAX, 1).unwrap();
        grid.set_cell(0, 0, true);
        grid.generate_components();
        let sizes = grid.component_sizes().unwrap();
        assert_eq!(sizes[0], 0);
        assert_eq!(sizes[u16::MAX as usize - 1], u16::MAX as usize - 1);
    }

    #[test]
    fn components_are_built_on_demand() {
        let mut grid = Grid::new(1000, 1000).unwrap();
        assert!(grid.components.is_none());
        assert!(grid.components_dirty);
        assert!(grid.component_sizes().is_none());

        // Unblocking without components has nothing to join.
        grid.set_cell(0, 0, true);
        grid.set_cell(0, 0, false);
        assert!(grid.components.is_none());

        assert!(Grid::default().components.is_none());
        assert!(grid.resize(3, 3));
        assert!(grid.components.is_none());

        grid.update();
        assert!(grid.components.is_some());
        assert_eq!(grid.component_sizes().unwrap(), vec![9; 9]);
    }

    #[test]
    fn render() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set_cell(1, 1, true);
        assert_eq!(format!("{}", grid), "Grid:\n...\n.#.\n");
        let path: RoutePath = [Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1)]
            .into_iter()
            .collect();
        assert_eq!(grid.render_route(&path), "oE.\nS#.");
    }
}
