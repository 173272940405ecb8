//! Error types, one per operation category.
//!
//! Operations that tolerate bad coordinates (such as [Grid::set_cell](crate::Grid::set_cell) or
//! [Grid::count_unblocked_neighbors](crate::Grid::count_unblocked_neighbors)) return sentinels
//! instead of these errors.
use thiserror::Error;

/// Failures of strict [Grid](crate::Grid) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: u16, cols: u16 },
    #[error("a {rows}x{cols} grid exceeds the addressable cell storage")]
    CapacityExceeded { rows: u16, cols: u16 },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },
    #[error("the grid has no cells")]
    EmptyGrid,
    #[error("ratio undefined with {blocked} blocked and {unblocked} unblocked cells")]
    DivisionByZero { blocked: u32, unblocked: u32 },
}

/// Failures of [RoutePath](crate::RoutePath) tail access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("the path is empty")]
    EmptyPath,
}

/// Failures of [StartPointSelector](crate::StartPointSelector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("number of candidates must be greater than zero")]
    ZeroCount,
    #[error("every cell of the grid is blocked, there are no starting points")]
    FullyBlocked,
    #[error("requested {requested} candidates but the grid only has {total} cells")]
    CapacityExceeded { requested: usize, total: usize },
    #[error("all starting point candidates have already been handed out")]
    Exhausted,
}

impl SelectorError {
    /// True for errors caused by the arguments of the call rather than the selector state.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SelectorError::ZeroCount | SelectorError::FullyBlocked)
    }
}

/// Failures of [PathSearch](crate::PathSearch). Not finding a route is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("target path length must be greater than zero")]
    ZeroTargetLength,
    #[error("target path length {target} exceeds the {total} cells of the grid")]
    TargetLengthExceedsGrid { target: u32, total: usize },
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl SearchError {
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            SearchError::ZeroTargetLength | SearchError::TargetLengthExceedsGrid { .. } => true,
            SearchError::Selector(e) => e.is_invalid_argument(),
        }
    }
}
