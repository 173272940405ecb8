use crate::error::SelectorError;
use crate::grid::Grid;
use crate::Coord;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FusedIterator;

/// A starting point scored by its number of unblocked cardinal neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    score: u8,
    coord: Coord,
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Highest score first; equal scores go to the lower row, then the lower column.
        match self.score.cmp(&other.score) {
            Ordering::Equal => other.coord.cmp(&self.coord),
            s => s,
        }
    }
}

/// Hands out the unblocked cells of a grid as starting points, best connected first, in batches.
///
/// The grid is scored once, on the first call to [next_candidates](Self::next_candidates); later
/// calls draw from that snapshot even if the grid has been changed in the meantime. Every
/// candidate is handed out exactly once. After the last one the selector is exhausted and
/// further calls fail with [SelectorError::Exhausted].
#[derive(Clone, Debug, Default)]
pub struct StartPointSelector {
    queue: BinaryHeap<Candidate>,
    populated: bool,
    exhausted: bool,
}

impl StartPointSelector {
    pub fn new() -> StartPointSelector {
        StartPointSelector::default()
    }

    /// Returns up to `count` of the best remaining candidates.
    ///
    /// Fails if `count` is zero or exceeds the number of cells of `grid`, if `grid` has no
    /// unblocked cell, or if the selector is already exhausted. Handing out the last remaining
    /// candidates (fewer than or exactly `count`) exhausts the selector.
    pub fn next_candidates(
        &mut self,
        grid: &Grid,
        count: usize,
    ) -> Result<Vec<Coord>, SelectorError> {
        if count == 0 {
            return Err(SelectorError::ZeroCount);
        }
        if grid.unblocked_count() == 0 {
            return Err(SelectorError::FullyBlocked);
        }
        if count > grid.total_cells() {
            return Err(SelectorError::CapacityExceeded {
                requested: count,
                total: grid.total_cells(),
            });
        }
        if self.exhausted {
            return Err(SelectorError::Exhausted);
        }
        if !self.populated {
            self.populate(grid);
        }
        let take = count.min(self.queue.len());
        let candidates = (0..take)
            .filter_map(|_| self.queue.pop())
            .map(|candidate| candidate.coord)
            .collect::<Vec<_>>();
        if self.queue.is_empty() {
            debug!("Starting point candidates exhausted");
            self.exhausted = true;
        }
        Ok(candidates)
    }

    fn populate(&mut self, grid: &Grid) {
        self.queue = grid
            .open_cells()
            .map(|coord| Candidate {
                score: grid.count_unblocked_neighbors(coord.row, coord.col),
                coord,
            })
            .collect();
        self.populated = true;
        debug!("Scored {} starting point candidates", self.queue.len());
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Candidates not handed out yet. Zero before the first call.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Turns the selector into an iterator over batches of `count` candidates drawn from `grid`.
    pub fn into_batches(self, grid: &Grid, count: usize) -> CandidateBatches<'_> {
        CandidateBatches {
            selector: self,
            grid,
            count,
            failed: false,
        }
    }
}

/// Iterator over the candidate batches of a [StartPointSelector]. It ends once the selector is
/// exhausted, and right after yielding an error.
#[derive(Debug)]
pub struct CandidateBatches<'a> {
    selector: StartPointSelector,
    grid: &'a Grid,
    count: usize,
    failed: bool,
}

impl Iterator for CandidateBatches<'_> {
    type Item = Result<Vec<Coord>, SelectorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.selector.is_exhausted() {
            return None;
        }
        let batch = self.selector.next_candidates(self.grid, self.count);
        self.failed = batch.is_err();
        Some(batch)
    }
}

impl FusedIterator for CandidateBatches<'_> {}
