//! Strip worker - computes the next generation for a contiguous row range.

use std::ops::Range;

use crate::schema::Cell;

use super::{Grid, next_state};

/// Next-generation rows produced by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// Rows of the grid this strip replaces.
    pub rows: Range<usize>,
    /// `rows.len() * width` cell values, row-major.
    pub cells: Vec<u8>,
}

/// One worker's assignment for one turn.
///
/// The job owns its snapshot, so the worker never aliases the grid the
/// distributor is holding or any other worker's copy.
#[derive(Debug, Clone)]
pub struct StripJob {
    pub rows: Range<usize>,
    pub snapshot: Grid,
}

impl StripJob {
    pub fn new(rows: Range<usize>, snapshot: Grid) -> Self {
        Self { rows, snapshot }
    }

    /// Compute the strip, consuming the snapshot.
    pub fn run<F: FnMut(Cell)>(self, on_flip: F) -> Strip {
        next_strip(&self.snapshot, self.rows, on_flip)
    }
}

/// Compute rows `rows` of the next generation of `snapshot`.
///
/// Neighbour counts read the whole snapshot, including rows outside the
/// range and wrapped rows. `on_flip` is called for every cell whose state
/// differs from the snapshot, in row-major order within the range.
///
/// An empty grid yields an empty strip.
pub fn next_strip<F: FnMut(Cell)>(snapshot: &Grid, rows: Range<usize>, mut on_flip: F) -> Strip {
    if snapshot.height() == 0 {
        return Strip {
            rows: 0..0,
            cells: Vec::new(),
        };
    }

    let width = snapshot.width();
    let mut cells = Vec::with_capacity(rows.len() * width);

    for y in rows.clone() {
        for x in 0..width {
            let current = snapshot.get(x, y);
            let next = next_state(current, snapshot.live_neighbours(x, y));
            if next != current {
                on_flip(Cell::new(x, y));
            }
            cells.push(next);
        }
    }

    Strip { rows, cells }
}
