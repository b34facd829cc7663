//! Fixed-size square board with mark placement and win detection.
//!
//! Pure data and algorithm, no I/O. A win is a run of `WIN_RUN` (3)
//! consecutive equal non-empty symbols in any row, any column, or any
//! diagonal of slope ±1, including off-center diagonals.

use crate::WIN_RUN;
use serde::{Deserialize, Serialize};

/// Independent copy of the grid, safe to hand to any consumer.
pub type Snapshot = Vec<Vec<Option<char>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    side: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![None; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.cells[row * self.side + col]
    }

    /// Places `symbol` at (row, col). Returns false without mutating when
    /// the position is out of range or already occupied.
    pub fn mark(&mut self, row: usize, col: usize, symbol: char) -> bool {
        if row >= self.side || col >= self.side {
            return false;
        }
        let slot = &mut self.cells[row * self.side + col];
        if slot.is_some() {
            return false;
        }
        *slot = Some(symbol);
        true
    }

    /// Clears every cell. The only way a marked cell ever becomes empty.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// True iff some row, column, or slope-±1 diagonal holds a run of
    /// `WIN_RUN` consecutive equal non-empty symbols.
    pub fn has_won(&self) -> bool {
        self.any_row_has_run(&self.cells) || self.any_row_has_run(&self.transposed()) || self.diagonal_run()
    }

    /// Owned copy of the grid, row-major. Never aliases internal state.
    pub fn snapshot(&self) -> Snapshot {
        (0..self.side)
            .map(|row| self.cells[row * self.side..(row + 1) * self.side].to_vec())
            .collect()
    }

    fn transposed(&self) -> Vec<Option<char>> {
        let mut cells = vec![None; self.side * self.side];
        for row in 0..self.side {
            for col in 0..self.side {
                cells[col * self.side + row] = self.cells[row * self.side + col];
            }
        }
        cells
    }

    // Scans each row of `cells` left to right with a running-length
    // counter that restarts on every symbol change or empty cell.
    fn any_row_has_run(&self, cells: &[Option<char>]) -> bool {
        for row in cells.chunks(self.side) {
            let mut run = 1;
            for pair in row.windows(2) {
                match (pair[0], pair[1]) {
                    (Some(a), Some(b)) if a == b => {
                        run += 1;
                        if run >= WIN_RUN {
                            return true;
                        }
                    }
                    _ => run = 1,
                }
            }
        }
        false
    }

    // Checks every in-bounds triple along the down-right and down-left
    // direction vectors. Evaluated independently of the row/column scan.
    fn diagonal_run(&self) -> bool {
        let reach = WIN_RUN - 1;
        for row in 0..self.side.saturating_sub(reach) {
            for col in 0..self.side {
                if col + reach < self.side && self.equal_triple(row, col, 1) {
                    return true;
                }
                if col >= reach && self.equal_triple(row, col, -1) {
                    return true;
                }
            }
        }
        false
    }

    fn equal_triple(&self, row: usize, col: usize, col_step: isize) -> bool {
        let first = self.cell(row, col);
        if first.is_none() {
            return false;
        }
        (1..WIN_RUN).all(|step| {
            let r = row + step;
            let c = (col as isize + col_step * step as isize) as usize;
            self.cell(r, c) == first
        })
    }
}
