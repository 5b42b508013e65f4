use super::super::*;

use crate::error::{SimError, SimResult};

impl Grid {
    /// Write a cell, failing with `OutOfBounds` (grid unchanged) outside the grid.
    pub fn try_set(&mut self, x: i32, y: i32, cell: Cell) -> SimResult<()> {
        let idx = self.checked_index(x, y).ok_or(SimError::OutOfBounds {
            x: x as i64,
            y: y as i64,
            cols: self.cols,
            rows: self.rows,
        })?;
        self.write_idx(idx, cell);
        Ok(())
    }

    /// Guarded write: `false` and no change when `(x, y)` is outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        self.try_set(x, y, cell).is_ok()
    }

    /// Write by index. New cells start with no lateral flow.
    #[inline]
    pub fn write_idx(&mut self, idx: usize, cell: Cell) {
        self.kinds[idx] = cell.kind;
        self.colors[idx] = cell.color;
        self.flow[idx] = 0;
    }

    #[inline]
    pub fn clear_idx(&mut self, idx: usize) {
        let empty = self.empty;
        self.write_idx(idx, empty);
    }
}
