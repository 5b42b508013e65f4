use super::super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Grid {
    /// Empty and in bounds. Out-of-bounds cells are never empty so movement
    /// rules treat the border as a wall.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        match self.checked_index(x, y) {
            Some(idx) => self.kinds[idx] == EMPTY,
            None => false,
        }
    }

    // === Kind access ===
    #[inline]
    pub fn kind_at(&self, x: i32, y: i32) -> MaterialId {
        match self.checked_index(x, y) {
            Some(idx) => self.kinds[idx],
            None => EMPTY,
        }
    }

    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let idx = self.checked_index(x, y)?;
        Some(Cell {
            kind: self.kinds[idx],
            color: self.colors[idx],
        })
    }

    /// Number of cells holding any material.
    /// Parallel scan with Rayon when the feature is enabled.
    pub fn count_non_empty(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.kinds.par_iter().filter(|&&k| k != EMPTY).count()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.kinds.iter().filter(|&&k| k != EMPTY).count()
        }
    }
}
