use super::*;

impl Grid {
    /// Allocate a `new_rows x new_cols` grid holding this grid's top-left
    /// overlap verbatim; newly exposed cells are empty.
    ///
    /// Dimensions are expected to be clamped by the caller already.
    pub fn resized(&self, new_rows: u32, new_cols: u32) -> Grid {
        let mut next = Grid::new(new_rows, new_cols, self.empty);
        let copy_rows = self.rows.min(next.rows) as usize;
        let copy_cols = self.cols.min(next.cols) as usize;

        let old_stride = self.cols as usize;
        let new_stride = next.cols as usize;
        for y in 0..copy_rows {
            let src = y * old_stride..y * old_stride + copy_cols;
            let dst = y * new_stride;
            next.kinds[dst..dst + copy_cols].copy_from_slice(&self.kinds[src.clone()]);
            next.colors[dst..dst + copy_cols].copy_from_slice(&self.colors[src.clone()]);
            next.flow[dst..dst + copy_cols].copy_from_slice(&self.flow[src]);
        }
        next
    }
}
