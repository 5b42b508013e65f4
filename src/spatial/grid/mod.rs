//! Grid - Structure of Arrays (SoA) cell storage
//!
//! Instead of: Vec<Vec<Cell>>      // one allocation per row, pointer chasing
//! We have:    kinds[], colors[]   // linear memory, the colour plane is a ready-made frame
//!
//! Row-major, `x` is the column and `y` the row, `y = 0` at the top.

use crate::domain::materials::{Cell, MaterialId, EMPTY};

mod indexing;
mod accessors;
mod moves;
mod resize;

/// SoA Grid - all cell data in separate arrays
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    size: usize,

    /// The registry's empty cell, used for fills and vacated sources.
    empty: Cell,

    pub kinds: Vec<MaterialId>,     // Material kind (0 = empty)
    pub colors: Vec<u32>,           // ABGR packed colour, always the registry colour of `kinds`
    pub flow: Vec<i8>,              // Lateral flow direction of liquids (-1, 0, 1)
}

impl Grid {
    /// Allocate a `rows x cols` grid with every cell empty. Zero dimensions
    /// are raised to 1; the caller clamps the upper bound.
    pub fn new(rows: u32, cols: u32, empty: Cell) -> Self {
        debug_assert_eq!(empty.kind, EMPTY, "grid fill cell must be the empty kind");
        let rows = rows.max(1);
        let cols = cols.max(1);
        let size = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            size,
            empty,
            kinds: vec![EMPTY; size],
            colors: vec![empty.color; size],
            flow: vec![0; size],
        }
    }

    /// Reset every cell to empty; dimensions unchanged.
    pub fn clear(&mut self) {
        self.kinds.fill(EMPTY);
        self.colors.fill(self.empty.color);
        self.flow.fill(0);
    }

    #[inline]
    pub fn empty_cell(&self) -> Cell {
        self.empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::materials::MaterialRegistry;

    fn registry() -> MaterialRegistry {
        MaterialRegistry::builtin()
    }

    fn cell(key: &str) -> Cell {
        let registry = registry();
        registry.cell(registry.id_of(key).unwrap()).unwrap()
    }

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(3, 4, registry().empty_cell());
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.size(), 12);
        assert_eq!(grid.count_non_empty(), 0);
        assert!(grid.colors.iter().all(|&c| c == registry().empty_cell().color));
    }

    #[test]
    fn zero_dimensions_become_one() {
        let grid = Grid::new(0, 0, registry().empty_cell());
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
    }

    #[test]
    fn set_out_of_bounds_leaves_grid_unchanged() {
        let mut grid = Grid::new(4, 4, registry().empty_cell());
        grid.set(1, 1, cell("sand"));
        let before = grid.clone();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, i32::MIN)] {
            assert!(!grid.set(x, y, cell("water")));
            assert!(grid.try_set(x, y, cell("water")).is_err());
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn set_writes_kind_and_color_together() {
        let mut grid = Grid::new(2, 2, registry().empty_cell());
        let water = cell("water");
        assert!(grid.set(1, 0, water));
        assert_eq!(grid.cell_at(1, 0), Some(water));
        assert_eq!(grid.kind_at(1, 0), water.kind);
        assert!(!grid.is_empty(1, 0));
        assert!(grid.is_empty(0, 0));
        assert!(!grid.is_empty(-1, 0));
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut grid = Grid::new(5, 6, registry().empty_cell());
        grid.set(2, 2, cell("wall"));
        grid.clear();
        assert_eq!((grid.rows(), grid.cols()), (5, 6));
        assert_eq!(grid.count_non_empty(), 0);
    }

    #[test]
    fn move_cell_vacates_source() {
        let mut grid = Grid::new(3, 3, registry().empty_cell());
        let sand = cell("sand");
        grid.set(1, 0, sand);
        grid.move_cell(1, 0, 1, 1);
        assert!(grid.is_empty(1, 0));
        assert_eq!(grid.cell_at(1, 1), Some(sand));
        assert_eq!(grid.count_non_empty(), 1);
    }

    #[test]
    fn resize_preserves_top_left_overlap() {
        let mut grid = Grid::new(4, 5, registry().empty_cell());
        for y in 0..4 {
            for x in 0..5 {
                if (x + y) % 2 == 0 {
                    grid.set(x, y, cell("sand"));
                } else {
                    grid.set(x, y, cell("wall"));
                }
            }
        }
        let origin = grid.index(0, 0);
        grid.flow[origin] = 1;

        let bigger = grid.resized(6, 7);
        assert_eq!((bigger.rows(), bigger.cols()), (6, 7));
        for y in 0..6 {
            for x in 0..7 {
                if x < 5 && y < 4 {
                    assert_eq!(bigger.cell_at(x, y), grid.cell_at(x, y));
                } else {
                    assert!(bigger.is_empty(x, y));
                }
            }
        }
        assert_eq!(bigger.flow[bigger.index(0, 0)], 1);

        let smaller = grid.resized(2, 3);
        assert_eq!((smaller.rows(), smaller.cols()), (2, 3));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(smaller.cell_at(x, y), grid.cell_at(x, y));
            }
        }
    }
}
