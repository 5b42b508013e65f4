//! Spatial storage: the cell grid.

pub mod grid;
