//! Full-copy grid snapshots for the presentation side.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::domain::materials::{MaterialRegistry, EMPTY};
use crate::grid::Grid;

/// Owned copy of the grid. Never shares memory with the live grid, so the
/// receiver can keep it for as long as it likes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub rows: u32,
    pub cols: u32,
    /// Row-major material ids.
    pub kinds: Vec<u8>,
    /// Row-major ABGR colours, ready for `ImageData`.
    pub colors: Vec<u32>,
}

impl GridSnapshot {
    /// Copy the grid. A cell whose kind is not in the registry is reported
    /// as empty rather than failing the capture.
    pub fn capture(grid: &Grid, registry: &MaterialRegistry) -> Self {
        let empty_color = registry.empty_cell().color;
        let sanitize = |(&kind, &color): (&u8, &u32)| {
            if registry.is_valid(kind) {
                (kind, color)
            } else {
                (EMPTY, empty_color)
            }
        };

        #[cfg(feature = "parallel")]
        let (kinds, colors): (Vec<u8>, Vec<u32>) =
            grid.kinds.par_iter().zip(grid.colors.par_iter()).map(sanitize).unzip();

        #[cfg(not(feature = "parallel"))]
        let (kinds, colors): (Vec<u8>, Vec<u32>) =
            grid.kinds.iter().zip(grid.colors.iter()).map(sanitize).unzip();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            kinds,
            colors,
        }
    }

    #[inline]
    pub fn kind_at(&self, x: u32, y: u32) -> u8 {
        self.kinds[(y * self.cols + x) as usize]
    }

    pub fn non_empty_count(&self) -> usize {
        self.kinds.iter().filter(|&&k| k != EMPTY).count()
    }
}
