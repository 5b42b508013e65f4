//! Explosion effect: a filled circle of empty cells and residue.

use log::debug;
use rand::RngCore;

use crate::domain::materials::Cell;
use crate::grid::Grid;
use crate::systems::rng::SimRng;

/// Resolved explosion parameters. The residue is a registry cell so every
/// written cell stays consistent with the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    pub radius: u32,
    pub residue: Cell,
    pub residue_probability: f32,
}

/// The in-bounds part of a blast: its center, squared radius and the grid
/// rectangle bounding the disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastArea {
    cx: i64,
    cy: i64,
    r2: i64,
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
}

impl BlastArea {
    /// Clip a disc of `radius` around `(cx, cy)` to `grid`. The radius is
    /// capped at the grid's larger side, past which it covers nothing more.
    pub fn clipped(grid: &Grid, cx: i32, cy: i32, radius: u32) -> Self {
        let r = radius.min(grid.rows().max(grid.cols())) as i64;
        let (cx, cy) = (cx as i64, cy as i64);
        Self {
            cx,
            cy,
            r2: r * r,
            x0: (cx - r).max(0),
            x1: (cx + r).min(grid.cols() as i64 - 1),
            y0: (cy - r).max(0),
            y1: (cy + r).min(grid.rows() as i64 - 1),
        }
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.r2
    }

    /// Grid indices inside the disc, row-major.
    pub fn indices<'a>(&'a self, grid: &'a Grid) -> impl Iterator<Item = usize> + 'a {
        (self.y0..=self.y1).flat_map(move |y| {
            (self.x0..=self.x1)
                .filter(move |&x| self.contains(x, y))
                .map(move |x| grid.index(x as u32, y as u32))
        })
    }
}

/// Blow up everything within `radius` of `(cx, cy)` (inclusive, Euclidean).
///
/// Each affected in-bounds cell becomes residue with `residue_probability`,
/// empty otherwise. Returns the area that was written.
pub fn explode(grid: &mut Grid, cx: i32, cy: i32, params: &ExplosionParams, rng: &mut dyn RngCore) -> BlastArea {
    let area = BlastArea::clipped(grid, cx, cy, params.radius);
    let targets: Vec<usize> = area.indices(grid).collect();
    let empty = grid.empty_cell();
    for &idx in &targets {
        let cell = if rng.chance(params.residue_probability) { params.residue } else { empty };
        grid.write_idx(idx, cell);
    }

    debug!("explosion at ({}, {}) r={} wrote {} cells", cx, cy, params.radius, targets.len());
    area
}
