use log::{info, trace};

use crate::domain::materials::Cell;
use crate::error::{SimError, SimResult};
use crate::systems::explosion::explode;

use super::snapshot::GridSnapshot;
use super::WorldCore;

fn resolve(world: &WorldCore, key: &str) -> SimResult<Cell> {
    let id = world.registry.id_of(key)?;
    world
        .registry
        .cell(id)
        .ok_or_else(|| SimError::UnknownMaterial(key.to_string()))
}

pub(super) fn paint(world: &mut WorldCore, x: i32, y: i32, key: &str) -> SimResult<bool> {
    let cell = resolve(world, key)?;
    if !world.grid.set(x, y, cell) {
        trace!("paint at ({}, {}) outside {}x{} grid ignored", x, y, world.grid.cols(), world.grid.rows());
        return Ok(false);
    }
    Ok(true)
}

pub(super) fn paint_brush(world: &mut WorldCore, cx: i32, cy: i32, size: u32, key: &str) -> SimResult<u32> {
    let cell = resolve(world, key)?;
    // The square is clipped to the grid before iterating.
    let half = (size / 2) as i64;
    let (cx, cy) = (cx as i64, cy as i64);
    let x0 = (cx - half).max(0);
    let x1 = (cx + half).min(world.grid.cols() as i64 - 1);
    let y0 = (cy - half).max(0);
    let y1 = (cy + half).min(world.grid.rows() as i64 - 1);
    let mut written = 0u32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let idx = world.grid.index(x as u32, y as u32);
            world.grid.write_idx(idx, cell);
            written += 1;
        }
    }
    Ok(written)
}

pub(super) fn resize(world: &mut WorldCore, rows: u32, cols: u32, now_ms: f64) -> GridSnapshot {
    let (rows, cols) = world.config.clamp_dimensions(rows, cols);
    world.grid = world.grid.resized(rows, cols);
    world.scheduler.restart(now_ms);
    if world.scheduler.is_running() {
        world.rate.reset(now_ms);
    }
    info!("resized grid to {}x{}", cols, rows);
    world.snapshot()
}

pub(super) fn resize_to_canvas(
    world: &mut WorldCore,
    width_px: u32,
    height_px: u32,
    cell_size: u32,
    now_ms: f64,
) -> GridSnapshot {
    let (rows, cols) = world.config.cells_for_canvas(width_px, height_px, cell_size);
    resize(world, rows, cols, now_ms)
}

pub(super) fn clear(world: &mut WorldCore) -> GridSnapshot {
    world.grid.clear();
    world.snapshot()
}

pub(super) fn explode_at(world: &mut WorldCore, x: i32, y: i32) -> u32 {
    let area = explode(&mut world.grid, x, y, &world.explosion, &mut *world.rng);
    area.indices(&world.grid).count() as u32
}
