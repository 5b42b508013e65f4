use log::debug;

use crate::domain::materials::EMPTY;
use crate::systems::behaviors::UpdateContext;
use crate::systems::explosion::explode;
use crate::systems::rng::SimRng;

use super::tick_stats::TickReport;
use super::{PerfTimer, WorldCore};

/// One tick over the whole grid.
///
/// Sources come from the kinds captured at tick start; destinations are
/// checked against the live grid. Rows run bottom to top, columns left to
/// right. Cells inside a blast are dropped from the capture, so nothing an
/// explosion wrote or cleared is evaluated again in the same tick.
pub(super) fn step(world: &mut WorldCore) -> TickReport {
    let timer = PerfTimer::start();

    let WorldCore {
        registry,
        grid,
        behaviors,
        config,
        explosion,
        rng,
        tick_kinds,
        ..
    } = world;

    tick_kinds.clear();
    tick_kinds.extend_from_slice(&grid.kinds);

    let rows = grid.rows();
    let cols = grid.cols();
    let mut processed = 0u32;
    let mut explosions = 0u32;

    for y in (0..rows).rev() {
        for x in 0..cols {
            let idx = grid.index(x, y);
            let kind = tick_kinds[idx];
            if kind == EMPTY || grid.kinds[idx] != kind {
                continue;
            }
            let Some(def) = registry.get(kind) else {
                continue;
            };
            if !def.movable {
                continue;
            }
            processed += 1;

            let (px, py) = {
                let mut ctx = UpdateContext {
                    grid: &mut *grid,
                    rng: &mut **rng,
                    x,
                    y,
                };
                behaviors.update(def.behavior(), &mut ctx).unwrap_or((x, y))
            };

            if def.explosive && rng.chance(config.explosion_chance) {
                debug!("{} at ({}, {}) detonated", def.key, px, py);
                let area = explode(grid, px as i32, py as i32, explosion, &mut **rng);
                for blasted in area.indices(grid) {
                    tick_kinds[blasted] = EMPTY;
                }
                explosions += 1;
            }
        }
    }

    world.frame += 1;
    let report = TickReport {
        frame: world.frame,
        particles_processed: processed,
        explosions,
        step_ms: timer.elapsed_ms(),
        observed_rate: world.rate.observed(),
        rate_window_closed: false,
    };
    world.last_report = report;
    report
}

/// A scheduled tick: step, then count it towards the observed rate.
pub(super) fn tick(world: &mut WorldCore, now_ms: f64) -> TickReport {
    let mut report = step(world);
    if let Some(rate) = world.rate.record(now_ms) {
        debug!("observed tick rate {}", rate);
        report.observed_rate = rate;
        report.rate_window_closed = true;
        world.last_report = report;
    }
    report
}
