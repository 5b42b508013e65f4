//! World - the simulation actor's state
//!
//! `WorldCore` only orchestrates; the work lives in the submodules:
//! - init/      construction and configuration
//! - step/      one tick over the grid (movement rules, explosives)
//! - schedule/  fixed-rate tick scheduling
//! - perf/      clock, step timing and observed-rate statistics
//! - commands/  paint, resize, clear, manual explosions
//! - render/    full-copy snapshots for the presentation side

use std::sync::Arc;

use rand::RngCore;

use crate::domain::materials::{MaterialId, MaterialRegistry};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::systems::behaviors::BehaviorRegistry;
use crate::systems::explosion::ExplosionParams;

#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "schedule/scheduler.rs"]
mod scheduler;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/snapshot.rs"]
mod snapshot;
mod facade;

pub use config::{SimConfig, DEFAULT_MAX_DIMENSION, MAX_DIMENSION_CEILING};
pub use facade::{Sandbox, Snapshot, TickStats};
pub use perf_timer::now_ms;
pub use scheduler::{validate_rate, SchedulerState, MAX_INTERVAL_MS, TickDue, TickScheduler};
pub use snapshot::GridSnapshot;
pub use tick_stats::{RateCounter, TickReport};

use perf_timer::PerfTimer;

/// The simulation world: sole owner and mutator of the grid.
pub struct WorldCore {
    registry: Arc<MaterialRegistry>,
    grid: Grid,
    behaviors: BehaviorRegistry,
    config: SimConfig,
    explosion: ExplosionParams,
    rng: Box<dyn RngCore + Send>,

    // Scheduling
    scheduler: TickScheduler,
    rate: RateCounter,

    // State
    frame: u64,
    last_report: TickReport,
    /// Kinds at tick start; the stepper picks its sources from here.
    tick_kinds: Vec<MaterialId>,
}

impl WorldCore {
    /// World with the built-in materials.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_registry(MaterialRegistry::builtin(), config)
    }

    pub fn with_registry(registry: MaterialRegistry, config: SimConfig) -> SimResult<Self> {
        init::create_world_core(Arc::new(registry), config)
    }

    /// Replace the random source (tests inject seeded or mock generators).
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }

    /// Swap the material set. The grid is cleared since old ids mean nothing
    /// in the new registry.
    pub fn load_content_bundle_json(&mut self, json: &str) -> SimResult<()> {
        init::load_content_bundle(self, json)
    }

    pub fn content_manifest_json(&self) -> String {
        self.registry.manifest_json()
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> u32 { self.grid.rows() }

    pub fn cols(&self) -> u32 { self.grid.cols() }

    pub fn frame(&self) -> u64 { self.frame }

    /// Non-empty cells currently on the grid.
    pub fn particle_count(&self) -> usize {
        self.grid.count_non_empty()
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    // === Lifecycle ===

    /// Fresh empty grid (clamped) and a running scheduler at the current rate.
    pub fn initialize(&mut self, rows: u32, cols: u32, now_ms: f64) {
        init::initialize(self, rows, cols, now_ms)
    }

    pub fn start(&mut self, now_ms: f64) -> SimResult<()> {
        settings::start(self, now_ms)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    // === Settings ===

    pub fn set_tick_rate(&mut self, rate: f64, now_ms: f64) -> SimResult<()> {
        settings::set_tick_rate(self, rate, now_ms)
    }

    pub fn tick_rate(&self) -> f64 {
        self.scheduler.rate()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn set_explosion_chance(&mut self, chance: f32) -> SimResult<()> {
        settings::set_explosion_chance(self, chance)
    }

    pub fn set_explosion_radius(&mut self, radius: u32) {
        settings::set_explosion_radius(self, radius)
    }

    pub fn set_residue(&mut self, key: &str, probability: f32) -> SimResult<()> {
        settings::set_residue(self, key, probability)
    }

    // === Commands ===

    /// Paint one cell. `Ok(false)` when out of bounds (no-op), error for an
    /// unknown material (grid unchanged).
    pub fn paint(&mut self, x: i32, y: i32, key: &str) -> SimResult<bool> {
        commands::paint(self, x, y, key)
    }

    /// Paint a square of half-width `size / 2` centred on `(x, y)`. Returns
    /// the number of in-bounds cells written.
    pub fn paint_brush(&mut self, x: i32, y: i32, size: u32, key: &str) -> SimResult<u32> {
        commands::paint_brush(self, x, y, size, key)
    }

    pub fn resize(&mut self, rows: u32, cols: u32, now_ms: f64) -> GridSnapshot {
        commands::resize(self, rows, cols, now_ms)
    }

    pub fn resize_to_canvas(&mut self, width_px: u32, height_px: u32, cell_size: u32, now_ms: f64) -> GridSnapshot {
        commands::resize_to_canvas(self, width_px, height_px, cell_size, now_ms)
    }

    pub fn clear(&mut self) -> GridSnapshot {
        commands::clear(self)
    }

    /// Detonate at `(x, y)` with the configured radius and residue.
    pub fn explode_at(&mut self, x: i32, y: i32) -> u32 {
        commands::explode_at(self, x, y)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, &self.registry)
    }

    // === Ticking ===

    /// Advance one tick without touching the rate statistics.
    pub fn step(&mut self) -> TickReport {
        step::step(self)
    }

    /// Advance one tick and count it towards the observed rate.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        step::tick(self, now_ms)
    }

    /// Run a tick if one is due. At most one per call.
    pub fn pump(&mut self, now_ms: f64) -> Option<TickReport> {
        self.scheduler.poll(now_ms)?;
        Some(self.tick(now_ms))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.scheduler.next_deadline()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
