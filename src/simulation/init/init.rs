use std::sync::Arc;

use log::info;

use crate::domain::materials::MaterialRegistry;
use crate::error::{SimError, SimResult};
use crate::grid::Grid;
use crate::systems::behaviors::BehaviorRegistry;
use crate::systems::explosion::ExplosionParams;
use crate::systems::rng::default_rng;

use super::config::SimConfig;
use super::scheduler::TickScheduler;
use super::tick_stats::{RateCounter, TickReport};
use super::WorldCore;

pub(super) fn create_world_core(registry: Arc<MaterialRegistry>, config: SimConfig) -> SimResult<WorldCore> {
    config.validate()?;
    let explosion = explosion_params(&registry, &config)?;
    let (rows, cols) = config.clamp_dimensions(config.initial_rows, config.initial_cols);
    let grid = Grid::new(rows, cols, registry.empty_cell());

    Ok(WorldCore {
        grid,
        behaviors: BehaviorRegistry::new(),
        explosion,
        rng: default_rng(config.seed),
        scheduler: TickScheduler::new(config.tick_rate),
        rate: RateCounter::new(config.rate_window_ms, 0.0),
        frame: 0,
        last_report: TickReport::default(),
        tick_kinds: Vec::new(),
        registry,
        config,
    })
}

/// Resolve the residue material against `registry`.
pub(super) fn explosion_params(registry: &MaterialRegistry, config: &SimConfig) -> SimResult<ExplosionParams> {
    let id = registry.id_of(&config.residue_material)?;
    let residue = registry
        .cell(id)
        .ok_or_else(|| SimError::UnknownMaterial(config.residue_material.clone()))?;
    Ok(ExplosionParams {
        radius: config.explosion_radius,
        residue,
        residue_probability: config.residue_probability,
    })
}

pub(super) fn initialize(world: &mut WorldCore, rows: u32, cols: u32, now_ms: f64) {
    let (rows, cols) = world.config.clamp_dimensions(rows, cols);
    world.grid = Grid::new(rows, cols, world.registry.empty_cell());
    world.frame = 0;
    world.last_report = TickReport::default();

    // The stored rate is always valid: it came from a validated config or
    // a successful set_tick_rate.
    let rate = world.scheduler.rate();
    if world.scheduler.start(rate, now_ms).is_ok() {
        world.rate.reset(now_ms);
    }
    info!("initialized {}x{} grid at {} ticks/s", cols, rows, rate);
}

pub(super) fn load_content_bundle(world: &mut WorldCore, json: &str) -> SimResult<()> {
    let registry = MaterialRegistry::from_bundle_json(json)?;
    let explosion = explosion_params(&registry, &world.config)?;
    world.grid = Grid::new(world.grid.rows(), world.grid.cols(), registry.empty_cell());
    world.registry = Arc::new(registry);
    world.explosion = explosion;
    info!("loaded content bundle with {} materials", world.registry.len());
    Ok(())
}
