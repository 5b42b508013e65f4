use log::info;

use crate::error::{SimError, SimResult};

use super::init::explosion_params;
use super::WorldCore;

pub(super) fn start(world: &mut WorldCore, now_ms: f64) -> SimResult<()> {
    let rate = world.scheduler.rate();
    world.scheduler.start(rate, now_ms)?;
    world.rate.reset(now_ms);
    Ok(())
}

pub(super) fn set_tick_rate(world: &mut WorldCore, rate: f64, now_ms: f64) -> SimResult<()> {
    world.scheduler.set_rate(rate, now_ms)?;
    if world.scheduler.is_running() {
        world.rate.reset(now_ms);
    }
    info!("tick rate set to {} ticks/s", rate);
    Ok(())
}

pub(super) fn set_explosion_chance(world: &mut WorldCore, chance: f32) -> SimResult<()> {
    if !(0.0..=1.0).contains(&chance) {
        return Err(SimError::InvalidConfig(format!(
            "explosionChance must be within [0, 1], got {}",
            chance
        )));
    }
    world.config.explosion_chance = chance;
    Ok(())
}

/// Radii past `max_dimension` cover the whole grid anyway and are clamped.
pub(super) fn set_explosion_radius(world: &mut WorldCore, radius: u32) {
    let radius = radius.min(world.config.max_dimension);
    world.config.explosion_radius = radius;
    world.explosion.radius = radius;
}

pub(super) fn set_residue(world: &mut WorldCore, key: &str, probability: f32) -> SimResult<()> {
    let mut config = world.config.clone();
    config.residue_material = key.to_string();
    config.residue_probability = probability;
    config.validate()?;
    world.explosion = explosion_params(&world.registry, &config)?;
    world.config = config;
    Ok(())
}
