//! Simulation configuration.
//!
//! Loaded from JSON (camelCase keys, every key optional) or built from
//! [`SimConfig::default`]. Explosion parameters can also be changed at
//! runtime through the world's setters.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

use super::scheduler::{validate_rate, MAX_INTERVAL_MS};

pub const DEFAULT_MAX_DIMENSION: u32 = 10_000;
/// Largest accepted `max_dimension`. A full grid at this size is 2^32 cells.
pub const MAX_DIMENSION_CEILING: u32 = 65_536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Upper bound for rows and columns, at most [`MAX_DIMENSION_CEILING`].
    pub max_dimension: u32,
    pub initial_rows: u32,
    pub initial_cols: u32,
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Length of the observed-rate window.
    pub rate_window_ms: f64,
    /// Per-tick trigger probability of each explosive particle.
    pub explosion_chance: f32,
    /// Blast radius in cells, at most `max_dimension`.
    pub explosion_radius: u32,
    /// Probability that a cell inside the blast becomes residue instead of empty.
    pub residue_probability: f32,
    pub residue_material: String,
    /// Fixed RNG seed; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            initial_rows: 150,
            initial_cols: 200,
            tick_rate: 60.0,
            rate_window_ms: 1000.0,
            explosion_chance: 0.001,
            explosion_radius: 10,
            residue_probability: 0.7,
            residue_material: "co2".to_string(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.max_dimension == 0 || self.max_dimension > MAX_DIMENSION_CEILING {
            return Err(SimError::InvalidConfig(format!(
                "maxDimension must be within [1, {}], got {}",
                MAX_DIMENSION_CEILING, self.max_dimension
            )));
        }
        if validate_rate(self.tick_rate).is_err() {
            return Err(SimError::InvalidConfig(format!(
                "tickRate must be positive with at most {} ms per tick, got {}",
                MAX_INTERVAL_MS, self.tick_rate
            )));
        }
        if !(self.rate_window_ms.is_finite() && self.rate_window_ms > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "rateWindowMs must be positive, got {}",
                self.rate_window_ms
            )));
        }
        if self.explosion_radius > self.max_dimension {
            return Err(SimError::InvalidConfig(format!(
                "explosionRadius must be at most maxDimension ({}), got {}",
                self.max_dimension, self.explosion_radius
            )));
        }
        check_probability("explosionChance", self.explosion_chance)?;
        check_probability("residueProbability", self.residue_probability)?;
        if self.residue_material.is_empty() {
            return Err(SimError::InvalidConfig("residueMaterial must not be empty".into()));
        }
        Ok(())
    }

    /// Clamp a requested size into `[1, max_dimension]`, logging when the
    /// request was too large.
    pub fn clamp_dimensions(&self, rows: u32, cols: u32) -> (u32, u32) {
        (self.clamp_one(rows), self.clamp_one(cols))
    }

    fn clamp_one(&self, requested: u32) -> u32 {
        if requested > self.max_dimension {
            let err = SimError::DimensionTooLarge {
                requested: requested as u64,
                max: self.max_dimension,
            };
            warn!("{}; clamping", err);
            return self.max_dimension;
        }
        requested.max(1)
    }

    /// Grid size for a canvas of `width_px x height_px` at `cell_size` pixels
    /// per cell. The pixel request is bounded by `max_dimension * cell_size`
    /// before dividing.
    pub fn cells_for_canvas(&self, width_px: u32, height_px: u32, cell_size: u32) -> (u32, u32) {
        let cell_size = cell_size.max(1) as u64;
        let max_px = self.max_dimension as u64 * cell_size;
        let rows = (height_px as u64).min(max_px) / cell_size;
        let cols = (width_px as u64).min(max_px) / cell_size;
        self.clamp_dimensions(rows as u32, cols as u32)
    }
}

fn check_probability(name: &str, p: f32) -> SimResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::InvalidConfig(format!("{} must be within [0, 1], got {}", name, p)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_dimension, 10_000);
        assert_eq!(config.residue_material, "co2");
    }

    #[test]
    fn json_keys_are_optional_and_camel_case() {
        let config = SimConfig::from_json(r#"{ "tickRate": 30, "explosionRadius": 4, "seed": 9 }"#).unwrap();
        assert_eq!(config.tick_rate, 30.0);
        assert_eq!(config.explosion_radius, 4);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.initial_rows, 150);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "tickRate": 0 }"#,
            r#"{ "maxDimension": 0 }"#,
            r#"{ "residueProbability": 1.5 }"#,
            r#"{ "explosionChance": -0.1 }"#,
            r#"{ "rateWindowMs": 0 }"#,
            r#"{ "tickRate": 1e-20 }"#,
            r#"{ "maxDimension": 4294967295 }"#,
            r#"{ "explosionRadius": 20000 }"#,
            r#"{ "maxDimension": 8, "explosionRadius": 9 }"#,
            "\"nope\"",
        ] {
            let err = SimConfig::from_json(json).unwrap_err();
            assert_eq!(err.code(), "invalid_config", "{}", json);
        }
    }

    #[test]
    fn limits_are_inclusive() {
        let config = SimConfig {
            max_dimension: MAX_DIMENSION_CEILING,
            explosion_radius: MAX_DIMENSION_CEILING,
            tick_rate: 1000.0 / MAX_INTERVAL_MS,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dimensions_are_clamped() {
        let config = SimConfig { max_dimension: 100, ..SimConfig::default() };
        assert_eq!(config.clamp_dimensions(0, 50), (1, 50));
        assert_eq!(config.clamp_dimensions(500, 100), (100, 100));
    }

    #[test]
    fn canvas_request_is_bounded() {
        let config = SimConfig { max_dimension: 100, ..SimConfig::default() };
        assert_eq!(config.cells_for_canvas(800, 600, 4), (100, 100));
        assert_eq!(config.cells_for_canvas(200, 120, 4), (30, 50));
        assert_eq!(config.cells_for_canvas(u32::MAX, u32::MAX, 1), (100, 100));
        assert_eq!(config.cells_for_canvas(10, 10, 0), (10, 10));
    }
}
