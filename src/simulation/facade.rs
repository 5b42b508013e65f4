use js_sys::{Uint32Array, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::channel::protocol;
use crate::error::SimError;

use super::config::SimConfig;
use super::perf_timer::now_ms;
use super::snapshot::GridSnapshot;
use super::tick_stats::TickReport;
use super::WorldCore;

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.code(), err))
}

/// Tick statistics as seen from JS.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct TickStats {
    frame: u64,
    particles_processed: u32,
    explosions: u32,
    step_ms: f64,
    observed_rate: u32,
    rate_window_closed: bool,
}

impl From<TickReport> for TickStats {
    fn from(r: TickReport) -> Self {
        Self {
            frame: r.frame,
            particles_processed: r.particles_processed,
            explosions: r.explosions,
            step_ms: r.step_ms,
            observed_rate: r.observed_rate,
            rate_window_closed: r.rate_window_closed,
        }
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
    #[wasm_bindgen(getter)]
    pub fn particles_processed(&self) -> u32 { self.particles_processed }
    #[wasm_bindgen(getter)]
    pub fn explosions(&self) -> u32 { self.explosions }
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn observed_rate(&self) -> u32 { self.observed_rate }
    #[wasm_bindgen(getter)]
    pub fn rate_window_closed(&self) -> bool { self.rate_window_closed }
}

/// Owned snapshot handed to JS. The arrays are fresh copies.
#[wasm_bindgen]
pub struct Snapshot {
    inner: GridSnapshot,
}

#[wasm_bindgen]
impl Snapshot {
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 { self.inner.rows }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 { self.inner.cols }

    pub fn kinds(&self) -> Uint8Array {
        Uint8Array::from(self.inner.kinds.as_slice())
    }

    /// ABGR pixels, one per cell; view the buffer as `Uint8ClampedArray` for `ImageData`.
    pub fn colors(&self) -> Uint32Array {
        Uint32Array::from(self.inner.colors.as_slice())
    }
}

impl From<GridSnapshot> for Snapshot {
    fn from(inner: GridSnapshot) -> Self {
        Self { inner }
    }
}

/// The simulation as driven from a JS worker: typed calls or JSON messages,
/// plus `pump` from the worker's own timer.
#[wasm_bindgen]
pub struct Sandbox {
    core: WorldCore,
}

#[wasm_bindgen]
impl Sandbox {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Sandbox, JsValue> {
        Ok(Self {
            core: WorldCore::new(SimConfig::default()).map_err(to_js)?,
        })
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<Sandbox, JsValue> {
        let config = SimConfig::from_json(config_json).map_err(to_js)?;
        Ok(Self {
            core: WorldCore::new(config).map_err(to_js)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 { self.core.rows() }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 { self.core.cols() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    pub fn init(&mut self, rows: u32, cols: u32) {
        self.core.initialize(rows, cols, now_ms());
    }

    /// Paint one cell. Returns false when out of bounds.
    pub fn paint(&mut self, x: i32, y: i32, kind: &str) -> Result<bool, JsValue> {
        self.core.paint(x, y, kind).map_err(to_js)
    }

    pub fn paint_brush(&mut self, x: i32, y: i32, size: u32, kind: &str) -> Result<u32, JsValue> {
        self.core.paint_brush(x, y, size, kind).map_err(to_js)
    }

    pub fn resize(&mut self, rows: u32, cols: u32) -> Snapshot {
        self.core.resize(rows, cols, now_ms()).into()
    }

    pub fn resize_canvas(&mut self, width_px: u32, height_px: u32, cell_size: u32) -> Snapshot {
        self.core.resize_to_canvas(width_px, height_px, cell_size, now_ms()).into()
    }

    pub fn set_tick_rate(&mut self, rate: f64) -> Result<(), JsValue> {
        self.core.set_tick_rate(rate, now_ms()).map_err(to_js)
    }

    pub fn clear(&mut self) -> Snapshot {
        self.core.clear().into()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot().into()
    }

    pub fn explode(&mut self, x: i32, y: i32) -> u32 {
        self.core.explode_at(x, y)
    }

    pub fn step(&mut self) -> TickStats {
        self.core.step().into()
    }

    pub fn stop(&mut self) {
        self.core.stop();
    }

    /// Run a tick if one is due.
    pub fn pump(&mut self) -> Option<TickStats> {
        self.core.pump(now_ms()).map(TickStats::from)
    }

    /// Milliseconds until the next tick is due, `undefined` while stopped.
    pub fn millis_until_next_tick(&self) -> Option<f64> {
        self.core.next_deadline().map(|d| (d - now_ms()).max(0.0))
    }

    /// JSON command in, JSON array of events out.
    pub fn handle_message(&mut self, json: &str) -> String {
        protocol::handle_json(&mut self.core, json, now_ms())
    }

    /// Like `pump`, answered with the JSON events of the tick (an empty array
    /// when none was due).
    pub fn pump_json(&mut self) -> String {
        let events = protocol::pump(&mut self.core, now_ms());
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn load_content_bundle(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_content_bundle_json(json).map_err(to_js)
    }

    pub fn content_manifest_json(&self) -> String {
        self.core.content_manifest_json()
    }
}
