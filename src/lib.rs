//! Sandworks Engine - falling-sand simulation in WASM
//!
//! Architecture:
//! - domain/      - Materials and content bundles
//! - spatial/     - Grid storage
//! - systems/     - Movement rules, explosions, randomness
//! - simulation/  - World orchestration, tick scheduling, wasm facade
//! - channel/     - Command/event protocol and the native actor

pub mod error;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod channel;

pub use spatial::grid;
pub use systems::behaviors;

pub use channel::{SimCommand, SimEvent};
pub use domain::materials::{BehaviorKind, Cell, MaterialDef, MaterialId, MaterialRegistry};
pub use error::{SimError, SimResult};
pub use simulation::{GridSnapshot, Sandbox, SimConfig, TickReport, TickScheduler, WorldCore};

use wasm_bindgen::prelude::*;

// Thread pool initialization for the parallel snapshot path
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and browser console logging.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        // A second init keeps the first logger.
        let _ = console_log::init_with_level(log::Level::Info);
    }

    log::info!("sandworks engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
