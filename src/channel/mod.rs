//! Simulation channel: the message protocol between the simulation actor
//! and the presentation side, plus a native thread that runs the actor.

pub mod protocol;
#[cfg(not(target_arch = "wasm32"))]
pub mod actor;

pub use protocol::{SimCommand, SimEvent};
