//! Commands in, events out. Both are JSON objects tagged by `type`, so the
//! JS worker can post them as plain objects:
//!
//! ```json
//! { "type": "paint", "x": 3, "y": 7, "kind": "sand" }
//! { "type": "setTickRate", "rate": 30 }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::simulation::{GridSnapshot, TickReport, WorldCore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimCommand {
    Initialize { rows: u32, cols: u32 },
    Paint { x: i32, y: i32, kind: String },
    PaintBrush { x: i32, y: i32, size: u32, kind: String },
    Resize { rows: u32, cols: u32 },
    #[serde(rename_all = "camelCase")]
    ResizeCanvas { width_px: u32, height_px: u32, cell_size: u32 },
    SetTickRate { rate: f64 },
    Clear,
    RequestSnapshot,
    /// Synchronous tick outside the scheduler.
    Step,
    Explode { x: i32, y: i32 },
    Shutdown,
}

impl SimCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SimCommand::Initialize { .. } => "initialize",
            SimCommand::Paint { .. } => "paint",
            SimCommand::PaintBrush { .. } => "paintBrush",
            SimCommand::Resize { .. } => "resize",
            SimCommand::ResizeCanvas { .. } => "resizeCanvas",
            SimCommand::SetTickRate { .. } => "setTickRate",
            SimCommand::Clear => "clear",
            SimCommand::RequestSnapshot => "requestSnapshot",
            SimCommand::Step => "step",
            SimCommand::Explode { .. } => "explode",
            SimCommand::Shutdown => "shutdown",
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        serde_json::from_str(json).map_err(|e| SimError::InvalidCommand(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimEvent {
    Ack { command: &'static str },
    Rejected { code: &'static str, message: String },
    GridSnapshot(GridSnapshot),
    Tick { snapshot: GridSnapshot, stats: TickReport },
    #[serde(rename_all = "camelCase")]
    RateUpdate { observed_rate: u32 },
}

impl SimEvent {
    pub fn rejected(err: &SimError) -> Self {
        SimEvent::Rejected {
            code: err.code(),
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Apply one command to the world. Errors become `rejected` events; the
/// world stays usable after any of them.
pub fn handle(world: &mut WorldCore, command: SimCommand, now_ms: f64) -> Vec<SimEvent> {
    let name = command.name();
    let result = match command {
        SimCommand::Initialize { rows, cols } => {
            world.initialize(rows, cols, now_ms);
            Ok(SimEvent::Ack { command: name })
        }
        SimCommand::Paint { x, y, kind } => world.paint(x, y, &kind).map(|_| SimEvent::Ack { command: name }),
        SimCommand::PaintBrush { x, y, size, kind } => world
            .paint_brush(x, y, size, &kind)
            .map(|_| SimEvent::Ack { command: name }),
        SimCommand::Resize { rows, cols } => Ok(SimEvent::GridSnapshot(world.resize(rows, cols, now_ms))),
        SimCommand::ResizeCanvas { width_px, height_px, cell_size } => Ok(SimEvent::GridSnapshot(
            world.resize_to_canvas(width_px, height_px, cell_size, now_ms),
        )),
        SimCommand::SetTickRate { rate } => world
            .set_tick_rate(rate, now_ms)
            .map(|_| SimEvent::Ack { command: name }),
        SimCommand::Clear => Ok(SimEvent::GridSnapshot(world.clear())),
        SimCommand::RequestSnapshot => Ok(SimEvent::GridSnapshot(world.snapshot())),
        SimCommand::Step => {
            let stats = world.step();
            Ok(SimEvent::Tick { snapshot: world.snapshot(), stats })
        }
        SimCommand::Explode { x, y } => {
            world.explode_at(x, y);
            Ok(SimEvent::Ack { command: name })
        }
        SimCommand::Shutdown => {
            world.stop();
            Ok(SimEvent::Ack { command: name })
        }
    };

    match result {
        Ok(event) => vec![event],
        Err(err) => {
            warn!("{} rejected: {}", name, err);
            vec![SimEvent::rejected(&err)]
        }
    }
}

/// Events for a completed scheduled tick.
pub fn tick_events(world: &WorldCore, report: TickReport) -> Vec<SimEvent> {
    let mut events = vec![SimEvent::Tick {
        snapshot: world.snapshot(),
        stats: report,
    }];
    if report.rate_window_closed {
        events.push(SimEvent::RateUpdate {
            observed_rate: report.observed_rate,
        });
    }
    events
}

/// Run a tick if one is due and return its events.
pub fn pump(world: &mut WorldCore, now_ms: f64) -> Vec<SimEvent> {
    match world.pump(now_ms) {
        Some(report) => tick_events(world, report),
        None => Vec::new(),
    }
}

/// JSON in, JSON array of events out. A message that does not parse is
/// answered with a `rejected` event.
pub fn handle_json(world: &mut WorldCore, json: &str, now_ms: f64) -> String {
    let events = match SimCommand::from_json(json) {
        Ok(command) => handle(world, command, now_ms),
        Err(err) => {
            warn!("{}", err);
            vec![SimEvent::rejected(&err)]
        }
    };
    serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
}
