//! Error kinds shared by the registry, grid, scheduler and channel.
//!
//! None of these are fatal: the simulation keeps running after any of them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Paint or lookup with a kind the registry does not know.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// Coordinate outside the current grid. Commands treat this as a no-op.
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds { x: i64, y: i64, cols: u32, rows: u32 },

    /// Tick rate that is zero, negative or not a number.
    #[error("tick rate must be a positive number, got {0}")]
    InvalidRate(f64),

    /// Requested dimension above the configured maximum. Resize clamps instead of failing.
    #[error("requested dimension {requested} exceeds the maximum of {max}")]
    DimensionTooLarge { requested: u64, max: u32 },

    #[error("invalid material definition: {0}")]
    InvalidMaterial(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A channel message that does not parse as a command.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl SimError {
    /// Stable identifier used on the wire (`rejected` events, wasm errors).
    pub fn code(&self) -> &'static str {
        match self {
            SimError::UnknownMaterial(_) => "unknown_material",
            SimError::OutOfBounds { .. } => "out_of_bounds",
            SimError::InvalidRate(_) => "invalid_rate",
            SimError::DimensionTooLarge { .. } => "dimension_too_large",
            SimError::InvalidMaterial(_) => "invalid_material",
            SimError::InvalidConfig(_) => "invalid_config",
            SimError::InvalidCommand(_) => "invalid_command",
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
