//! Behaviors - movement rules per material category
//!
//! Each behavior handles one category; the registry dispatches on
//! [`BehaviorKind`], which the material's capability flags select.
//!
//! Rules read destination occupancy from the live grid and write there
//! immediately, so a cell is the destination of at most one move per tick.

mod powder;
mod liquid;
mod gas;

pub use powder::PowderBehavior;
pub use liquid::LiquidBehavior;
pub use gas::GasBehavior;

use rand::RngCore;

use crate::domain::materials::BehaviorKind;
use crate::grid::Grid;

/// Update context passed to behaviors: the live grid, the random source and
/// the position being evaluated.
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut dyn RngCore,
    pub x: u32,
    pub y: u32,
}

impl<'a> UpdateContext<'a> {
    /// Move the particle by `(dx, dy)` if the target is in bounds and empty.
    /// Returns the new position.
    #[inline]
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Option<(u32, u32)> {
        let tx = self.x as i32 + dx;
        let ty = self.y as i32 + dy;
        if !self.grid.is_empty(tx, ty) {
            return None;
        }
        let (tx, ty) = (tx as u32, ty as u32);
        self.grid.move_cell(self.x, self.y, tx, ty);
        Some((tx, ty))
    }
}

/// Behavior trait - each category implements this.
///
/// Returns the particle's new position, or `None` if it stayed put.
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext) -> Option<(u32, u32)>;
}

/// Behavior registry - dispatch by category
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
    gas: GasBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            powder: PowderBehavior,
            liquid: LiquidBehavior,
            gas: GasBehavior,
        }
    }

    pub fn update(&self, kind: BehaviorKind, ctx: &mut UpdateContext) -> Option<(u32, u32)> {
        match kind {
            BehaviorKind::Powder => self.powder.update(ctx),
            BehaviorKind::Liquid => self.liquid.update(ctx),
            BehaviorKind::Gas => self.gas.update(ctx),
            BehaviorKind::Static => None,
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::RngCore;

    use super::{BehaviorRegistry, UpdateContext};
    use crate::domain::materials::{Cell, MaterialRegistry};
    use crate::grid::Grid;

    pub fn registry() -> MaterialRegistry {
        MaterialRegistry::builtin()
    }

    pub fn cell(key: &str) -> Cell {
        let registry = registry();
        registry.cell(registry.id_of(key).unwrap()).unwrap()
    }

    pub fn grid(rows: u32, cols: u32) -> Grid {
        Grid::new(rows, cols, registry().empty_cell())
    }

    /// Run one rule evaluation for the particle at `(x, y)`.
    pub fn update_at(grid: &mut Grid, x: u32, y: u32, rng: &mut dyn RngCore) -> Option<(u32, u32)> {
        let registry = registry();
        let kind = grid.kind_at(x as i32, y as i32);
        let behavior = registry.get(kind).unwrap().behavior();
        let mut ctx = UpdateContext { grid, rng, x, y };
        BehaviorRegistry::new().update(behavior, &mut ctx)
    }
}
