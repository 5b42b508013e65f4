//! LiquidBehavior - fluids (water)
//!
//! Order: down, lateral, diagonal-down. A lateral move records its direction
//! in the grid's flow plane; while a direction is recorded the liquid only
//! slides that way, so a pool comes to rest against the first obstacle.

use super::{Behavior, UpdateContext};
use crate::systems::rng::side_order;

pub struct LiquidBehavior;

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> Option<(u32, u32)> {
        if let Some((x, y)) = ctx.try_move(0, 1) {
            ctx.grid.set_flow(x, y, 0);
            return Some((x, y));
        }

        let flow = ctx.grid.flow_at(ctx.x, ctx.y) as i32;
        let (s1, s2) = if flow == 0 { side_order(ctx.rng) } else { (flow, -flow) };

        // Lateral
        let lateral = if flow == 0 {
            ctx.try_move(s1, 0).map(|p| (p, s1)).or_else(|| ctx.try_move(s2, 0).map(|p| (p, s2)))
        } else {
            ctx.try_move(s1, 0).map(|p| (p, s1))
        };
        if let Some(((x, y), dir)) = lateral {
            ctx.grid.set_flow(x, y, dir as i8);
            return Some((x, y));
        }

        // Diagonal-down
        let (x, y) = ctx.try_move(s1, 1).or_else(|| ctx.try_move(s2, 1))?;
        ctx.grid.set_flow(x, y, 0);
        Some((x, y))
    }
}
