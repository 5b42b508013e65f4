//! PowderBehavior - solids with gravity (sand, tnt)
//!
//! Falls straight down; when blocked, slides to one of the two lower
//! diagonals, trying them in coin-flip order so piles grow symmetrically.

use super::{Behavior, UpdateContext};
use crate::systems::rng::side_order;

pub struct PowderBehavior;

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> Option<(u32, u32)> {
        if let Some(pos) = ctx.try_move(0, 1) {
            return Some(pos);
        }

        let (s1, s2) = side_order(ctx.rng);
        ctx.try_move(s1, 1).or_else(|| ctx.try_move(s2, 1))
    }
}
