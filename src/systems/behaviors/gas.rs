//! GasBehavior - gases (co2)
//!
//! Mirror image of a powder with an extra lateral drift: up, diagonal-up,
//! then sideways, all side choices in one coin-flip order.

use super::{Behavior, UpdateContext};
use crate::systems::rng::side_order;

pub struct GasBehavior;

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> Option<(u32, u32)> {
        if let Some(pos) = ctx.try_move(0, -1) {
            return Some(pos);
        }

        let (s1, s2) = side_order(ctx.rng);
        ctx.try_move(s1, -1)
            .or_else(|| ctx.try_move(s2, -1))
            .or_else(|| ctx.try_move(s1, 0))
            .or_else(|| ctx.try_move(s2, 0))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::super::test_support::*;

    #[test]
    fn rises() {
        let mut grid = grid(3, 3);
        grid.set(1, 2, cell("co2"));
        let mut rng = StepRng::new(0, 0);
        assert_eq!(update_at(&mut grid, 1, 2, &mut rng), Some((1, 1)));
        assert!(grid.is_empty(1, 2));
    }

    #[test]
    fn drifts_diagonally_under_ceiling() {
        let mut grid = grid(2, 3);
        grid.set(1, 0, cell("wall"));
        grid.set(1, 1, cell("co2"));
        let mut left_first = StepRng::new(u64::MAX, 0);
        assert_eq!(update_at(&mut grid, 1, 1, &mut left_first), Some((0, 0)));
    }

    #[test]
    fn spreads_along_top_row() {
        let mut grid = grid(1, 3);
        grid.set(1, 0, cell("co2"));
        let mut right_first = StepRng::new(0, 0);
        assert_eq!(update_at(&mut grid, 1, 0, &mut right_first), Some((2, 0)));
    }

    #[test]
    fn boxed_in_stays() {
        let mut grid = grid(2, 3);
        for x in 0..3 {
            grid.set(x, 0, cell("wall"));
        }
        grid.set(0, 1, cell("wall"));
        grid.set(2, 1, cell("wall"));
        grid.set(1, 1, cell("co2"));
        let mut rng = StepRng::new(0, 0);
        assert_eq!(update_at(&mut grid, 1, 1, &mut rng), None);
    }
}
