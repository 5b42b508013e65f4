use super::*;

impl Grid {
    /// Move the particle at `from` into `to` and leave `from` empty.
    ///
    /// Both coordinates must be in bounds; the destination is overwritten, so
    /// callers check it is empty first. Lateral flow travels with the particle.
    #[inline]
    pub fn move_cell(&mut self, from_x: u32, from_y: u32, to_x: u32, to_y: u32) {
        let from = self.index(from_x, from_y);
        let to = self.index(to_x, to_y);
        self.move_idx(from, to);
    }

    #[inline]
    pub fn move_idx(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        self.kinds[to] = self.kinds[from];
        self.colors[to] = self.colors[from];
        self.flow[to] = self.flow[from];
        self.clear_idx(from);
    }

    #[inline]
    pub fn flow_at(&self, x: u32, y: u32) -> i8 {
        self.flow[self.index(x, y)]
    }

    #[inline]
    pub fn set_flow(&mut self, x: u32, y: u32, dir: i8) {
        let idx = self.index(x, y);
        self.flow[idx] = dir.signum();
    }
}
