//! Systems that mutate the grid during a tick: movement rules, explosions and
//! the random source they share.

pub mod behaviors;
pub mod explosion;
pub mod rng;
