//! Timer-driven obstacle spawning

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::lanes::Lane;
use crate::tuning::Tuning;

/// Countdown to the next obstacle
///
/// Starts at zero so a fresh session spawns on its first tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks remaining until the next spawn
    pub timer: f32,
}

impl Spawner {
    /// Count down by `dt`; when the timer runs out pick a lane and rearm.
    ///
    /// The new interval is drawn uniformly from the tuning range and divided
    /// by `difficulty`, so spawns get more frequent as the run goes on.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dt: f32,
        difficulty: f32,
        tuning: &Tuning,
    ) -> Option<Lane> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        let lane: Lane = rng.random();
        self.timer = next_interval(rng, difficulty, tuning);
        Some(lane)
    }
}

/// Ticks until the spawn after this one
pub fn next_interval<R: Rng + ?Sized>(rng: &mut R, difficulty: f32, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.spawn_interval_min..tuning.spawn_interval_max) / difficulty
}
