//! Lane Dodge - A three-lane arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Background loop and one-shot effects (browser only)
//! - `platform`: Frame-driver and input helpers
//! - `tuning`: Data-driven game balance
//! - `settings`: Per-page player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Frame-driver convention: one delta unit is one frame at 60 Hz
    pub const NOMINAL_FPS: f32 = 60.0;
    /// Largest delta handed to a single tick (e.g. after a hidden tab)
    pub const MAX_FRAME_DELTA: f32 = 4.0;

    /// Number of lanes
    pub const LANE_COUNT: usize = 3;
    /// Horizontal distance between neighbouring lanes
    pub const LANE_SPACING: f32 = 200.0;

    /// Player marker sits this far above the bottom of the viewport
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    pub const PLAYER_RADIUS: f32 = 30.0;
    /// Fraction of the remaining distance to the target lane covered per tick
    pub const LANE_SMOOTHING: f32 = 0.2;

    /// Obstacles are squares of twice this size
    pub const OBSTACLE_HALF_SIZE: f32 = 30.0;
    /// Obstacles appear this far above the top edge
    pub const OBSTACLE_SPAWN_Y: f32 = -50.0;
    /// Obstacles are culled once they pass the bottom edge by this much
    pub const CULL_MARGIN: f32 = 50.0;
    /// Base fall speed in units per tick (scaled by difficulty)
    pub const FALL_SPEED: f32 = 10.0;

    /// Spawn interval range in ticks, divided by difficulty
    pub const SPAWN_INTERVAL_MIN: f32 = 30.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 60.0;

    /// Centre distance below which player and obstacle collide
    pub const COLLISION_RADIUS: f32 = 50.0;

    pub const INITIAL_DIFFICULTY: f32 = 1.0;
    /// Difficulty gained per tick
    pub const DIFFICULTY_RATE: f32 = 0.0005;

    /// Background grid
    pub const GRID_SPACING: f32 = 50.0;
    pub const GRID_SCROLL_SPEED: f32 = 5.0;
}
