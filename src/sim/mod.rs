//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod lanes;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::within_radius;
pub use lanes::{Lane, LaneError, LaneSet};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, SessionError, Viewport};
pub use tick::{Command, TickInput, tick};
