//! Game state and core simulation types
//!
//! Everything a frame needs to draw, and everything a tick mutates, lives in
//! [`GameState`]. Nothing here touches the renderer or the browser.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lanes::{Lane, LaneError, LaneSet};
use super::spawner::Spawner;
use crate::tuning::{ConfigError, Tuning};

/// Why a session could not be set up
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("viewport must have a positive size, got {width}x{height}")]
    EmptyViewport { width: f32, height: f32 },
    #[error(transparent)]
    Tuning(#[from] ConfigError),
    #[error(transparent)]
    Lanes(#[from] LaneError),
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick or command, for audio/HUD to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, lane: Lane },
    /// Obstacle fell off the bottom; `score` is the new total
    ObstacleCleared { id: u32, score: u64 },
    GameOver { score: u64, difficulty: f32, obstacle: u32 },
    Restarted,
}

/// Play area in pixels, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A hidden or collapsed canvas reports zero (or NaN) size
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The player's marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Target lane
    pub lane: Lane,
    /// Smoothed position; `y` never changes
    pub pos: Vec2,
}

impl Player {
    pub fn new(lanes: &LaneSet, y: f32) -> Self {
        let lane = Lane::Center;
        Self {
            lane,
            pos: Vec2::new(lanes.x(lane), y),
        }
    }

    /// Move a fraction of the way toward the target lane
    pub fn approach(&mut self, lanes: &LaneSet, smoothing: f32) {
        let target = lanes.x(self.lane);
        self.pos.x += (target - self.pos.x) * smoothing;
    }
}

/// A falling obstacle; `pos.x` is fixed to its lane at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, lane: Lane, lanes: &LaneSet, y: f32) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(lanes.x(lane), y),
        }
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub lanes: LaneSet,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Scales fall speed up and spawn interval down; never below 1
    pub difficulty: f32,
    pub spawner: Spawner,
    pub phase: GamePhase,
    /// Background grid scroll, in `[0, grid_spacing)`; keeps going across restarts
    pub grid_offset: f32,
    /// Spawn RNG; survives restarts so each run differs
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(viewport: Viewport, seed: u64) -> Result<Self, SessionError> {
        Self::with_tuning(viewport, seed, Tuning::default())
    }

    /// Create a new session. Rejects an empty viewport and any tuning that
    /// fails [`Tuning::validate`].
    pub fn with_tuning(
        viewport: Viewport,
        seed: u64,
        tuning: Tuning,
    ) -> Result<Self, SessionError> {
        if viewport.is_empty() {
            return Err(SessionError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        tuning.validate()?;
        let lanes = LaneSet::centered(viewport.width, tuning.lane_spacing)?;
        let player = Player::new(&lanes, viewport.height - tuning.player_bottom_offset);
        Ok(Self {
            seed,
            player,
            lanes,
            viewport,
            obstacles: Vec::new(),
            score: 0,
            difficulty: tuning.initial_difficulty,
            spawner: Spawner::default(),
            phase: GamePhase::Playing,
            grid_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        })
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an obstacle at the given lane and height
    pub fn spawn_obstacle(&mut self, lane: Lane, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, lane, &self.lanes, y));
        id
    }

    /// Obstacles past this height are culled
    pub fn cull_y(&self) -> f32 {
        self.viewport.height + self.tuning.cull_margin
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Shift the target lane left. Ignored (returns false) outside Playing.
    pub fn move_left(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.player.lane = self.player.lane.left();
        true
    }

    /// Shift the target lane right. Ignored (returns false) outside Playing.
    pub fn move_right(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.player.lane = self.player.lane.right();
        true
    }

    /// Start a fresh run. Only accepted from GameOver; a no-op while Playing.
    pub fn restart(&mut self) -> Option<GameEvent> {
        if !self.is_game_over() {
            return None;
        }
        self.reset();
        log::info!("Restarted (seed {})", self.seed);
        Some(GameEvent::Restarted)
    }

    /// Return score, difficulty, player, obstacles, and spawn timer to their
    /// start-of-session values. The RNG and the grid scroll keep running.
    fn reset(&mut self) {
        self.score = 0;
        self.difficulty = self.tuning.initial_difficulty;
        self.player = Player::new(
            &self.lanes,
            self.viewport.height - self.tuning.player_bottom_offset,
        );
        self.obstacles.clear();
        self.spawner = Spawner::default();
        self.phase = GamePhase::Playing;
    }
}
