//! The three fixed lanes shared by the player and obstacles

use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::LANE_COUNT;

/// One of the three lanes, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    /// Position in [`Lane::ALL`] (0..=2)
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Neighbour to the left, clamped at the leftmost lane
    pub fn left(self) -> Self {
        match self {
            Lane::Left | Lane::Center => Lane::Left,
            Lane::Right => Lane::Center,
        }
    }

    /// Neighbour to the right, clamped at the rightmost lane
    pub fn right(self) -> Self {
        match self {
            Lane::Left => Lane::Center,
            Lane::Center | Lane::Right => Lane::Right,
        }
    }
}

/// Uniform over all three lanes
impl Distribution<Lane> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Lane {
        Lane::ALL[rng.random_range(0..LANE_COUNT)]
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaneError {
    #[error("lane positions must be finite, got {0:?}")]
    NonFinite([f32; LANE_COUNT]),
    #[error("lane positions must be strictly increasing, got {0:?}")]
    NotIncreasing([f32; LANE_COUNT]),
}

/// Horizontal centre of each lane, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    xs: [f32; LANE_COUNT],
}

impl LaneSet {
    pub fn new(xs: [f32; LANE_COUNT]) -> Result<Self, LaneError> {
        if xs.iter().any(|x| !x.is_finite()) {
            return Err(LaneError::NonFinite(xs));
        }
        if xs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(LaneError::NotIncreasing(xs));
        }
        Ok(Self { xs })
    }

    /// Lanes centred in a viewport of the given width
    pub fn centered(viewport_width: f32, spacing: f32) -> Result<Self, LaneError> {
        let mid = viewport_width / 2.0;
        Self::new([mid - spacing, mid, mid + spacing])
    }

    #[inline]
    pub fn x(&self, lane: Lane) -> f32 {
        self.xs[lane.index()]
    }

    pub fn xs(&self) -> &[f32; LANE_COUNT] {
        &self.xs
    }
}
