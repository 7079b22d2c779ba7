//! Data-driven game balance
//!
//! Every design value the simulation reads lives in [`Tuning`]. Defaults come
//! from [`crate::consts`]; a JSON document may override any subset of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tuning JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance values (units are viewport pixels and 60 Hz ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_spacing: f32,
    pub player_bottom_offset: f32,
    pub player_radius: f32,
    pub lane_smoothing: f32,
    pub obstacle_half_size: f32,
    pub obstacle_spawn_y: f32,
    pub cull_margin: f32,
    pub fall_speed: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub collision_radius: f32,
    pub initial_difficulty: f32,
    pub difficulty_rate: f32,
    pub grid_spacing: f32,
    pub grid_scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_spacing: LANE_SPACING,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            player_radius: PLAYER_RADIUS,
            lane_smoothing: LANE_SMOOTHING,
            obstacle_half_size: OBSTACLE_HALF_SIZE,
            obstacle_spawn_y: OBSTACLE_SPAWN_Y,
            cull_margin: CULL_MARGIN,
            fall_speed: FALL_SPEED,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            collision_radius: COLLISION_RADIUS,
            initial_difficulty: INITIAL_DIFFICULTY,
            difficulty_rate: DIFFICULTY_RATE,
            grid_spacing: GRID_SPACING,
            grid_scroll_speed: GRID_SCROLL_SPEED,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }

        check(self.lane_spacing > 0.0, "lane_spacing", "must be positive")?;
        check(
            self.lane_smoothing > 0.0 && self.lane_smoothing <= 1.0,
            "lane_smoothing",
            "must be in (0, 1]",
        )?;
        check(self.fall_speed > 0.0, "fall_speed", "must be positive")?;
        check(
            self.spawn_interval_min > 0.0,
            "spawn_interval_min",
            "must be positive",
        )?;
        check(
            self.spawn_interval_max > self.spawn_interval_min,
            "spawn_interval_max",
            "must exceed spawn_interval_min",
        )?;
        check(
            self.collision_radius > 0.0,
            "collision_radius",
            "must be positive",
        )?;
        check(
            self.initial_difficulty >= 1.0,
            "initial_difficulty",
            "must be at least 1",
        )?;
        check(
            self.difficulty_rate >= 0.0,
            "difficulty_rate",
            "must not be negative",
        )?;
        check(self.cull_margin >= 0.0, "cull_margin", "must not be negative")?;
        check(self.grid_spacing > 0.0, "grid_spacing", "must be positive")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "fall_speed": 12.5 }"#).unwrap();
        assert_eq!(tuning.fall_speed, 12.5);
        assert_eq!(tuning.lane_spacing, LANE_SPACING);
        assert_eq!(tuning.collision_radius, COLLISION_RADIUS);
    }

    #[test]
    fn test_rejects_inverted_spawn_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval_min": 60, "spawn_interval_max": 30 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn_interval_max",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_overshooting_smoothing() {
        let err = Tuning::from_json(r#"{ "lane_smoothing": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "lane_smoothing",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
