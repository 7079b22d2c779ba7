//! Platform abstraction layer
//!
//! Turns what the browser hands us into what the simulation expects:
//! - Frame timestamps into 60-units-per-second deltas
//! - Key names into commands

use crate::consts::{MAX_FRAME_DELTA, NOMINAL_FPS};
use crate::sim::{Command, TickInput};

/// Delta units elapsed between two `requestAnimationFrame` timestamps (ms).
///
/// The first frame counts as exactly one unit. Large gaps (hidden tab,
/// debugger) are clamped so obstacles never jump through the player.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> f32 {
    let Some(last) = last_ms else {
        return 1.0;
    };
    let elapsed_secs = ((now_ms - last) / 1000.0).max(0.0) as f32;
    (elapsed_secs * NOMINAL_FPS).min(MAX_FRAME_DELTA)
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        _ => None,
    }
}

/// Queue a key press for the next tick. Returns whether the key was used.
pub fn queue_key(key: &str, input: &mut TickInput) -> bool {
    match command_for_key(key) {
        Some(command) => {
            input.push(command);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one_unit() {
        assert_eq!(frame_delta(None, 12345.0), 1.0);
    }

    #[test]
    fn test_sixty_hz_frame_is_one_unit() {
        let dt = frame_delta(Some(1000.0), 1000.0 + 1000.0 / 60.0);
        assert!((dt - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        assert_eq!(frame_delta(Some(0.0), 5000.0), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        assert_eq!(frame_delta(Some(500.0), 400.0), 0.0);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(command_for_key("x"), None);
    }

    #[test]
    fn test_key_presses_between_frames_all_queue() {
        let mut input = TickInput::default();
        assert!(queue_key("ArrowLeft", &mut input));
        assert!(!queue_key("Space", &mut input));
        assert!(queue_key("ArrowLeft", &mut input));
        assert!(queue_key("ArrowRight", &mut input));
        assert_eq!(
            input.commands,
            vec![Command::MoveLeft, Command::MoveLeft, Command::MoveRight]
        );
    }
}
