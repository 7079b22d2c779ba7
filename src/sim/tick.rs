//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one frame-driver delta.

use super::collision::within_radius;
use super::lanes::Lane;
use super::state::{GameEvent, GamePhase, GameState};

/// Player commands the front end can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Play Again (only honoured from GameOver)
    Restart,
}

/// Commands gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Applied in arrival order at the start of the next tick
    pub commands: Vec<Command>,
    /// Demo mode - dodge automatically
    pub autopilot: bool,
}

impl TickInput {
    /// Input carrying just these commands
    pub fn with_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Advance the game by `dt` delta units (1.0 = one frame at 60 Hz).
///
/// Queued commands are applied first, one by one in arrival order, then the
/// step runs in a fixed order: difficulty, player smoothing, spawning,
/// obstacle fall + collision, cull.
/// The first obstacle (in spawn order) found within the collision radius ends
/// the run, but the pass still finishes moving and culling every obstacle
/// before the phase flips. While in GameOver the state is frozen.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for command in &input.commands {
        match command {
            Command::MoveLeft => {
                state.move_left();
            }
            Command::MoveRight => {
                state.move_right();
            }
            Command::Restart => events.extend(state.restart()),
        }
    }

    if state.phase == GamePhase::GameOver {
        return events;
    }

    if input.autopilot {
        if let Some(lane) = autopilot_lane(state) {
            state.player.lane = lane;
        }
    }

    let dt = dt.max(0.0);

    // Difficulty ramps up before anything reads it this tick
    state.difficulty += state.tuning.difficulty_rate * dt;

    state.grid_offset =
        (state.grid_offset + state.tuning.grid_scroll_speed * dt) % state.tuning.grid_spacing;

    state.player.approach(&state.lanes, state.tuning.lane_smoothing);

    if let Some(lane) = state
        .spawner
        .update(&mut state.rng, dt, state.difficulty, &state.tuning)
    {
        let id = state.spawn_obstacle(lane, state.tuning.obstacle_spawn_y);
        log::debug!("Spawned obstacle {id} in {lane:?}");
        events.push(GameEvent::ObstacleSpawned { id, lane });
    }

    let fall = state.tuning.fall_speed * dt * state.difficulty;
    let player_pos = state.player.pos;
    let radius = state.tuning.collision_radius;
    let mut hit = None;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += fall;
        if hit.is_none() && within_radius(player_pos, obstacle.pos, radius) {
            hit = Some(obstacle.id);
        }
    }

    let cull_y = state.cull_y();
    let mut cleared = Vec::new();
    state.obstacles.retain(|o| {
        if o.pos.y > cull_y {
            cleared.push(o.id);
            false
        } else {
            true
        }
    });
    for id in cleared {
        state.score += 1;
        log::debug!("Cleared obstacle {id}, score {}", state.score);
        events.push(GameEvent::ObstacleCleared {
            id,
            score: state.score,
        });
    }

    if let Some(obstacle) = hit {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: hit obstacle {obstacle}, score {}, difficulty {:.3}",
            state.score,
            state.difficulty
        );
        events.push(GameEvent::GameOver {
            score: state.score,
            difficulty: state.difficulty,
            obstacle,
        });
    }

    events
}

/// Pick a lane to dodge into when the current one has an obstacle coming.
///
/// Only adjacent lanes are considered. Returns `None` when staying put is
/// fine or no neighbour is clear yet.
fn autopilot_lane(state: &GameState) -> Option<Lane> {
    let tuning = &state.tuning;
    let player_y = state.player.pos.y;
    let lookahead =
        tuning.collision_radius * 4.0 + tuning.fall_speed * state.difficulty * 4.0;

    let blocked = |lane: Lane| {
        state.obstacles.iter().any(|o| {
            o.lane == lane
                && o.pos.y > player_y - lookahead
                && o.pos.y < player_y + tuning.collision_radius
        })
    };

    let current = state.player.lane;
    if !blocked(current) {
        return None;
    }
    [current.left(), current.right()]
        .into_iter()
        .find(|&lane| lane != current && !blocked(lane))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(Viewport::new(800.0, 600.0), seed).unwrap()
    }

    /// Compare everything a tick could touch
    fn assert_same(a: &GameState, b: &GameState) {
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.difficulty, b.difficulty);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.spawner, b.spawner);
        assert_eq!(a.grid_offset, b.grid_offset);
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut state = new_state(12345);
        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(events[0], GameEvent::ObstacleSpawned { .. }));
        // Spawned above the top and already moved once
        assert_eq!(state.obstacles[0].pos.y, -50.0 + 10.0 * state.difficulty);
    }

    #[test]
    fn test_obstacle_on_player_ends_game() {
        let mut state = new_state(1);
        let pos = state.player.pos;
        let id = state.spawn_obstacle(state.player.lane, pos.y);

        let events = tick(&mut state, &TickInput::default(), 1.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver { obstacle, .. } if *obstacle == id
        )));
    }

    #[test]
    fn test_first_hit_in_spawn_order_wins() {
        let mut state = new_state(1);
        let y = state.player.pos.y;
        let first = state.spawn_obstacle(Lane::Center, y - 20.0);
        let _second = state.spawn_obstacle(Lane::Center, y - 15.0);

        let events = tick(&mut state, &TickInput::default(), 1.0);
        let game_overs: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { obstacle, .. } => Some(*obstacle),
                _ => None,
            })
            .collect();
        assert_eq!(game_overs, vec![first]);
    }

    #[test]
    fn test_collision_tick_still_culls() {
        let mut state = new_state(1);
        let y = state.player.pos.y;
        state.spawn_obstacle(Lane::Left, state.cull_y() - 1.0);
        state.spawn_obstacle(Lane::Center, y);

        let events = tick(&mut state, &TickInput::default(), 1.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
        assert!(state.obstacles.iter().all(|o| o.pos.y <= state.cull_y()));
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver { score: 1, .. })
        ));
    }

    #[test]
    fn test_cull_scores_each_obstacle() {
        let mut state = new_state(3);
        let cull_y = state.cull_y();
        state.spawn_obstacle(Lane::Left, cull_y - 5.0);
        state.spawn_obstacle(Lane::Right, cull_y - 2.0);
        state.spawn_obstacle(Lane::Right, 100.0);

        tick(&mut state, &TickInput::default(), 1.0);

        assert_eq!(state.score, 2);
        // The survivor plus this tick's spawn
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_game_over_freezes() {
        let mut state = new_state(5);
        state.phase = GamePhase::GameOver;
        state.spawn_obstacle(Lane::Left, 100.0);
        let before = state.clone();

        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default(), 1.0);
            assert!(events.is_empty());
        }
        assert_same(&state, &before);
    }

    #[test]
    fn test_lane_commands_ignored_when_game_over() {
        let mut state = new_state(5);
        state.phase = GamePhase::GameOver;
        let input = TickInput::with_commands([Command::MoveLeft]);
        tick(&mut state, &input, 1.0);
        assert_eq!(state.player.lane, Lane::Center);
    }

    #[test]
    fn test_every_queued_move_applies() {
        let mut state = new_state(5);
        state.player.lane = Lane::Right;
        let input = TickInput::with_commands([Command::MoveLeft, Command::MoveLeft]);
        tick(&mut state, &input, 1.0);
        assert_eq!(state.player.lane, Lane::Left);
    }

    #[test]
    fn test_queued_moves_keep_their_order() {
        let mut state = new_state(5);
        state.player.lane = Lane::Right;
        // Right is clamped, then left takes effect
        let input = TickInput::with_commands([Command::MoveRight, Command::MoveLeft]);
        tick(&mut state, &input, 1.0);
        assert_eq!(state.player.lane, Lane::Center);

        // Left first, then right brings it back
        let input = TickInput::with_commands([Command::MoveLeft, Command::MoveRight]);
        tick(&mut state, &input, 1.0);
        assert_eq!(state.player.lane, Lane::Center);
    }

    #[test]
    fn test_restart_then_move_in_one_frame() {
        let mut state = new_state(5);
        state.phase = GamePhase::GameOver;
        let input =
            TickInput::with_commands([Command::MoveLeft, Command::Restart, Command::MoveLeft]);
        let events = tick(&mut state, &input, 1.0);
        assert_eq!(events[0], GameEvent::Restarted);
        // The move before the restart was ignored, the one after counts
        assert_eq!(state.player.lane, Lane::Left);
    }

    #[test]
    fn test_restart_input() {
        let mut state = new_state(8);
        state.phase = GamePhase::GameOver;
        state.score = 9;
        let input = TickInput::with_commands([Command::Restart]);
        let events = tick(&mut state, &input, 1.0);
        assert_eq!(events[0], GameEvent::Restarted);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_input_while_playing_ignored() {
        let mut state = new_state(8);
        state.score = 4;
        let input = TickInput::with_commands([Command::Restart]);
        let events = tick(&mut state, &input, 1.0);
        assert!(!events.contains(&GameEvent::Restarted));
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_player_glides_to_lane() {
        let mut state = new_state(2);
        let target = state.lanes.x(Lane::Right);
        state.move_right();
        tick(&mut state, &TickInput::default(), 1.0);
        // One step covers 20% of the 200px gap
        assert!((state.player.pos.x - 440.0).abs() < 1e-3);
        for _ in 0..60 {
            state.obstacles.clear();
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert!((state.player.pos.x - target).abs() < 0.01);
    }

    #[test]
    fn test_grid_offset_wraps() {
        let mut state = new_state(2);
        for _ in 0..11 {
            state.obstacles.clear();
            tick(&mut state, &TickInput::default(), 1.0);
        }
        // 11 * 5 = 55 wraps past the 50px spacing
        assert!((state.grid_offset - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_autopilot_dodges() {
        let mut state = new_state(4);
        let y = state.player.pos.y;
        state.spawn_obstacle(Lane::Center, y - 150.0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0);
        assert_ne!(state.player.lane, Lane::Center);
    }

    #[test]
    fn test_autopilot_stays_when_clear() {
        let state = new_state(4);
        assert_eq!(autopilot_lane(&state), None);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput::with_commands([Command::MoveLeft]),
            TickInput::default(),
            TickInput::with_commands([Command::MoveRight]),
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                let e1 = tick(&mut state1, input, 1.0);
                let e2 = tick(&mut state2, input, 1.0);
                assert_eq!(e1, e2);
            }
        }
        assert_same(&state1, &state2);
    }

    #[test]
    fn test_custom_tuning() {
        let tuning = Tuning {
            fall_speed: 20.0,
            difficulty_rate: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(Viewport::new(800.0, 600.0), 1, tuning).unwrap();
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.obstacles[0].pos.y, -30.0);
    }

    proptest! {
        #[test]
        fn prop_difficulty_never_decreases(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0.0f32..4.0, 1..200),
        ) {
            let mut state = new_state(seed);
            let mut last = state.difficulty;
            for dt in deltas {
                tick(&mut state, &TickInput { autopilot: true, ..Default::default() }, dt);
                prop_assert!(state.difficulty >= last);
                prop_assert!(state.difficulty >= 1.0);
                last = state.difficulty;
            }
        }

        #[test]
        fn prop_score_only_grows_and_cull_is_exhaustive(
            seed in any::<u64>(),
            moves in prop::collection::vec(prop::collection::vec(0u8..3, 0..3), 1..300),
        ) {
            let mut state = new_state(seed);
            let mut last_score = 0;
            for frame in moves {
                let input = TickInput::with_commands(frame.into_iter().filter_map(|m| match m {
                    1 => Some(Command::MoveLeft),
                    2 => Some(Command::MoveRight),
                    _ => None,
                }));
                let events = tick(&mut state, &input, 1.0);
                let cleared = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::ObstacleCleared { .. }))
                    .count() as u64;
                prop_assert_eq!(state.score, last_score + cleared);
                prop_assert!(state.obstacles.iter().all(|o| o.pos.y <= state.cull_y()));
                last_score = state.score;
            }
        }

        #[test]
        fn prop_player_never_overshoots(
            start_x in 0.0f32..800.0,
            lane_index in 0usize..3,
        ) {
            let mut state = new_state(0);
            state.player.pos.x = start_x;
            state.player.lane = Lane::from_index(lane_index).unwrap();
            let target = state.lanes.x(state.player.lane);
            for _ in 0..30 {
                let before = state.player.pos.x - target;
                state.obstacles.clear();
                tick(&mut state, &TickInput::default(), 1.0);
                let after = state.player.pos.x - target;
                prop_assert!(after.abs() <= before.abs());
                prop_assert!(after * before >= 0.0);
            }
        }

        #[test]
        fn prop_game_over_is_frozen(seed in any::<u64>(), ticks in 1usize..50, dt in 0.0f32..4.0) {
            let mut state = new_state(seed);
            let y = state.player.pos.y;
            state.spawn_obstacle(state.player.lane, y);
            tick(&mut state, &TickInput::default(), 1.0);
            prop_assert_eq!(state.phase, GamePhase::GameOver);

            let frozen = state.clone();
            for _ in 0..ticks {
                prop_assert!(tick(&mut state, &TickInput::default(), dt).is_empty());
            }
            prop_assert_eq!(state.score, frozen.score);
            prop_assert_eq!(state.difficulty, frozen.difficulty);
            prop_assert_eq!(state.player, frozen.player);
            prop_assert_eq!(&state.obstacles, &frozen.obstacles);
        }
    }
}
