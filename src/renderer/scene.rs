//! Builds the frame's vertex list from the game state
//!
//! Draw order: scrolling grid, lane guides, obstacles, player.

use glam::Vec2;

use super::shapes::{circle, line, rect};
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

const GRID_LINE_WIDTH: f32 = 2.0;
const LANE_LINE_WIDTH: f32 = 4.0;
const PLAYER_SEGMENTS: u32 = 32;

/// Everything the presentation layer needs to draw one frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);
    let width = state.viewport.width;
    let height = state.viewport.height;

    // Horizontal grid lines drift downward with `grid_offset`
    let spacing = state.tuning.grid_spacing;
    let mut y = -spacing + state.grid_offset;
    while y < height + spacing {
        vertices.extend(line(
            Vec2::new(0.0, y),
            Vec2::new(width, y),
            GRID_LINE_WIDTH,
            colors::GRID,
        ));
        y += spacing;
    }

    for &x in state.lanes.xs() {
        vertices.extend(line(
            Vec2::new(x, 0.0),
            Vec2::new(x, height),
            LANE_LINE_WIDTH,
            colors::LANE,
        ));
    }

    let half = Vec2::splat(state.tuning.obstacle_half_size);
    for obstacle in &state.obstacles {
        vertices.extend(rect(obstacle.pos, half, colors::OBSTACLE));
    }

    vertices.extend(circle(
        state.player.pos,
        state.tuning.player_radius,
        colors::PLAYER,
        PLAYER_SEGMENTS,
    ));

    vertices
}
