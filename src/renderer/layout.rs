//! Pixel geometry and HUD text shared by every drawing backend

use crate::consts::CELL_SIZE;
use crate::sim::{Cell, HunterState, RunState, SnakeState};

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Body segment rect: full cell minus a 2 px gutter
pub fn segment_rect(cell: Cell) -> Rect {
    Rect {
        x: cell.x as f32 * CELL_SIZE,
        y: cell.y as f32 * CELL_SIZE,
        w: CELL_SIZE - 2.0,
        h: CELL_SIZE - 2.0,
    }
}

/// Reward rect: inset 2 px on every side
pub fn reward_rect(cell: Cell) -> Rect {
    Rect {
        x: cell.x as f32 * CELL_SIZE + 2.0,
        y: cell.y as f32 * CELL_SIZE + 2.0,
        w: CELL_SIZE - 4.0,
        h: CELL_SIZE - 4.0,
    }
}

/// Canvas side for a grid
pub fn board_size(grid_size: i32) -> f32 {
    grid_size as f32 * CELL_SIZE
}

/// Overlay text for a phase, `None` while playing
pub fn snake_overlay(state: &SnakeState) -> Option<String> {
    match state.phase {
        RunState::NotStarted => Some("Press Space to play".to_string()),
        RunState::Running => None,
        RunState::Over => Some(format!("Game Over! Score: {}", state.score)),
    }
}

pub fn hunter_overlay(state: &HunterState) -> Option<String> {
    match state.phase {
        RunState::NotStarted => Some("Press Enter to start".to_string()),
        RunState::Running => None,
        RunState::Over => Some(format!("System Crash! Final Score: {}", state.score)),
    }
}

/// Lives as filled/empty pips out of the starting count
pub fn lives_pips(lives: u8, start_lives: u8) -> String {
    (0..start_lives)
        .map(|i| if i < lives { '●' } else { '○' })
        .collect()
}
