//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Transitions only run from a tick, frame or input call
//! - Seeded RNG only
//! - No timers, rendering or platform dependencies

pub mod autopilot;
pub mod hunter;
pub mod snake;
pub mod state;

pub use autopilot::{hunter_autopilot, snake_autopilot};
pub use hunter::{FallingWord, HunterState, KEYWORDS, advance, spawn_word};
pub use snake::{Cell, Heading, SnakeState, tick};
pub use state::{CrashCause, GameEvent, RunState};
