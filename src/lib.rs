//! Pixel Arcade - visitor mini-games for the agency site
//!
//! Core modules:
//! - `sim`: Deterministic simulations (Pixel Snake, SEO Word Hunter)
//! - `platform`: Timers, input mapping and the session/arcade host layer
//! - `persistence`: Key-value storage (memory, file, LocalStorage)
//! - `renderer`: Pixel layout and Canvas 2D drawing
//! - `audio`: Procedural sound effects

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use platform::{Arcade, Command, GameKind};
pub use settings::{HunterTuning, Settings, SnakeTuning};

/// Game configuration constants
pub mod consts {
    /// Grid side length in cells
    pub const GRID_SIZE: i32 = 20;
    /// Rendered size of one grid cell (px)
    pub const CELL_SIZE: f32 = 20.0;
    /// Snake tick interval at the start of a run (ms)
    pub const INITIAL_TICK_MS: u32 = 150;
    /// Tick interval reduction per reward eaten (ms)
    pub const TICK_STEP_MS: u32 = 2;
    /// Fastest allowed tick interval (ms)
    pub const MIN_TICK_MS: u32 = 50;
    /// Points for each reward or caught word
    pub const POINTS_PER_CATCH: u32 = 10;

    /// Word Hunter viewport (px)
    pub const VIEWPORT_WIDTH: f32 = 600.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;
    /// Spawn height, just above the visible top edge
    pub const WORD_SPAWN_Y: f32 = -50.0;
    /// Horizontal room reserved for a rendered word
    pub const WORD_WIDTH: f32 = 100.0;
    /// Fall speed is `BASE + level * PER_LEVEL` px per frame
    pub const BASE_FALL_SPEED: f32 = 1.0;
    pub const FALL_SPEED_PER_LEVEL: f32 = 0.2;
    pub const START_LIVES: u8 = 3;
    /// Score step that triggers a level up
    pub const POINTS_PER_LEVEL: u32 = 50;
    /// Spawn period is `max(MIN, BASE - level * STEP)` ms
    pub const SPAWN_BASE_MS: u32 = 2000;
    pub const SPAWN_STEP_MS: u32 = 100;
    pub const SPAWN_MIN_MS: u32 = 1000;

    /// Maximum timer fires per host update (prevents spiral of death)
    pub const MAX_CATCHUP: u32 = 8;
    /// Longest frame delta accepted from the host (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
}
