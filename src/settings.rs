//! Game settings and tuning
//!
//! Persisted separately from high scores in the key-value store.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{KeyValueStore, StoreError};

/// Pixel Snake balance values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    /// Grid side length (cells)
    pub grid_size: i32,
    /// Head position when a run starts
    pub start_cell: IVec2,
    /// Reward shown before the first run starts
    pub initial_reward: IVec2,
    pub initial_tick_ms: u32,
    pub tick_step_ms: u32,
    pub min_tick_ms: u32,
    pub points_per_reward: u32,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            start_cell: IVec2::new(10, 10),
            initial_reward: IVec2::new(15, 10),
            initial_tick_ms: INITIAL_TICK_MS,
            tick_step_ms: TICK_STEP_MS,
            min_tick_ms: MIN_TICK_MS,
            points_per_reward: POINTS_PER_CATCH,
        }
    }
}

/// SEO Word Hunter balance values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterTuning {
    pub viewport_width: f32,
    /// Words below this line are missed
    pub viewport_height: f32,
    pub spawn_y: f32,
    pub word_width: f32,
    pub base_fall_speed: f32,
    pub fall_speed_per_level: f32,
    pub start_lives: u8,
    pub points_per_word: u32,
    pub points_per_level: u32,
    pub spawn_base_ms: u32,
    pub spawn_step_ms: u32,
    pub spawn_min_ms: u32,
}

impl Default for HunterTuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            spawn_y: WORD_SPAWN_Y,
            word_width: WORD_WIDTH,
            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_per_level: FALL_SPEED_PER_LEVEL,
            start_lives: START_LIVES,
            points_per_word: POINTS_PER_CATCH,
            points_per_level: POINTS_PER_LEVEL,
            spawn_base_ms: SPAWN_BASE_MS,
            spawn_step_ms: SPAWN_STEP_MS,
            spawn_min_ms: SPAWN_MIN_MS,
        }
    }
}

impl SnakeTuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size <= 0 {
            return Err(format!("grid_size must be positive, got {}", self.grid_size));
        }
        let cells = 0..self.grid_size;
        let inside = |c: IVec2| cells.contains(&c.x) && cells.contains(&c.y);
        if !inside(self.start_cell) {
            return Err(format!("start_cell {} is off the grid", self.start_cell));
        }
        if !inside(self.initial_reward) {
            return Err(format!("initial_reward {} is off the grid", self.initial_reward));
        }
        if self.min_tick_ms == 0 {
            return Err("min_tick_ms must be positive".to_string());
        }
        Ok(())
    }
}

impl HunterTuning {
    /// Reject values the simulation cannot run with. Words must always
    /// move down, so both fall-speed terms are checked.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("base_fall_speed", self.base_fall_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        let non_negative = [
            ("word_width", self.word_width),
            ("fall_speed_per_level", self.fall_speed_per_level),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        if !self.spawn_y.is_finite() {
            return Err(format!("spawn_y must be finite, got {}", self.spawn_y));
        }
        if self.start_lives == 0 {
            return Err("start_lives must be positive".to_string());
        }
        if self.points_per_level == 0 {
            return Err("points_per_level must be positive".to_string());
        }
        if self.spawn_min_ms == 0 {
            return Err("spawn_min_ms must be positive".to_string());
        }
        Ok(())
    }

    /// Spawn period for a level, `max(min, base - level * step)`
    pub fn spawn_interval_ms(&self, level: u32) -> u32 {
        self.spawn_base_ms
            .saturating_sub(level.saturating_mul(self.spawn_step_ms))
            .max(self.spawn_min_ms)
    }

    /// Fall speed given to words spawned at `level`
    pub fn fall_speed(&self, level: u32) -> f32 {
        self.base_fall_speed + level as f32 * self.fall_speed_per_level
    }
}

/// Arcade settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snake: SnakeTuning,
    pub hunter: HunterTuning,

    // === Audio ===
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Demo ===
    /// Start the autopilot after this long without input (0 = never)
    pub idle_after_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snake: SnakeTuning::default(),
            hunter: HunterTuning::default(),
            sound: true,
            master_volume: 0.8,
            idle_after_ms: 0,
        }
    }
}

impl Settings {
    /// Store key
    pub const STORAGE_KEY: &'static str = "pixel_arcade_settings";

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from store");
                settings.validated()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn try_load(store: &dyn KeyValueStore) -> Result<Option<Self>, StoreError> {
        let Some(json) = store.get(Self::STORAGE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Replace any unplayable tuning with its defaults
    pub fn validated(mut self) -> Self {
        if let Err(e) = self.snake.validate() {
            log::warn!("Bad snake tuning ({}), using defaults", e);
            self.snake = SnakeTuning::default();
        }
        if let Err(e) = self.hunter.validate() {
            log::warn!("Bad word hunter tuning ({}), using defaults", e);
            self.hunter = HunterTuning::default();
        }
        self
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Volume actually applied to effects
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
