//! Shared run lifecycle and event types
//!
//! Both games follow `NotStarted -> Running -> Over -> (start) -> Running`.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Mounted, waiting for the first start
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended (collision or out of lives); frozen until restart
    Over,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn is_over(self) -> bool {
        self == RunState::Over
    }
}

/// Why a snake run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Head left the grid
    Wall,
    /// Head hit the body
    SelfHit,
}

/// Things that happened during a transition, drained by the host
/// for sound, HUD and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Snake ate the reward
    RewardEaten { score: u32 },
    /// Snake crashed
    Crashed { cause: CrashCause },
    /// Run ended above the stored record
    NewHighScore { score: u32 },
    /// A falling word was typed
    WordCaught { text: String, score: u32 },
    /// Words fell past the bottom in one step
    WordsMissed { count: u32, lives: u8 },
    /// Difficulty increased
    LevelUp { level: u32 },
    /// Terminal signal with the final score
    GameOver { final_score: u32 },
}
