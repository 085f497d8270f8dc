//! Platform abstraction layer
//!
//! Glue between the pure simulations and whatever hosts them:
//! - Time (cancellable interval timers fed by frame deltas)
//! - Input (key names to commands)
//! - Sessions (one game's state plus its timers, and the arcade menu)

pub mod input;
pub mod session;
pub mod timer;

pub use input::Command;
pub use session::{ActiveGame, Arcade, GameKind, HunterSession, SnakeSession};
pub use timer::IntervalTimer;
