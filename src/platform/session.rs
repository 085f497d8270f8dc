//! Scheduler adapters and the arcade menu
//!
//! A session owns one game's state and every timer that can mutate it.
//! Ending a run cancels the timers; dropping a session drops them, so no
//! callback outlives the run it was scheduled for.

use crate::consts::MAX_FRAME_MS;
use crate::highscores::{HighScore, SNAKE_HIGH_SCORE_KEY};
use crate::persistence::KeyValueStore;
use crate::settings::{HunterTuning, Settings, SnakeTuning};
use crate::sim::{
    GameEvent, Heading, HunterState, SnakeState, advance, hunter_autopilot, snake_autopilot,
    spawn_word, tick,
};

use super::input::Command;
use super::timer::IntervalTimer;

/// Pixel Snake driven by a fixed-delay tick timer
#[derive(Debug)]
pub struct SnakeSession {
    pub state: SnakeState,
    timer: Option<IntervalTimer>,
    high_score: HighScore,
}

impl SnakeSession {
    /// Mount the game, reading the stored high score once
    pub fn new(tuning: SnakeTuning, store: &dyn KeyValueStore, seed: u64) -> Self {
        let high_score = HighScore::load(SNAKE_HIGH_SCORE_KEY, store);
        Self {
            state: SnakeState::new(tuning, high_score.best(), seed),
            timer: None,
            high_score,
        }
    }

    /// Begin a run from the start or game-over screen; a running game is left alone
    pub fn start(&mut self) {
        if self.state.phase.is_running() {
            return;
        }
        self.state.start();
        self.timer = Some(IntervalTimer::new(self.state.tick_interval_ms));
    }

    pub fn steer(&mut self, heading: Heading) -> bool {
        self.state.steer(heading)
    }

    /// True while a tick timer is armed
    pub fn is_scheduled(&self) -> bool {
        self.timer.as_ref().is_some_and(IntervalTimer::is_active)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    /// Cancel the tick timer without touching run state
    pub fn stop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Run every tick due after `dt_ms`, returning the events produced
    pub fn update(&mut self, dt_ms: f64, store: &mut dyn KeyValueStore) -> Vec<GameEvent> {
        let Some(timer) = self.timer.as_mut() else {
            return Vec::new();
        };
        timer.accumulate(dt_ms);

        while timer.take_due() {
            let interval = self.state.tick_interval_ms;
            tick(&mut self.state);
            if self.state.phase.is_over() {
                timer.cancel();
                break;
            }
            if self.state.tick_interval_ms != interval {
                timer.set_period(self.state.tick_interval_ms);
            }
        }
        if !timer.is_active() {
            self.timer = None;
        }

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewHighScore { score } = event {
                self.high_score.record(*score, store);
            }
        }
        events
    }
}

/// Word Hunter driven by per-frame advance plus a spawn timer
#[derive(Debug)]
pub struct HunterSession {
    pub state: HunterState,
    spawn_timer: Option<IntervalTimer>,
    /// Level the spawn timer was armed for
    armed_level: u32,
}

impl HunterSession {
    pub fn new(tuning: HunterTuning, seed: u64) -> Self {
        Self {
            state: HunterState::new(tuning, seed),
            spawn_timer: None,
            armed_level: 0,
        }
    }

    /// Begin a run from the start or game-over screen; a running game is left alone
    pub fn start(&mut self) {
        if self.state.phase.is_running() {
            return;
        }
        self.state.start();
        self.arm_spawns();
    }

    fn arm_spawns(&mut self) {
        self.armed_level = self.state.level;
        self.spawn_timer = Some(IntervalTimer::new(self.state.spawn_interval_ms()));
    }

    pub fn is_scheduled(&self) -> bool {
        self.spawn_timer.as_ref().is_some_and(IntervalTimer::is_active)
    }

    pub fn set_input(&mut self, value: &str) {
        self.state.set_input(value);
    }

    pub fn stop(&mut self) {
        if let Some(mut timer) = self.spawn_timer.take() {
            timer.cancel();
        }
    }

    /// One animation frame: advance and cull first, then due spawns
    pub fn frame(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        if !self.state.phase.is_running() {
            self.stop();
            return self.state.drain_events();
        }

        // Input since the last frame may have levelled up
        if self.state.level != self.armed_level {
            self.arm_spawns();
        }

        advance(&mut self.state);

        if self.state.phase.is_over() {
            self.stop();
        } else if let Some(timer) = self.spawn_timer.as_mut() {
            timer.accumulate(dt_ms);
            while timer.take_due() {
                spawn_word(&mut self.state);
            }
        }

        self.state.drain_events()
    }
}

/// Games on offer in the arcade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
    Hunter,
}

/// The game currently open
#[derive(Debug)]
pub enum ActiveGame {
    Snake(SnakeSession),
    Hunter(HunterSession),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Snake(_) => GameKind::Snake,
            ActiveGame::Hunter(_) => GameKind::Hunter,
        }
    }

    fn is_scheduled(&self) -> bool {
        match self {
            ActiveGame::Snake(s) => s.is_scheduled(),
            ActiveGame::Hunter(h) => h.is_scheduled(),
        }
    }
}

/// Game picker plus the open game's session
pub struct Arcade {
    pub settings: Settings,
    store: Box<dyn KeyValueStore>,
    active: Option<ActiveGame>,
    idle: bool,
    /// Idle mode was switched on by the inactivity countdown
    auto_idle: bool,
    /// Time since the last player input
    quiet_ms: f64,
    seed: u64,
    opened: u64,
}

impl Arcade {
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        Self {
            settings,
            store,
            active: None,
            idle: false,
            auto_idle: false,
            quiet_ms: 0.0,
            seed,
            opened: 0,
        }
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn active_kind(&self) -> Option<GameKind> {
        self.active.as_ref().map(ActiveGame::kind)
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Whether any game timer is armed
    pub fn is_scheduled(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveGame::is_scheduled)
    }

    /// Open a game (not started). Any previously open game is torn down.
    pub fn open(&mut self, kind: GameKind) {
        self.back();
        self.note_input();
        self.opened += 1;
        let seed = self.seed.wrapping_add(self.opened.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.active = Some(match kind {
            GameKind::Snake => ActiveGame::Snake(SnakeSession::new(
                self.settings.snake,
                self.store.as_ref(),
                seed,
            )),
            GameKind::Hunter => ActiveGame::Hunter(HunterSession::new(self.settings.hunter, seed)),
        });
        log::info!("Opened {:?}", kind);
    }

    /// Return to the menu, cancelling the open game's timers
    pub fn back(&mut self) {
        if let Some(mut game) = self.active.take() {
            match &mut game {
                ActiveGame::Snake(s) => s.stop(),
                ActiveGame::Hunter(h) => h.stop(),
            }
            log::info!("Closed {:?}", game.kind());
        }
    }

    /// Start or restart the open game (no-op while a run is in progress)
    pub fn start(&mut self) {
        self.note_input();
        match &mut self.active {
            Some(ActiveGame::Snake(s)) => s.start(),
            Some(ActiveGame::Hunter(h)) => h.start(),
            None => {}
        }
    }

    pub fn command(&mut self, command: Command) {
        if command != Command::ToggleIdle {
            self.note_input();
        }
        match command {
            Command::Steer(heading) => {
                if let Some(ActiveGame::Snake(s)) = &mut self.active {
                    s.steer(heading);
                }
            }
            Command::Start => self.start(),
            Command::Back => self.back(),
            Command::ToggleIdle => {
                self.idle = !self.idle;
                self.auto_idle = false;
                log::info!("Idle mode: {}", self.idle);
            }
        }
    }

    /// Reset the inactivity countdown; hands control back if the
    /// countdown had started the autopilot
    fn note_input(&mut self) {
        self.quiet_ms = 0.0;
        if self.auto_idle {
            self.idle = false;
            self.auto_idle = false;
            log::info!("Idle mode: false (player input)");
        }
    }

    /// Word Hunter text field changed
    pub fn type_text(&mut self, value: &str) {
        self.note_input();
        if let Some(ActiveGame::Hunter(h)) = &mut self.active {
            h.set_input(value);
        }
    }

    /// Advance the open game by one host frame
    pub fn frame(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        self.count_idle(dt_ms);
        match &mut self.active {
            Some(ActiveGame::Snake(s)) => {
                if self.idle {
                    if let Some(heading) = snake_autopilot(&s.state) {
                        s.steer(heading);
                    }
                }
                s.update(dt_ms, self.store.as_mut())
            }
            Some(ActiveGame::Hunter(h)) => {
                if self.idle {
                    if let Some(text) = hunter_autopilot(&h.state) {
                        h.set_input(&text);
                    }
                }
                h.frame(dt_ms)
            }
            None => Vec::new(),
        }
    }

    fn count_idle(&mut self, dt_ms: f64) {
        let after = self.settings.idle_after_ms;
        if self.active.is_none() || after == 0 || self.idle {
            return;
        }
        self.quiet_ms += dt_ms;
        if self.quiet_ms >= f64::from(after) {
            self.idle = true;
            self.auto_idle = true;
            log::info!("Idle mode: true (no input for {}ms)", after);
        }
    }
}
