//! SEO Word Hunter falling-word simulation
//!
//! Words spawn above the viewport on a timer and fall every frame. Typing a
//! word's text catches it; words that fall past the bottom cost a life each.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, RunState};
use crate::settings::HunterTuning;

/// Keywords that can fall
pub const KEYWORDS: &[&str] = &[
    "SEO", "REACT", "WEB", "DESIGN", "CODE", "PIXEL", "PRO", "SHOP", "APP", "DATA", "CLOUD",
    "API", "CSS", "HTML", "JS", "NODE", "GIT", "UI", "UX", "BRAND", "LOGO", "ART", "TECH", "FAST",
    "GROW", "SALE", "LEAD", "RANK", "HOST", "BOT",
];

/// One descending word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingWord {
    /// Spawn order, unique within a run
    pub id: u64,
    pub text: String,
    /// Left edge (px), fixed at spawn
    pub x: f32,
    /// Top edge (px), only ever increases
    pub y: f32,
    /// Pixels per frame
    pub fall_speed: f32,
}

/// Complete Word Hunter run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HunterState {
    pub tuning: HunterTuning,
    pub phase: RunState,
    /// Active words by id
    pub words: HashMap<u64, FallingWord>,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    /// Upper-cased text typed so far
    pub input: String,
    /// Frames advanced in the current run
    pub frames: u64,
    next_id: u64,
    rng: Pcg32,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl HunterState {
    pub fn new(tuning: HunterTuning, seed: u64) -> Self {
        Self {
            tuning,
            phase: RunState::NotStarted,
            words: HashMap::new(),
            score: 0,
            lives: tuning.start_lives,
            level: 1,
            input: String::new(),
            frames: 0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset the run and begin play
    pub fn start(&mut self) {
        self.words.clear();
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.level = 1;
        self.input.clear();
        self.frames = 0;
        self.events.clear();
        self.phase = RunState::Running;
        log::info!("Word Hunter run started");
    }

    /// Current spawn period
    pub fn spawn_interval_ms(&self) -> u32 {
        self.tuning.spawn_interval_ms(self.level)
    }

    /// Allocate a word id
    pub fn next_word_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a word directly (used by spawns and scripted setups)
    pub fn insert_word(&mut self, text: &str, x: f32, y: f32, fall_speed: f32) -> u64 {
        let id = self.next_word_id();
        self.words.insert(
            id,
            FallingWord {
                id,
                text: text.to_string(),
                x,
                y,
                fall_speed,
            },
        );
        id
    }

    /// Active words, oldest first
    pub fn words_by_age(&self) -> Vec<&FallingWord> {
        let mut words: Vec<_> = self.words.values().collect();
        words.sort_by_key(|w| w.id);
        words
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the typed text with `value` (the whole field, as typed)
    pub fn set_input(&mut self, value: &str) {
        if !self.phase.is_running() {
            return;
        }
        self.input = value.to_uppercase();
        self.try_match();
    }

    pub fn push_char(&mut self, c: char) {
        if !self.phase.is_running() {
            return;
        }
        self.input.extend(c.to_uppercase());
        self.try_match();
    }

    pub fn backspace(&mut self) {
        if !self.phase.is_running() {
            return;
        }
        self.input.pop();
        self.try_match();
    }

    /// Catch at most one word whose text equals the buffer; the oldest
    /// wins when several share a text.
    fn try_match(&mut self) {
        let Some(id) = self
            .words
            .values()
            .filter(|w| w.text == self.input)
            .map(|w| w.id)
            .min()
        else {
            return;
        };
        let Some(word) = self.words.remove(&id) else {
            return;
        };

        self.score += self.tuning.points_per_word;
        self.input.clear();
        self.events.push(GameEvent::WordCaught {
            text: word.text,
            score: self.score,
        });

        if self.score > 0 && self.score % self.tuning.points_per_level == 0 {
            self.level += 1;
            self.events.push(GameEvent::LevelUp { level: self.level });
            log::info!("Level up: {} (score {})", self.level, self.score);
        }
    }
}

/// Drop a new random word above the viewport
pub fn spawn_word(state: &mut HunterState) {
    if !state.phase.is_running() {
        return;
    }
    let text = KEYWORDS[state.rng.random_range(0..KEYWORDS.len())];
    let span = (state.tuning.viewport_width - state.tuning.word_width).max(0.0);
    let x = state.rng.random::<f32>() * span;
    let y = state.tuning.spawn_y;
    let fall_speed = state.tuning.fall_speed(state.level);
    let id = state.insert_word(text, x, y, fall_speed);
    log::debug!("Spawned word {} {:?} at x={:.0}", id, text, x);
}

/// Move every word down one frame and charge a life per missed word
pub fn advance(state: &mut HunterState) {
    if !state.phase.is_running() {
        return;
    }
    state.frames += 1;

    let bottom = state.tuning.viewport_height;
    for word in state.words.values_mut() {
        word.y += word.fall_speed;
    }

    let before = state.words.len();
    state.words.retain(|_, w| w.y <= bottom);
    let missed = (before - state.words.len()) as u32;
    if missed == 0 {
        return;
    }

    let missed_lives = u8::try_from(missed).unwrap_or(u8::MAX);
    state.lives = state.lives.saturating_sub(missed_lives);
    state.events.push(GameEvent::WordsMissed {
        count: missed,
        lives: state.lives,
    });
    log::debug!("Missed {} word(s), lives={}", missed, state.lives);

    if state.lives == 0 {
        state.phase = RunState::Over;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!(
            "Word Hunter run over score={} level={} frames={}",
            state.score,
            state.level,
            state.frames
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(seed: u64) -> HunterState {
        let mut state = HunterState::new(HunterTuning::default(), seed);
        state.start();
        state
    }

    #[test]
    fn test_new_run_defaults() {
        let state = running(1);
        assert_eq!(state.phase, RunState::Running);
        assert!(state.words.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_spawn_places_word_above_viewport() {
        let mut state = running(11);
        spawn_word(&mut state);
        assert_eq!(state.words.len(), 1);
        let word = state.words.values().next().unwrap();
        assert!(KEYWORDS.contains(&word.text.as_str()));
        assert!(word.x >= 0.0 && word.x < 500.0);
        assert_eq!(word.y, -50.0);
        assert!((word.fall_speed - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_ids_are_monotonic() {
        let mut state = running(11);
        for _ in 0..5 {
            spawn_word(&mut state);
        }
        let ids: Vec<u64> = state.words_by_age().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_end_to_end_single_miss() {
        let mut state = running(2);
        state.insert_word("SEO", 10.0, 395.0, 6.0);
        advance(&mut state);
        assert!(state.words.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, RunState::Running);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::WordsMissed { count: 1, lives: 2 }]
        );
    }

    #[test]
    fn test_word_on_bottom_line_is_kept() {
        let mut state = running(2);
        state.insert_word("SEO", 10.0, 394.0, 6.0);
        advance(&mut state);
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_simultaneous_misses_cost_one_life_each() {
        let mut state = running(2);
        state.insert_word("SEO", 10.0, 399.0, 2.0);
        state.insert_word("WEB", 200.0, 398.0, 3.0);
        state.insert_word("APP", 300.0, 100.0, 3.0);
        advance(&mut state);
        assert_eq!(state.lives, 1);
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.phase, RunState::Running);
    }

    #[test]
    fn test_zero_lives_ends_run_in_same_step() {
        let mut state = running(2);
        state.lives = 2;
        for x in [0.0, 100.0, 200.0] {
            state.insert_word("UI", x, 400.0, 1.0);
        }
        advance(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, RunState::Over);
        assert!(state.events.contains(&GameEvent::GameOver { final_score: 0 }));

        spawn_word(&mut state);
        advance(&mut state);
        assert!(state.words.is_empty());
        assert_eq!(state.frames, 1);
    }

    #[test]
    fn test_match_is_case_insensitive_and_clears_buffer() {
        let mut state = running(3);
        state.insert_word("REACT", 0.0, 50.0, 1.0);
        state.insert_word("CODE", 0.0, 60.0, 1.0);

        state.set_input("rea");
        assert_eq!(state.input, "REA");
        assert_eq!(state.words.len(), 2);

        state.set_input("react");
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.score, 10);
        assert!(state.input.is_empty());
        assert_eq!(state.words.values().next().unwrap().text, "CODE");
    }

    #[test]
    fn test_non_matching_input_changes_nothing() {
        let mut state = running(3);
        state.insert_word("REACT", 0.0, 50.0, 1.0);
        state.set_input("REACTS");
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.input, "REACTS");
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let mut state = running(3);
        state.insert_word("SEO", 0.0, 50.0, 1.0);
        state.set_input("SEO ");
        assert_eq!(state.words.len(), 1);
    }

    #[test]
    fn test_duplicate_text_removes_exactly_one() {
        let mut state = running(3);
        let older = state.insert_word("GIT", 0.0, 80.0, 1.0);
        let newer = state.insert_word("GIT", 100.0, 20.0, 1.0);
        state.set_input("git");
        assert_eq!(state.words.len(), 1);
        assert!(!state.words.contains_key(&older));
        assert!(state.words.contains_key(&newer));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_typing_keystrokes() {
        let mut state = running(3);
        state.insert_word("UX", 0.0, 50.0, 1.0);
        state.push_char('u');
        state.push_char('z');
        state.backspace();
        state.push_char('x');
        assert!(state.words.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_backspace_to_a_word_catches_it() {
        let mut state = running(3);
        state.insert_word("SEO", 0.0, 0.0, 1.0);
        state.set_input("SEOX");
        assert_eq!(state.words.len(), 1);

        state.backspace();
        assert!(state.words.is_empty());
        assert_eq!(state.score, 10);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_backspace_ignored_when_not_running() {
        let mut state = HunterState::new(HunterTuning::default(), 3);
        state.input = "AB".to_string();
        state.backspace();
        assert_eq!(state.input, "AB");
    }

    #[test]
    fn test_level_up_on_multiple_of_fifty() {
        let mut state = running(4);
        state.score = 40;
        state.insert_word("BOT", 0.0, 0.0, 1.0);
        state.set_input("BOT");
        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));

        state.insert_word("BOT", 0.0, 0.0, 1.0);
        state.set_input("BOT");
        assert_eq!(state.score, 60);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_input_ignored_when_not_running() {
        let mut state = HunterState::new(HunterTuning::default(), 1);
        state.insert_word("SEO", 0.0, 0.0, 1.0);
        state.set_input("SEO");
        assert_eq!(state.words.len(), 1);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_new_words_use_current_level_speed() {
        let mut state = running(8);
        state.level = 5;
        spawn_word(&mut state);
        let word = state.words.values().next().unwrap();
        assert!((word.fall_speed - 2.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_lives_never_negative_and_y_monotonic(
            seed in any::<u64>(),
            steps in proptest::collection::vec(0u8..4, 1..400),
        ) {
            let mut state = running(seed);
            for step in steps {
                let before: HashMap<u64, f32> =
                    state.words.iter().map(|(id, w)| (*id, w.y)).collect();
                match step {
                    0 => spawn_word(&mut state),
                    _ => advance(&mut state),
                }
                for (id, word) in &state.words {
                    if let Some(prev) = before.get(id) {
                        prop_assert!(word.y >= *prev);
                    }
                }
                prop_assert!(state.lives <= 3);
                if state.lives == 0 {
                    prop_assert_eq!(state.phase, RunState::Over);
                }
            }
        }
    }
}
