//! Persisted best score
//!
//! A single integer per game, stored as a decimal string so the value is
//! shared with earlier versions of the site.

use crate::persistence::KeyValueStore;

/// Store key for Pixel Snake
pub const SNAKE_HIGH_SCORE_KEY: &str = "pixelSnakeHighScore";

/// Best score for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: u32,
}

impl HighScore {
    /// Read the stored value; missing or unreadable values count as 0
    pub fn load(key: &'static str, store: &dyn KeyValueStore) -> Self {
        let best = match store.get(key) {
            Ok(Some(raw)) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring malformed high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                0
            }
        };
        log::info!("High score for {}: {}", key, best);
        Self { key, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether `score` beats the current record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record `score` if it beats the best, writing it through to `store`.
    /// Returns true when a new record was set.
    pub fn record(&mut self, score: u32, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set(self.key, &score.to_string()) {
            Ok(()) => log::info!("New high score saved: {}", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }
}

/// Leading-integer parse, tolerant of trailing junk like `parseInt`
fn parse_score(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}
