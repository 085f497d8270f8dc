//! Pixel Snake grid simulation
//!
//! One `tick` moves the head one cell in the applied heading. Collision is
//! checked against the whole pre-move body, including the tail cell that
//! would be vacated this tick.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{CrashCause, GameEvent, RunState};
use crate::settings::SnakeTuning;

/// A grid coordinate, `(0, 0)` top-left
pub type Cell = IVec2;

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// One-cell step (screen coordinates, y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Complete snake run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeState {
    pub tuning: SnakeTuning,
    pub phase: RunState,
    /// Head first
    pub body: VecDeque<Cell>,
    /// Heading used by the last tick
    pub heading: Heading,
    /// Heading the next tick will use
    pub pending: Heading,
    pub reward: Cell,
    pub score: u32,
    /// Best score known to this mount; updated when a run beats it
    pub high_score: u32,
    pub tick_interval_ms: u32,
    /// Ticks in the current run
    pub ticks: u64,
    rng: Pcg32,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SnakeState {
    /// Freshly mounted game, not yet started
    pub fn new(tuning: SnakeTuning, high_score: u32, seed: u64) -> Self {
        Self {
            tuning,
            phase: RunState::NotStarted,
            body: VecDeque::from([tuning.start_cell]),
            heading: Heading::Right,
            pending: Heading::Right,
            reward: tuning.initial_reward,
            score: 0,
            high_score,
            tick_interval_ms: tuning.initial_tick_ms,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset everything except the high score and begin a run
    pub fn start(&mut self) {
        self.body.clear();
        self.body.push_back(self.tuning.start_cell);
        self.heading = Heading::Right;
        self.pending = Heading::Right;
        self.reward = self.random_cell();
        self.score = 0;
        self.tick_interval_ms = self.tuning.initial_tick_ms;
        self.ticks = 0;
        self.events.clear();
        self.phase = RunState::Running;
        log::info!("Snake run started, reward at {}", self.reward);
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        let g = self.tuning.grid_size;
        (0..g).contains(&cell.x) && (0..g).contains(&cell.y)
    }

    /// Request a direction change; the exact reverse of the applied
    /// heading is ignored. Returns whether the request was accepted.
    ///
    /// Unlike the old site, which compared against the last *requested*
    /// direction, two quick presses cannot fold the head back onto the neck.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading == self.heading.opposite() {
            return false;
        }
        self.pending = heading;
        true
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Uniform cell over the whole grid (body occupancy is not checked)
    fn random_cell(&mut self) -> Cell {
        let g = self.tuning.grid_size;
        IVec2::new(self.rng.random_range(0..g), self.rng.random_range(0..g))
    }

    fn end_run(&mut self, cause: CrashCause) {
        self.phase = RunState::Over;
        self.events.push(GameEvent::Crashed { cause });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Snake run over ({:?}) score={} length={} ticks={}",
            cause,
            self.score,
            self.body.len(),
            self.ticks
        );
    }
}

/// Advance the snake one cell
pub fn tick(state: &mut SnakeState) {
    if !state.phase.is_running() {
        return;
    }

    state.heading = state.pending;
    state.ticks += 1;
    let new_head = state.head() + state.heading.delta();

    if !state.in_bounds(new_head) {
        state.end_run(CrashCause::Wall);
        return;
    }
    if state.body.contains(&new_head) {
        state.end_run(CrashCause::SelfHit);
        return;
    }

    state.body.push_front(new_head);

    if new_head == state.reward {
        state.score += state.tuning.points_per_reward;
        state.tick_interval_ms = state
            .tick_interval_ms
            .saturating_sub(state.tuning.tick_step_ms)
            .max(state.tuning.min_tick_ms);
        state.reward = state.random_cell();
        state.events.push(GameEvent::RewardEaten { score: state.score });
        log::debug!(
            "Reward eaten: score={} interval={}ms next={}",
            state.score,
            state.tick_interval_ms,
            state.reward
        );
    } else {
        state.body.pop_back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(seed: u64) -> SnakeState {
        let mut state = SnakeState::new(SnakeTuning::default(), 0, seed);
        state.start();
        state
    }

    /// Place a body and heading directly, keeping the reward out of the way
    fn with_body(cells: &[(i32, i32)], heading: Heading) -> SnakeState {
        let mut state = running(7);
        state.body = cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect();
        state.heading = heading;
        state.pending = heading;
        state.reward = IVec2::new(0, 19);
        state
    }

    #[test]
    fn test_not_started_ignores_ticks() {
        let mut state = SnakeState::new(SnakeTuning::default(), 0, 1);
        tick(&mut state);
        assert_eq!(state.phase, RunState::NotStarted);
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert_eq!(state.reward, IVec2::new(15, 10));
    }

    #[test]
    fn test_start_resets_run_but_keeps_high_score() {
        let mut state = SnakeState::new(SnakeTuning::default(), 90, 1);
        state.start();
        state.score = 40;
        state.tick_interval_ms = 60;
        state.body.push_back(IVec2::new(9, 10));
        state.phase = RunState::Over;

        state.start();
        assert_eq!(state.phase, RunState::Running);
        assert_eq!(state.body, VecDeque::from([IVec2::new(10, 10)]));
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 150);
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.high_score, 90);
        assert!(state.in_bounds(state.reward));
    }

    #[test]
    fn test_end_to_end_eat_after_five_ticks() {
        let mut state = running(42);
        state.reward = IVec2::new(15, 10);

        for _ in 0..4 {
            tick(&mut state);
            assert_eq!(state.len(), 1);
        }
        assert_eq!(state.head(), IVec2::new(14, 10));

        tick(&mut state);
        assert_eq!(state.head(), IVec2::new(15, 10));
        assert_eq!(state.score, 10);
        assert_eq!(state.len(), 2);
        assert_eq!(state.tick_interval_ms, 148);
        assert!(state.in_bounds(state.reward));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RewardEaten { score: 10 }]
        );
    }

    #[test]
    fn test_boundary_ends_run_without_moving() {
        for (start, heading) in [
            ((0, 5), Heading::Left),
            ((19, 5), Heading::Right),
            ((5, 0), Heading::Up),
            ((5, 19), Heading::Down),
        ] {
            let mut state = with_body(&[start], heading);
            let before = state.body.clone();
            tick(&mut state);
            assert_eq!(state.phase, RunState::Over, "heading {:?}", heading);
            assert_eq!(state.body, before);
            assert!(state.events.contains(&GameEvent::Crashed {
                cause: CrashCause::Wall
            }));
        }
    }

    #[test]
    fn test_self_collision_keeps_body() {
        // Head at (5,5) moving down into (5,6)
        let mut state = with_body(&[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)], Heading::Down);
        let before = state.body.clone();
        tick(&mut state);
        assert_eq!(state.phase, RunState::Over);
        assert_eq!(state.body, before);
        assert!(state.events.contains(&GameEvent::Crashed {
            cause: CrashCause::SelfHit
        }));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_a_collision() {
        // 2x2 loop: the next head cell is the current tail
        let mut state = with_body(&[(5, 5), (6, 5), (6, 6), (5, 6)], Heading::Left);
        state.heading = Heading::Left;
        state.pending = Heading::Down;
        tick(&mut state);
        assert_eq!(state.phase, RunState::Over);
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_plain_move_drops_tail() {
        let mut state = with_body(&[(5, 5), (4, 5), (3, 5)], Heading::Right);
        tick(&mut state);
        assert_eq!(
            state.body,
            VecDeque::from([IVec2::new(6, 5), IVec2::new(5, 5), IVec2::new(4, 5)])
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reverse_heading_is_ignored() {
        let mut state = running(3);
        state.reward = IVec2::new(0, 0);
        assert!(!state.steer(Heading::Left));
        tick(&mut state);
        assert_eq!(state.head(), IVec2::new(11, 10));
    }

    #[test]
    fn test_last_valid_steer_wins() {
        let mut state = running(3);
        state.reward = IVec2::new(0, 0);
        assert!(state.steer(Heading::Up));
        assert!(state.steer(Heading::Down));
        // Reverse is judged against the applied heading, not the pending one
        assert!(!state.steer(Heading::Left));
        tick(&mut state);
        assert_eq!(state.head(), IVec2::new(10, 11));
        assert_eq!(state.heading, Heading::Down);
    }

    #[test]
    fn test_interval_floors_at_minimum() {
        let mut state = with_body(&[(5, 5)], Heading::Right);
        state.tick_interval_ms = 51;
        state.reward = IVec2::new(6, 5);
        tick(&mut state);
        assert_eq!(state.tick_interval_ms, 50);
    }

    #[test]
    fn test_high_score_updates_only_when_exceeded() {
        let mut state = with_body(&[(19, 5)], Heading::Right);
        state.high_score = 30;
        state.score = 40;
        tick(&mut state);
        assert_eq!(state.high_score, 40);
        assert!(state.events.contains(&GameEvent::NewHighScore { score: 40 }));

        let mut state = with_body(&[(19, 5)], Heading::Right);
        state.high_score = 40;
        state.score = 40;
        tick(&mut state);
        assert_eq!(state.high_score, 40);
        assert!(!state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. })));
        assert!(state.events.contains(&GameEvent::GameOver { final_score: 40 }));
    }

    #[test]
    fn test_over_freezes_state() {
        let mut state = with_body(&[(19, 5)], Heading::Right);
        tick(&mut state);
        assert_eq!(state.phase, RunState::Over);
        let ticks = state.ticks;
        state.steer(Heading::Up);
        tick(&mut state);
        assert_eq!(state.ticks, ticks);
        assert_eq!(state.head(), IVec2::new(19, 5));
    }

    #[test]
    fn test_same_seed_same_rewards() {
        let mut a = running(99);
        let mut b = running(99);
        assert_eq!(a.reward, b.reward);
        assert_eq!(a.random_cell(), b.random_cell());
    }

    fn heading_strategy() -> impl Strategy<Value = Heading> {
        prop_oneof![
            Just(Heading::Up),
            Just(Heading::Down),
            Just(Heading::Left),
            Just(Heading::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_reverse_never_changes_pending(current in heading_strategy(), pending in heading_strategy()) {
            let mut state = running(5);
            state.heading = current;
            state.pending = pending;
            state.steer(current.opposite());
            prop_assert_eq!(state.pending, pending);
        }

        #[test]
        fn prop_tick_changes_length_by_at_most_one(
            seed in any::<u64>(),
            turns in proptest::collection::vec(heading_strategy(), 1..60),
        ) {
            let mut state = running(seed);
            for heading in turns {
                let before_len = state.len();
                let before_score = state.score;
                state.steer(heading);
                tick(&mut state);
                match state.phase {
                    RunState::Over => {
                        prop_assert_eq!(state.len(), before_len);
                    }
                    _ if state.score > before_score => {
                        prop_assert_eq!(state.len(), before_len + 1);
                        prop_assert_eq!(state.score, before_score + 10);
                    }
                    _ => {
                        prop_assert_eq!(state.len(), before_len);
                    }
                }
                let cells: std::collections::HashSet<_> = state.body.iter().collect();
                prop_assert_eq!(cells.len(), state.len());
                if state.phase.is_over() {
                    break;
                }
            }
        }
    }
}
