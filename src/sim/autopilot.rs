//! Idle/demo mode - the arcade plays itself
//!
//! Both pilots only read state; the host feeds their output back through
//! the normal input paths (`steer`, `set_input`).

use super::hunter::HunterState;
use super::snake::{Heading, SnakeState};

/// Pick a heading toward the reward, preferring moves that survive the
/// next tick. Returns `None` when the current heading is already best.
pub fn snake_autopilot(state: &SnakeState) -> Option<Heading> {
    if !state.phase.is_running() {
        return None;
    }
    let head = state.head();
    let to_reward = state.reward - head;

    let safe = |h: Heading| {
        let next = head + h.delta();
        h != state.heading.opposite() && state.in_bounds(next) && !state.body.contains(&next)
    };

    let mut preferred = Vec::with_capacity(4);
    if to_reward.x > 0 {
        preferred.push(Heading::Right);
    } else if to_reward.x < 0 {
        preferred.push(Heading::Left);
    }
    if to_reward.y > 0 {
        preferred.push(Heading::Down);
    } else if to_reward.y < 0 {
        preferred.push(Heading::Up);
    }

    let choice = preferred
        .into_iter()
        .chain(std::iter::once(state.heading))
        .chain(Heading::ALL)
        .find(|&h| safe(h))?;

    (choice != state.pending).then_some(choice)
}

/// Text of the word closest to the bottom, if any
pub fn hunter_autopilot(state: &HunterState) -> Option<String> {
    if !state.phase.is_running() {
        return None;
    }
    state
        .words
        .values()
        .max_by(|a, b| a.y.total_cmp(&b.y).then(b.id.cmp(&a.id)))
        .map(|w| w.text.clone())
}
