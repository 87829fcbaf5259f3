//! Injectable randomness.
//!
//! The session never touches a random source directly; it rolls through the
//! [`Dice`] trait. Production uses [`RandDice`], tests use [`ScriptedDice`]
//! to force every branch deliberately.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// The session's only source of randomness.
pub trait Dice {
    /// Rolls a probability check; `p` is in `[0, 1]`.
    fn chance(&mut self, p: f64) -> bool;

    /// Draws an integer uniformly from `[lo, hi]` inclusive.
    fn jitter(&mut self, lo: i32, hi: i32) -> i32;

    /// Draws an index uniformly from `[0, len)`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Dice backed by [`rand::rngs::StdRng`].
#[derive(Debug, Clone)]
pub struct RandDice {
    rng: StdRng,
}

impl RandDice {
    /// Creates dice seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates dice with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for RandDice {
    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn jitter(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay scripted rolls, for deterministic tests.
///
/// Each roll kind consumes from its own queue. An exhausted queue yields the
/// tame default (`false`, `lo`, `0`) so a script only has to cover the rolls
/// it cares about.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    chances: VecDeque<bool>,
    jitters: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    /// Creates dice with empty queues; every roll yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues outcomes for upcoming `chance` rolls.
    pub fn with_chances(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(outcomes);
        self
    }

    /// Queues values for upcoming `jitter` rolls.
    pub fn with_jitters(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.jitters.extend(values);
        self
    }

    /// Queues indices for upcoming `pick` rolls.
    pub fn with_picks(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(indices);
        self
    }
}

impl Dice for ScriptedDice {
    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn jitter(&mut self, lo: i32, hi: i32) -> i32 {
        self.jitters
            .pop_front()
            .map(|v| v.clamp(lo, hi))
            .unwrap_or(lo)
    }

    fn pick(&mut self, len: usize) -> usize {
        let upper = len.saturating_sub(1);
        self.picks.pop_front().map(|i| i.min(upper)).unwrap_or(0)
    }
}
