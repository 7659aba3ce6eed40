//! Injectable randomness for the rule engine.
//!
//! Every random decision the engine makes (roster assignment, the intimidate
//! coin flip, rally and revive picks, automatic placement) goes through a
//! [`RandomSource`]. Production code uses [`GameRng`], a seeded ChaCha8
//! stream; tests can use [`ScriptedRandom`] to dictate each answer.
//!
//! ```
//! use river_king::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.pick_index(10), b.pick_index(10));
//! assert_eq!(a.coin_flip(), b.coin_flip());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of every random decision made by the engine.
pub trait RandomSource {
    /// Fair coin flip. `true` means the probabilistic effect happens.
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick a uniformly random element of a slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.pick_index(items.len()).min(items.len() - 1);
    items.get(index)
}

/// Deterministic seeded RNG.
///
/// Uses ChaCha8 so the same seed replays the same match on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the stream position for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len.max(1))
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

/// A [`RandomSource`] that replays a fixed script.
///
/// Coin flips and index picks are queued separately. When a queue runs dry
/// the source falls back to `false` and index `0`, so a short script never
/// panics mid-resolution.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    flips: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Empty script: every flip fails, every pick is the first element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue coin flip results.
    #[must_use]
    pub fn with_flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }

    /// Queue index picks. Each pick is clamped to the requested length.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of scripted answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.flips.len() + self.picks.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
            assert_eq!(rng1.coin_flip(), rng2.coin_flip());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..16).map(|_| rng1.pick_index(1000)).collect();
        let seq2: Vec<_> = (0..16).map(|_| rng2.pick_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_coin_flip_is_roughly_fair() {
        let mut rng = GameRng::new(9);
        let heads = (0..2000).filter(|_| rng.coin_flip()).count();
        assert!((800..1200).contains(&heads), "heads = {heads}");
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            rng.pick_index(10);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.pick_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.pick_index(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_random() {
        let mut script = ScriptedRandom::new()
            .with_flips([true, false])
            .with_picks([2, 9]);

        assert_eq!(script.remaining(), 4);
        assert!(script.coin_flip());
        assert!(!script.coin_flip());
        assert!(!script.coin_flip()); // exhausted
        assert_eq!(script.pick_index(5), 2);
        assert_eq!(script.pick_index(3), 2); // clamped
        assert_eq!(script.pick_index(3), 0); // exhausted
    }

    #[test]
    fn test_choose() {
        let mut script = ScriptedRandom::new().with_picks([1]);
        let items = [10, 20, 30];
        assert_eq!(choose(&mut script, &items), Some(&20));

        let empty: [i32; 0] = [];
        assert_eq!(choose(&mut script, &empty), None);
    }
}
