//! Seedable random selection strategy.
//!
//! Topic picks, fallback replies, persona assignment, and fallacy injection
//! all draw randomness through this seam so tests can force determinism by
//! constructing a selector from a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard};

/// A pluggable source of selection randomness.
///
/// Implementations must be cheap to share (`&self` methods) since a single
/// strategy instance is threaded through catalogs, fallback banks, and the
/// application layer.
pub trait SelectionStrategy: Send + Sync {
    /// Picks an index in `[0, len)`. Returns 0 when `len` is 0; callers that
    /// index into a slice must check for emptiness first.
    fn pick_index(&self, len: usize) -> usize;

    /// Returns true with the given probability (clamped to `[0.0, 1.0]`).
    fn chance(&self, probability: f64) -> bool;
}

/// Picks a random element from a slice, or `None` when it is empty.
pub fn pick_from<'a, T>(selector: &dyn SelectionStrategy, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[selector.pick_index(items.len())])
    }
}

/// The default strategy, backed by a seedable PRNG.
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    /// Creates a deterministic selector from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates a selector seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A poisoned lock only means another thread panicked mid-draw;
        // the RNG state is still usable.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SelectionStrategy for SeededSelector {
    fn pick_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng().gen_range(0..len)
    }

    fn chance(&self, probability: f64) -> bool {
        let p = probability.clamp(0.0, 1.0);
        self.rng().gen_bool(p)
    }
}
