//! Random sources for picking one variant out of an eligible set

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index uniformly from `0..len`
pub trait VariantChooser: Send + Sync {
    /// Choose an index in `0..len`. Only called with `len > 0`.
    fn choose_index(&self, len: usize) -> usize;
}

/// Chooser backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl VariantChooser for RandomChooser {
    fn choose_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Chooser with a fixed seed, for reproducible selection
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl VariantChooser for SeededChooser {
    fn choose_index(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len)
    }
}

/// Chooser that always returns the same index (clamped to the range)
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub usize);

impl VariantChooser for FixedChooser {
    fn choose_index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_chooser_in_range() {
        let chooser = RandomChooser;
        for _ in 0..200 {
            assert!(chooser.choose_index(3) < 3);
        }
        assert_eq!(chooser.choose_index(1), 0);
    }

    #[test]
    fn test_seeded_chooser_is_reproducible() {
        let a = SeededChooser::new(7);
        let b = SeededChooser::new(7);

        let first: Vec<usize> = (0..20).map(|_| a.choose_index(10)).collect();
        let second: Vec<usize> = (0..20).map(|_| b.choose_index(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_chooser_clamps() {
        assert_eq!(FixedChooser(1).choose_index(3), 1);
        assert_eq!(FixedChooser(9).choose_index(3), 2);
    }
}
