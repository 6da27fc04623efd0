use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the arbitrary choice made between equally good candidates.
pub trait TieBreak {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn choose(&mut self, len: usize) -> usize;
}

/// Uniform choice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R = ThreadRng> {
    rng: R,
}

impl RandomTieBreak<ThreadRng> {
    pub fn new() -> Self {
        RandomTieBreak { rng: rand::thread_rng() }
    }
}

impl Default for RandomTieBreak<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomTieBreak<StdRng> {
    /// Reproducible tie-breaks for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomTieBreak { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomTieBreak<R> {
    pub fn from_rng(rng: R) -> Self {
        RandomTieBreak { rng }
    }
}

impl<R: Rng> TieBreak for RandomTieBreak<R> {
    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always takes the first candidate in pool order. Used to make picks predictable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTieBreak;

impl TieBreak for FirstTieBreak {
    fn choose(&mut self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_choices_are_reproducible_and_in_range() {
        let mut a = RandomTieBreak::seeded(42);
        let mut b = RandomTieBreak::seeded(42);
        for len in 1..50 {
            let pick = a.choose(len);
            assert!(pick < len);
            assert_eq!(pick, b.choose(len));
        }
    }

    #[test]
    fn test_random_choice_reaches_every_index() {
        let mut tie_break = RandomTieBreak::seeded(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[tie_break.choose(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_injected_rng_drives_choices() {
        let mut injected = RandomTieBreak::from_rng(StdRng::seed_from_u64(9));
        let mut seeded = RandomTieBreak::seeded(9);
        let picks: Vec<usize> = (0..20).map(|_| injected.choose(6)).collect();
        let expected: Vec<usize> = (0..20).map(|_| seeded.choose(6)).collect();
        assert_eq!(picks, expected);
    }

    #[test]
    fn test_first_tie_break() {
        assert_eq!(FirstTieBreak.choose(5), 0);
    }
}
