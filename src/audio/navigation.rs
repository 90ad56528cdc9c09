use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Picks the next and previous track index.
///
/// Sequential mode wraps around the playlist. Shuffle mode draws a random
/// different track and remembers where it came from, so `previous` can walk
/// back along the visited tracks.
#[derive(Debug, Clone)]
pub struct NavigationPolicy<R = StdRng> {
    is_shuffling: bool,
    history: Vec<usize>,
    rng: R,
}

impl NavigationPolicy<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for NavigationPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> NavigationPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            is_shuffling: false,
            history: Vec::new(),
            rng,
        }
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Visited indices, most recent last. Only filled while shuffling.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Flips shuffle mode and forgets the history either way.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.is_shuffling = !self.is_shuffling;
        self.history.clear();
        self.is_shuffling
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn next(&mut self, current: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        if !self.is_shuffling {
            return Some((current + 1) % len);
        }

        self.history.push(current);
        let index = self.draw(current, len);
        debug!("shuffle {current} -> {index} ({} in history)", self.history.len());
        Some(index)
    }

    pub fn previous(&mut self, current: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        if self.is_shuffling
            && let Some(index) = self.history.pop()
        {
            return Some(index);
        }

        Some((current % len + len - 1) % len)
    }

    fn draw(&mut self, current: usize, len: usize) -> usize {
        let mut index = self.rng.random_range(0..len);
        if len > 1 {
            while index == current {
                index = self.rng.random_range(0..len);
            }
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> NavigationPolicy {
        NavigationPolicy::with_rng(StdRng::seed_from_u64(seed))
    }

    fn shuffling(seed: u64) -> NavigationPolicy {
        let mut policy = seeded(seed);
        policy.toggle_shuffle();
        policy
    }

    #[test]
    fn sequential_wraps_both_ways() {
        let mut policy = seeded(1);
        assert_eq!(policy.next(0, 3), Some(1));
        assert_eq!(policy.next(2, 3), Some(0));
        assert_eq!(policy.previous(1, 3), Some(0));
        assert_eq!(policy.previous(0, 3), Some(2));
        assert!(policy.history().is_empty());
    }

    #[test]
    fn empty_playlist_never_navigates() {
        let mut policy = seeded(1);
        assert_eq!(policy.next(0, 0), None);
        assert_eq!(policy.previous(0, 0), None);

        policy.toggle_shuffle();
        assert_eq!(policy.next(0, 0), None);
        assert_eq!(policy.previous(0, 0), None);
        assert!(policy.history().is_empty());
    }

    #[test]
    fn shuffle_next_always_moves_away() {
        let mut policy = shuffling(7);
        let mut current = 0;
        for step in 1..=200 {
            let next = policy.next(current, 5).unwrap();
            assert_ne!(next, current);
            assert!(next < 5);
            assert_eq!(policy.history().len(), step);
            current = next;
        }
    }

    #[test]
    fn shuffle_with_single_track_stays_put() {
        let mut policy = shuffling(3);
        assert_eq!(policy.next(0, 1), Some(0));
        assert_eq!(policy.history(), &[0]);
    }

    #[test]
    fn shuffle_previous_walks_history_back() {
        let mut policy = shuffling(11);
        let first = policy.next(0, 10).unwrap();
        let second = policy.next(first, 10).unwrap();

        assert_eq!(policy.previous(second, 10), Some(first));
        assert_eq!(policy.previous(first, 10), Some(0));
        assert!(policy.history().is_empty());
    }

    #[test]
    fn shuffle_previous_without_history_wraps() {
        let mut policy = shuffling(5);
        assert_eq!(policy.previous(0, 4), Some(3));
        assert_eq!(policy.previous(2, 4), Some(1));
    }

    #[test]
    fn toggling_clears_history() {
        let mut policy = shuffling(9);
        let mut current = 0;
        for _ in 0..4 {
            current = policy.next(current, 6).unwrap();
        }
        assert_eq!(policy.history().len(), 4);

        assert!(!policy.toggle_shuffle());
        assert!(policy.history().is_empty());
        assert!(policy.toggle_shuffle());
        assert!(policy.history().is_empty());
    }
}
