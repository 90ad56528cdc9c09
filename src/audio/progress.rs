use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

const UNKNOWN: u64 = u64::MAX;

/// Load state of the engine's current source, shared with the loader task.
#[derive(Debug)]
pub struct TrackProgress {
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
    loaded: AtomicBool,
}

impl Default for TrackProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackProgress {
    pub fn new() -> Self {
        Self {
            total_duration_millis: AtomicU64::new(UNKNOWN),
            generation: AtomicU64::new(0),
            loaded: AtomicBool::new(false),
        }
    }

    /// Invalidates the current source and returns the generation of the next one.
    pub fn reset(&self) -> u64 {
        self.loaded.store(false, Ordering::SeqCst);
        self.total_duration_millis.store(UNKNOWN, Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Marks the source of `generation` as appended. Returns false when it went stale.
    pub fn finish_load(&self, generation: u64, total: Option<Duration>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let millis = total.map_or(UNKNOWN, |d| d.as_millis().min(u128::from(UNKNOWN - 1)) as u64);
        self.total_duration_millis.store(millis, Ordering::Relaxed);
        self.loaded.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn total_duration(&self) -> Option<Duration> {
        match self.total_duration_millis.load(Ordering::Relaxed) {
            UNKNOWN => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }
}
