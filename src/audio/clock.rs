use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    audio::{error::AudioError, traits::PlaybackControl},
    playlist::Track,
};

pub const ZERO_TIME: &str = "0:00";

/// Formats seconds as `m:ss`. Minutes are not folded into hours.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIME.to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let seconds = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{seconds:02}")
}

fn is_known_duration(total: f64) -> bool {
    total.is_finite() && total > 0.0
}

/// Playback position as shown to the user, recomputed on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub elapsed_seconds: f64,
    pub total_seconds: f64,
    pub progress_percent: f64,
    pub formatted_elapsed: String,
    pub formatted_total: String,
    pub active_lyric_index: usize,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            elapsed_seconds: 0.0,
            total_seconds: 0.0,
            progress_percent: 0.0,
            formatted_elapsed: ZERO_TIME.to_string(),
            formatted_total: ZERO_TIME.to_string(),
            active_lyric_index: 0,
        }
    }
}

impl PlaybackSnapshot {
    /// An unknown, zero or NaN `total` yields zero progress and `0:00` labels.
    pub fn measure(elapsed: f64, total: f64, active_lyric_index: usize) -> Self {
        if !is_known_duration(total) {
            return Self {
                elapsed_seconds: if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 },
                active_lyric_index,
                ..Self::default()
            };
        }

        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let progress_percent = (elapsed / total * 100.0).clamp(0.0, 100.0);

        Self {
            elapsed_seconds: elapsed,
            total_seconds: total,
            progress_percent,
            formatted_elapsed: format_time(elapsed),
            formatted_total: format_time(total),
            active_lyric_index,
        }
    }

    /// Progress as the integer a 0..=100 slider would show.
    pub fn slider_position(&self) -> u8 {
        self.progress_percent.round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockEvent {
    /// `total` is NaN while the duration is unknown.
    Tick {
        generation: u64,
        elapsed: f64,
        total: f64,
    },
    Ended {
        generation: u64,
    },
}

impl ClockEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Tick { generation, .. } | Self::Ended { generation } => *generation,
        }
    }
}

pub trait ClockObserver: Send + Sync {
    fn on_clock_event(&self, event: ClockEvent);
}

/// Adapter over the engine that turns its polled state into pushed clock events.
///
/// Clones share state, so a clone can drive the monitor task while the
/// controller issues commands through the original.
pub struct PlaybackClock<E> {
    engine: Arc<E>,
    generation: Arc<AtomicU64>,
    armed: Arc<AtomicBool>,
    observer: Arc<Mutex<Option<Arc<dyn ClockObserver>>>>,
}

impl<E> Clone for PlaybackClock<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            generation: self.generation.clone(),
            armed: self.armed.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<E: PlaybackControl + 'static> PlaybackClock<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            generation: Arc::new(AtomicU64::new(0)),
            armed: Arc::new(AtomicBool::new(false)),
            observer: Arc::new(Mutex::new(None)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Registers the single handler of clock events, replacing any earlier one.
    pub fn subscribe(&self, observer: Arc<dyn ClockObserver>) {
        *self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    pub fn play(&self) {
        self.armed.store(true, Ordering::SeqCst);
        self.engine.play();
    }

    pub fn pause(&self) {
        self.engine.pause();
    }

    /// Stops the engine and starts a new generation. Events of older generations are stale.
    pub fn reset(&self) -> u64 {
        self.armed.store(false, Ordering::SeqCst);
        self.engine.stop();
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn load(&self, track: &Track) -> u64 {
        let generation = self.reset();
        self.engine.load(track);
        generation
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.engine.position().as_secs_f64()
    }

    pub fn total_seconds(&self) -> f64 {
        self.engine
            .duration()
            .map_or(f64::NAN, |duration| duration.as_secs_f64())
    }

    pub fn seek_to_percent(&self, percent: f64) -> Result<(), AudioError> {
        let total = self.total_seconds();
        if !is_known_duration(total) {
            return Err(AudioError::UnknownDuration);
        }
        let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
        let target = Duration::from_secs_f64(percent / 100.0 * total);
        debug!("seeking to {percent}% ({})", format_time(target.as_secs_f64()));
        self.engine.seek(target)
    }

    /// Reads the engine once. Yields a tick, followed by `Ended` the first time
    /// playback is found finished after `play`.
    pub fn sample(&self) -> Vec<ClockEvent> {
        let generation = self.generation();
        let mut events = vec![ClockEvent::Tick {
            generation,
            elapsed: self.elapsed_seconds(),
            total: self.total_seconds(),
        }];

        if self.engine.is_finished() && self.armed.swap(false, Ordering::SeqCst) {
            events.push(ClockEvent::Ended { generation });
        }
        events
    }

    /// Samples and pushes to the subscribed observer, if any.
    pub fn emit(&self) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            for event in self.sample() {
                observer.on_clock_event(event);
            }
        }
    }

    pub fn spawn_monitor(&self, interval: Duration) -> JoinHandle<()> {
        let clock = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                clock.emit();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEngine {
        position: Mutex<Duration>,
        duration: Mutex<Option<Duration>>,
        finished: AtomicBool,
        seeks: Mutex<Vec<Duration>>,
        stops: AtomicU64,
    }

    impl PlaybackControl for FakeEngine {
        fn load(&self, _track: &Track) {}
        fn play(&self) {}
        fn pause(&self) {}
        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
        fn seek(&self, position: Duration) -> Result<(), AudioError> {
            self.seeks.lock().unwrap().push(position);
            Ok(())
        }
        fn set_volume(&self, _volume: f32) {}
        fn position(&self) -> Duration {
            *self.position.lock().unwrap()
        }
        fn duration(&self) -> Option<Duration> {
            *self.duration.lock().unwrap()
        }
        fn is_finished(&self) -> bool {
            self.finished.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ClockEvent>>);

    impl ClockObserver for Recorder {
        fn on_clock_event(&self, event: ClockEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn clock() -> (Arc<FakeEngine>, PlaybackClock<FakeEngine>) {
        let engine = Arc::new(FakeEngine::default());
        (engine.clone(), PlaybackClock::new(engine))
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(4503.0), "75:03");
    }

    #[test]
    fn formats_degenerate_values_as_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn zero_total_never_reports_progress() {
        for elapsed in [0.0, 1.0, 42.5, 1e6] {
            let snapshot = PlaybackSnapshot::measure(elapsed, 0.0, 0);
            assert_eq!(snapshot.progress_percent, 0.0);
            assert_eq!(snapshot.formatted_elapsed, ZERO_TIME);
            assert_eq!(snapshot.formatted_total, ZERO_TIME);
        }
    }

    #[test]
    fn nan_total_is_degenerate() {
        let snapshot = PlaybackSnapshot::measure(30.0, f64::NAN, 3);
        assert_eq!(snapshot.progress_percent, 0.0);
        assert_eq!(snapshot.total_seconds, 0.0);
        assert_eq!(snapshot.formatted_total, ZERO_TIME);
        assert_eq!(snapshot.active_lyric_index, 3);
        assert_eq!(snapshot, snapshot.clone());
    }

    #[test]
    fn progress_is_percentage_of_total() {
        let snapshot = PlaybackSnapshot::measure(30.0, 120.0, 1);
        assert_eq!(snapshot.progress_percent, 25.0);
        assert_eq!(snapshot.formatted_elapsed, "0:30");
        assert_eq!(snapshot.formatted_total, "2:00");
        assert_eq!(snapshot.slider_position(), 25);

        let overshoot = PlaybackSnapshot::measure(130.0, 120.0, 1);
        assert_eq!(overshoot.progress_percent, 100.0);
    }

    #[test]
    fn seek_converts_percent_to_absolute_time() {
        let (engine, clock) = clock();
        *engine.duration.lock().unwrap() = Some(Duration::from_secs(200));

        clock.seek_to_percent(25.0).unwrap();
        clock.seek_to_percent(150.0).unwrap();

        assert_eq!(
            *engine.seeks.lock().unwrap(),
            vec![Duration::from_secs(50), Duration::from_secs(200)]
        );
    }

    #[test]
    fn seek_is_refused_without_duration() {
        let (engine, clock) = clock();
        assert_eq!(clock.seek_to_percent(50.0), Err(AudioError::UnknownDuration));

        *engine.duration.lock().unwrap() = Some(Duration::ZERO);
        assert_eq!(clock.seek_to_percent(50.0), Err(AudioError::UnknownDuration));
        assert!(engine.seeks.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_duration_ticks_as_nan() {
        let (_engine, clock) = clock();
        match clock.sample()[0] {
            ClockEvent::Tick { total, .. } => assert!(total.is_nan()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn ended_is_reported_once_per_play() {
        let (engine, clock) = clock();
        clock.play();
        engine.finished.store(true, Ordering::SeqCst);

        let first = clock.sample();
        let second = clock.sample();

        assert_eq!(first.len(), 2);
        assert_eq!(first[1], ClockEvent::Ended { generation: 0 });
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn finished_engine_without_play_does_not_end() {
        let (engine, clock) = clock();
        engine.finished.store(true, Ordering::SeqCst);
        assert_eq!(clock.sample().len(), 1);
    }

    #[test]
    fn reset_starts_new_generation_and_disarms() {
        let (engine, clock) = clock();
        clock.play();
        assert_eq!(clock.reset(), 1);
        engine.finished.store(true, Ordering::SeqCst);

        let events = clock.sample();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].generation(), 1);
        assert_eq!(engine.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn emit_reaches_only_the_latest_observer() {
        let (_engine, clock) = clock();
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        clock.emit();
        clock.subscribe(first.clone());
        clock.emit();
        clock.subscribe(second.clone());
        clock.emit();

        assert_eq!(first.0.lock().unwrap().len(), 1);
        assert_eq!(second.0.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn monitor_pushes_ticks_on_interval() {
        let (engine, clock) = clock();
        *engine.position.lock().unwrap() = Duration::from_secs(3);
        let recorder = Arc::new(Recorder::default());
        clock.subscribe(recorder.clone());

        let monitor = clock.spawn_monitor(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(350)).await;
        monitor.abort();

        let events = recorder.0.lock().unwrap();
        assert!(events.len() >= 3);
        assert!(events.iter().all(|event| matches!(
            event,
            ClockEvent::Tick { elapsed, .. } if *elapsed == 3.0
        )));
    }
}
