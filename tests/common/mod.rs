#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use flume::Receiver;
use rand::{SeedableRng, rngs::StdRng};
use vinyl::{
    audio::{
        clock::PlaybackClock, controller::PlayerController, error::AudioError,
        navigation::NavigationPolicy, traits::PlaybackControl,
    },
    event::events::Event,
    playlist::{LyricCue, Track},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(u64),
    Play,
    Pause,
    Stop,
    Seek(Duration),
}

/// Engine double: records every command and reports whatever position it is told to.
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<Call>>,
    position: Mutex<Duration>,
    duration: Mutex<Option<Duration>>,
    finished: AtomicBool,
}

impl MockEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loads(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Load(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_position(&self, seconds: f64) {
        *self.position.lock().unwrap() = Duration::from_secs_f64(seconds);
    }

    pub fn set_duration(&self, seconds: Option<f64>) {
        *self.duration.lock().unwrap() = seconds.map(Duration::from_secs_f64);
    }

    pub fn set_finished(&self, finished: bool) {
        self.finished.store(finished, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlaybackControl for MockEngine {
    fn load(&self, track: &Track) {
        self.record(Call::Load(track.id));
    }

    fn play(&self) {
        self.record(Call::Play);
    }

    fn pause(&self) {
        self.record(Call::Pause);
    }

    fn stop(&self) {
        self.record(Call::Stop);
    }

    fn seek(&self, position: Duration) -> Result<(), AudioError> {
        self.record(Call::Seek(position));
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

pub struct Harness {
    pub engine: Arc<MockEngine>,
    pub controller: PlayerController<MockEngine>,
    pub events: Receiver<Event>,
}

impl Harness {
    pub fn new() -> Self {
        Self::seeded(42)
    }

    pub fn seeded(seed: u64) -> Self {
        let engine = Arc::new(MockEngine::default());
        let (tx, events) = flume::unbounded();
        let clock = PlaybackClock::new(engine.clone());
        let navigation = NavigationPolicy::with_rng(StdRng::seed_from_u64(seed));
        let controller = PlayerController::with_navigation(clock, navigation, tx);

        Self {
            engine,
            controller,
            events,
        }
    }

    pub fn with_tracks(count: usize) -> Self {
        let mut harness = Self::new();
        harness.controller.load_playlist(tracks(count));
        harness.drain();
        harness.engine.clear_calls();
        harness
    }

    /// Number of `SnapshotChanged` notifications waiting in the channel.
    pub fn drain(&self) -> usize {
        self.events
            .try_iter()
            .filter(|event| matches!(event, Event::SnapshotChanged))
            .count()
    }

    /// Feeds the controller every event one clock sample produces.
    pub fn sample_clock(&mut self) {
        for event in self.controller.clock().sample() {
            self.controller.on_clock_event(event);
        }
    }
}

pub fn track(id: u64) -> Track {
    Track {
        id,
        title: format!("Track {id}"),
        artist: "Artist".to_string(),
        audio_url: format!("/music/{id}.mp3"),
        cover_url: format!("/covers/{id}.jpg"),
        lyrics: vec![
            LyricCue::new(0.0, format!("{id} intro")),
            LyricCue::new(10.0, format!("{id} verse")),
            LyricCue::new(20.0, format!("{id} chorus")),
        ],
    }
}

pub fn tracks(count: usize) -> Vec<Track> {
    (1..=count as u64).map(track).collect()
}
