use flume::Sender;
use rand::{Rng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    audio::{
        clock::{ClockEvent, PlaybackClock, PlaybackSnapshot},
        lyrics::{LyricCursor, LyricWindow, window},
        navigation::NavigationPolicy,
        traits::PlaybackControl,
    },
    event::events::Event,
    playlist::Track,
};

/// Everything the presentation layer needs, detached from the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerSnapshot {
    /// `None` while the playlist is empty.
    pub current_index: Option<usize>,
    pub track_count: usize,
    pub is_playing: bool,
    pub is_shuffling: bool,
    pub playback: PlaybackSnapshot,
}

/// Owns the playlist, the play/shuffle modes and the derived playback snapshot.
///
/// Every public method is an intent; none of them touch state owned elsewhere.
/// After each intent the snapshot is re-published and `Event::SnapshotChanged`
/// is sent only if it differs from the last published one.
pub struct PlayerController<E, R = StdRng> {
    clock: PlaybackClock<E>,
    navigation: NavigationPolicy<R>,
    tracks: Vec<Track>,
    current_index: usize,
    is_playing: bool,
    lyrics: LyricCursor,
    playback: PlaybackSnapshot,
    published: Option<PlayerSnapshot>,
    event_tx: Sender<Event>,
}

impl<E: PlaybackControl + 'static> PlayerController<E, StdRng> {
    pub fn new(clock: PlaybackClock<E>, event_tx: Sender<Event>) -> Self {
        Self::with_navigation(clock, NavigationPolicy::new(), event_tx)
    }
}

impl<E: PlaybackControl + 'static, R: Rng> PlayerController<E, R> {
    pub fn with_navigation(
        clock: PlaybackClock<E>,
        navigation: NavigationPolicy<R>,
        event_tx: Sender<Event>,
    ) -> Self {
        Self {
            clock,
            navigation,
            tracks: Vec::new(),
            current_index: 0,
            is_playing: false,
            lyrics: LyricCursor::default(),
            playback: PlaybackSnapshot::default(),
            published: None,
            event_tx,
        }
    }

    pub fn load_playlist(&mut self, tracks: Vec<Track>) {
        info!("playlist loaded with {} tracks", tracks.len());
        self.tracks = tracks;
        self.navigation.clear_history();
        self.change_track(0);
        self.publish();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        if self.is_playing {
            self.clock.pause();
        } else {
            self.clock.play();
        }
        self.is_playing = !self.is_playing;
        debug!("playing: {}", self.is_playing);
        self.publish();
    }

    pub fn toggle_shuffle(&mut self) {
        let is_shuffling = self.navigation.toggle_shuffle();
        debug!("shuffle: {is_shuffling}");
        self.publish();
    }

    pub fn next(&mut self) {
        if let Some(index) = self.navigation.next(self.current_index, self.tracks.len()) {
            self.change_track(index);
            self.publish();
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self
            .navigation
            .previous(self.current_index, self.tracks.len())
        {
            self.change_track(index);
            self.publish();
        }
    }

    /// Jumps to `percent` of the current track. Ignored until the duration is known.
    pub fn seek(&mut self, percent: f64) {
        if self.tracks.is_empty() {
            return;
        }
        if let Err(e) = self.clock.seek_to_percent(percent) {
            debug!("seek to {percent}% ignored: {e}");
        }
    }

    pub fn on_time_tick(&mut self, elapsed: f64, total: f64) {
        let Some(track) = self.tracks.get(self.current_index) else {
            return;
        };

        self.lyrics.advance(&track.lyrics, elapsed);
        self.playback = PlaybackSnapshot::measure(elapsed, total, self.lyrics.active());
        self.publish();
    }

    /// Natural end of the track behaves like `next`, shuffle included.
    pub fn on_ended(&mut self) {
        debug!("track {} ended", self.current_index);
        self.next();
    }

    /// Dispatches a clock event, dropping those from an earlier track.
    pub fn on_clock_event(&mut self, event: ClockEvent) {
        if event.generation() != self.clock.generation() {
            return;
        }

        match event {
            ClockEvent::Tick { elapsed, total, .. } => self.on_time_tick(elapsed, total),
            ClockEvent::Ended { .. } => self.on_ended(),
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_index: (!self.tracks.is_empty()).then_some(self.current_index),
            track_count: self.tracks.len(),
            is_playing: self.is_playing,
            is_shuffling: self.navigation.is_shuffling(),
            playback: self.playback.clone(),
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub fn lyric_window(&self) -> LyricWindow<'_> {
        let cues = self
            .current_track()
            .map(|track| track.lyrics.as_slice())
            .unwrap_or_default();
        window(cues, self.playback.active_lyric_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_shuffling(&self) -> bool {
        self.navigation.is_shuffling()
    }

    pub fn history(&self) -> &[usize] {
        self.navigation.history()
    }

    pub fn playback(&self) -> &PlaybackSnapshot {
        &self.playback
    }

    pub fn clock(&self) -> &PlaybackClock<E> {
        &self.clock
    }

    fn change_track(&mut self, index: usize) {
        self.current_index = index;
        self.is_playing = false;
        self.lyrics.reset();
        self.playback = PlaybackSnapshot::default();

        match self.tracks.get(index) {
            Some(track) => {
                info!("track {index}: '{}' by {}", track.title, track.artist);
                self.clock.load(track);
            }
            None => {
                self.clock.reset();
            }
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        if self.published.as_ref() == Some(&snapshot) {
            return;
        }
        self.published = Some(snapshot);
        let _ = self.event_tx.send(Event::SnapshotChanged);
    }
}
