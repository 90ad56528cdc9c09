use flume::Sender;

use crate::{
    audio::clock::{ClockEvent, ClockObserver},
    playlist::Track,
};

#[derive(Debug, Clone)]
pub enum Event {
    PlaylistLoaded(Vec<Track>),
    PlaylistFailed(String),
    Clock(ClockEvent),
    /// The controller published a snapshot that differs from the previous one.
    SnapshotChanged,
}

impl ClockObserver for Sender<Event> {
    fn on_clock_event(&self, event: ClockEvent) {
        let _ = self.send(Event::Clock(event));
    }
}
