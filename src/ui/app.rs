use std::sync::Arc;

use flume::{Receiver, Sender};
use ratatui::{Frame, layout::Rect};
use rodio::OutputStream;
use tracing::info;

use crate::{
    audio::{
        clock::PlaybackClock, controller::PlayerController, playback::PlaybackEngine,
        traits::PlaybackControl, util::open_output,
    },
    config::PlayerConfig,
    event::events::Event,
    http::ResourceClient,
    playlist::{ManifestLocation, ManifestSource, PlaylistSource},
    util::task::TaskManager,
};

use super::{
    layout::{AppLayout, LoadPhase},
    message::AppMessage,
    tui,
    util::handler::EventHandler,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub config: PlayerConfig,
    pub controller: PlayerController<PlaybackEngine>,
    pub task_manager: TaskManager,
    pub phase: LoadPhase,
    pub should_quit: bool,
    /// Terminal area of the last drawn frame, for mouse hit-testing.
    pub viewport: Rect,
    fetcher: ResourceClient,
    // dropping the stream silences the sink
    _output: OutputStream,
}

impl App {
    pub fn new(config: PlayerConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();

        let output = open_output()?;
        let fetcher = ResourceClient::new()?;
        let engine = Arc::new(PlaybackEngine::new(&output, fetcher.clone()));
        engine.set_volume(config.volume_ratio());

        let clock = PlaybackClock::new(engine);
        clock.subscribe(Arc::new(event_tx.clone()));
        let controller = PlayerController::new(clock, event_tx.clone());

        Ok(Self {
            event_rx,
            event_tx,
            config,
            controller,
            task_manager: TaskManager::new(),
            phase: LoadPhase::Loading,
            should_quit: false,
            viewport: Rect::default(),
            fetcher,
            _output: output,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new(self.config.render_interval)?.mouse(true);
        tui.enter()?;

        self.task_manager.spawn(
            "clock",
            self.controller
                .clock()
                .spawn_monitor(self.config.clock_interval),
        );
        self.spawn_playlist_fetch();

        let mut should_render = true;
        while !self.should_quit {
            if should_render {
                tui.draw(|f| self.ui(f))?;
            }
            should_render = EventHandler::handle_events(self, &tui).await?;
        }

        self.task_manager.abort_all();
        self.controller.clock().reset();
        tui.exit()?;
        Ok(())
    }

    /// Fetches the manifest. The result is held back until the preloader
    /// has been visible for `preloader_delay`.
    fn spawn_playlist_fetch(&mut self) {
        let location = ManifestLocation::parse(&self.config.manifest);
        info!("loading playlist from {}", location.as_reference());
        let source = ManifestSource::new(location, self.fetcher.clone());
        let delay = self.config.preloader_delay;
        let tx = self.event_tx.clone();

        self.task_manager.spawn(
            "playlist",
            tokio::spawn(async move {
                let (result, _) = tokio::join!(source.fetch(), tokio::time::sleep(delay));
                let event = match result {
                    Ok(tracks) => Event::PlaylistLoaded(tracks),
                    Err(e) => Event::PlaylistFailed(e.to_string()),
                };
                let _ = tx.send(event);
            }),
        );
    }

    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::TogglePlayPause => self.controller.toggle_play_pause(),
            AppMessage::NextTrack => self.controller.next(),
            AppMessage::PreviousTrack => self.controller.previous(),
            AppMessage::ToggleShuffle => self.controller.toggle_shuffle(),
            AppMessage::SeekTo(percent) => self.controller.seek(f64::from(percent)),
            AppMessage::SeekBy(steps) => {
                let target = seek_target(
                    self.controller.playback().slider_position(),
                    self.config.seek_step_percent,
                    steps,
                );
                self.controller.seek(f64::from(target));
            }
        }
    }

    fn ui(&mut self, frame: &mut Frame) {
        self.viewport = frame.area();
        let snapshot = self.controller.snapshot();
        frame.render_widget(
            AppLayout::new(
                self.phase,
                self.controller.current_track(),
                &snapshot,
                self.controller.lyric_window(),
            ),
            frame.area(),
        );
    }
}

/// Slider position after moving `steps` times by `step` percent, kept in `0..=100`.
pub fn seek_target(position: u8, step: u8, steps: i8) -> u8 {
    let target = i16::from(position) + i16::from(step) * i16::from(steps);
    target.clamp(0, 100) as u8
}
