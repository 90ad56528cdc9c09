use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::error;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        components::{gauge::percent_at, progress::ProgressWidget},
        input::InputHandler,
        layout::{AppLayout, LoadPhase},
        message::AppMessage,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    /// Waits for one terminal event, then drains the application events.
    /// Returns whether the screen needs a redraw.
    pub async fn handle_events(app: &mut App, tui: &Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            should_render |= Self::handle_event(app, evt);
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            should_render |= Self::handle_action(app, evt);
        }

        Ok(should_render)
    }

    pub fn handle_event(app: &mut App, evt: TerminalEvent) -> bool {
        match evt {
            // only animated screens need a frame per tick
            TerminalEvent::Tick => app.phase == LoadPhase::Loading || app.controller.is_playing(),
            TerminalEvent::Key(key) => {
                if let Some(msg) = InputHandler::handle_key(key) {
                    app.update(msg);
                }
                true
            }
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Resize(_, _) => true,
        }
    }

    pub fn handle_action(app: &mut App, evt: Event) -> bool {
        match evt {
            Event::PlaylistLoaded(tracks) => {
                app.phase = LoadPhase::Ready;
                app.controller.load_playlist(tracks);
                true
            }
            Event::PlaylistFailed(e) => {
                error!("failed to load playlist: {e}");
                false
            }
            Event::Clock(event) => {
                app.controller.on_clock_event(event);
                false
            }
            Event::SnapshotChanged => true,
        }
    }

    fn handle_mouse_event(app: &mut App, evt: MouseEvent) -> bool {
        if app.phase == LoadPhase::Loading {
            return false;
        }

        match evt.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let bar = ProgressWidget::bar_area(AppLayout::progress_area(app.viewport));
                if evt.row != bar.y {
                    return false;
                }
                match percent_at(bar, evt.column) {
                    Some(percent) => {
                        app.update(AppMessage::SeekTo(percent));
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}
