use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    audio::{controller::PlayerSnapshot, lyrics::LyricWindow},
    playlist::Track,
    ui::components::{
        controls::ControlsWidget, lyrics::LyricsWidget, preloader::MusicBarPreloader,
        progress::ProgressWidget, vinyl::VinylWidget,
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Playlist fetch still running, or it failed and nothing will arrive.
    Loading,
    Ready,
}

/// The whole player screen for one frame.
pub struct AppLayout<'a> {
    phase: LoadPhase,
    track: Option<&'a Track>,
    snapshot: &'a PlayerSnapshot,
    lyrics: LyricWindow<'a>,
}

impl<'a> AppLayout<'a> {
    pub fn new(
        phase: LoadPhase,
        track: Option<&'a Track>,
        snapshot: &'a PlayerSnapshot,
        lyrics: LyricWindow<'a>,
    ) -> Self {
        Self {
            phase,
            track,
            snapshot,
            lyrics,
        }
    }

    fn frame(&self) -> Block<'static> {
        let counter = match self.snapshot.current_index {
            Some(index) => format!(" {}/{} ", index + 1, self.snapshot.track_count),
            None => String::new(),
        };
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title_top(Line::from(" vinyl ").fg(colors::PRIMARY).bold())
            .title_bottom(Line::from(counter).fg(colors::NEUTRAL))
            .title_alignment(Alignment::Center)
    }

    /// `[disc, heading, lyrics, controls, progress]` inside the frame.
    fn sections(area: Rect) -> [Rect; 5] {
        let inner = area.inner(Margin::new(3, 1));
        Layout::vertical([
            Constraint::Min(4),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(inner)
    }

    /// Row holding the progress widget, used to hit-test mouse seeks.
    pub fn progress_area(area: Rect) -> Rect {
        Self::sections(area)[4]
    }

    fn render_heading(&self, area: Rect, buf: &mut Buffer) {
        let (title, artist) = match self.track {
            Some(track) => (track.title.as_str(), track.artist.as_str()),
            None => ("No tracks", ""),
        };
        Paragraph::new(vec![
            Line::from(title).fg(colors::ACCENT).bold(),
            Line::from(artist).fg(colors::NEUTRAL),
        ])
        .centered()
        .render(area, buf);
    }
}

impl Widget for AppLayout<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        if self.phase == LoadPhase::Loading {
            MusicBarPreloader::default()
                .with_label("loading playlist")
                .render(area, buf);
            return;
        }

        self.frame().render(area, buf);
        let [disc, heading, lyrics, controls, progress] = Self::sections(area);

        let label = self.track.map(Track::cover_label).unwrap_or_default();
        VinylWidget::new(label)
            .spinning(self.snapshot.is_playing)
            .render(disc, buf);
        self.render_heading(heading, buf);
        LyricsWidget::new(self.lyrics).render(lyrics, buf);
        ControlsWidget::new(self.snapshot.is_playing, self.snapshot.is_shuffling)
            .render(controls, buf);
        ProgressWidget::new(&self.snapshot.playback).render(progress, buf);
    }
}
