use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::{audio::clock::PlaybackSnapshot, ui::components::gauge::SeekBar, util::colors};

const LABEL_WIDTH: u16 = 7;

/// `elapsed ━━━━●──── total`
pub struct ProgressWidget<'a> {
    playback: &'a PlaybackSnapshot,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(playback: &'a PlaybackSnapshot) -> Self {
        Self { playback }
    }

    /// Splits the row into the two time labels and the bar between them.
    pub fn areas(area: Rect) -> [Rect; 3] {
        Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Min(1),
            Constraint::Length(LABEL_WIDTH),
        ])
        .spacing(1)
        .areas(area)
    }

    pub fn bar_area(area: Rect) -> Rect {
        Self::areas(area)[1]
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [elapsed, bar, total] = Self::areas(area);

        Paragraph::new(Span::styled(
            self.playback.formatted_elapsed.as_str(),
            Style::default().fg(colors::ACCENT),
        ))
        .alignment(Alignment::Right)
        .render(elapsed, buf);

        SeekBar::default()
            .ratio(self.playback.progress_percent / 100.0)
            .played_style(Style::default().fg(colors::PRIMARY))
            .knob_style(Style::default().fg(colors::ACCENT))
            .remaining_style(Style::default().fg(colors::NEUTRAL))
            .render(bar, buf);

        Paragraph::new(Span::styled(
            self.playback.formatted_total.as_str(),
            Style::default().fg(colors::NEUTRAL),
        ))
        .alignment(Alignment::Left)
        .render(total, buf);
    }
}
