use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::util::colors;

pub struct ControlsWidget {
    is_playing: bool,
    is_shuffling: bool,
}

impl ControlsWidget {
    pub fn new(is_playing: bool, is_shuffling: bool) -> Self {
        Self {
            is_playing,
            is_shuffling,
        }
    }

    pub fn play_icon(&self) -> &'static str {
        if self.is_playing { "⏸" } else { "▶" }
    }
}

impl Widget for ControlsWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shuffle_icon = if self.is_shuffling {
            "🔀".fg(colors::PRIMARY)
        } else {
            "🔀".fg(colors::NEUTRAL)
        };

        let mut line = Line::default();
        line.push_span(shuffle_icon);
        line.push_span("   ");
        line.push_span("⏮".fg(colors::NEUTRAL));
        line.push_span("   ");
        line.push_span(self.play_icon().fg(colors::ACCENT).bold());
        line.push_span("   ");
        line.push_span("⏭".fg(colors::NEUTRAL));

        Paragraph::new(line).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_icon_reflects_state() {
        assert_eq!(ControlsWidget::new(false, false).play_icon(), "▶");
        assert_eq!(ControlsWidget::new(true, false).play_icon(), "⏸");
    }

    #[test]
    fn shuffle_icon_is_highlighted_when_on() {
        let area = Rect::new(0, 0, 30, 1);
        let mut on = Buffer::empty(area);
        let mut off = Buffer::empty(area);

        ControlsWidget::new(false, true).render(area, &mut on);
        ControlsWidget::new(false, false).render(area, &mut off);

        let shuffle_cell = |buf: &Buffer| {
            (0..area.width)
                .map(|x| &buf[(x, 0)])
                .find(|cell| cell.symbol() == "🔀")
                .map(|cell| cell.fg)
        };
        assert_eq!(shuffle_cell(&on), Some(colors::PRIMARY));
        assert_eq!(shuffle_cell(&off), Some(colors::NEUTRAL));
    }
}
