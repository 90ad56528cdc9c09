use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{audio::lyrics::LyricWindow, util::colors};

/// Three centred rows: previous line dimmed, the sung line highlighted, next line dimmed.
pub struct LyricsWidget<'a> {
    window: LyricWindow<'a>,
}

impl<'a> LyricsWidget<'a> {
    pub fn new(window: LyricWindow<'a>) -> Self {
        Self { window }
    }

    fn put_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
        if y < area.top() || y >= area.bottom() || text.is_empty() {
            return;
        }
        let width = UnicodeWidthStr::width(text) as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        buf.set_stringn(x, y, text, area.width as usize, style);
    }
}

impl Widget for LyricsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let center = area.y + area.height / 2;
        let dim = Style::default().fg(colors::NEUTRAL);

        if let Some(previous) = self.window.previous {
            if let Some(y) = center.checked_sub(1) {
                Self::put_centered(buf, area, y, previous, dim);
            }
        }
        Self::put_centered(
            buf,
            area,
            center,
            self.window.current,
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        );
        if let Some(next) = self.window.next {
            Self::put_centered(buf, area, center.saturating_add(1), next, dim);
        }
    }
}
