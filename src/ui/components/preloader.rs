use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::{ui::util::animation_clock, util::colors};

const BAR_COUNT: u16 = 5;
const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
const FRAME_MILLIS: u128 = 90;

/// Five equaliser bars bouncing out of phase, shown while the playlist loads.
pub struct MusicBarPreloader {
    label: Option<String>,
    now_millis: u128,
}

impl Default for MusicBarPreloader {
    fn default() -> Self {
        Self {
            label: None,
            now_millis: animation_clock(),
        }
    }
}

impl MusicBarPreloader {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, now_millis: u128) -> Self {
        self.now_millis = now_millis;
        self
    }

    /// Bar heights for the current frame, each in `0..LEVELS.len()`.
    pub fn levels(&self) -> [usize; BAR_COUNT as usize] {
        let frame = (self.now_millis / FRAME_MILLIS) as usize;
        let period = (LEVELS.len() - 1) * 2;
        std::array::from_fn(|bar| {
            let phase = (frame + bar * 3) % period;
            if phase < LEVELS.len() {
                phase
            } else {
                period - phase
            }
        })
    }
}

impl Widget for MusicBarPreloader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = BAR_COUNT * 2 - 1;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height / 2;
        let bar_style = Style::default().fg(colors::PRIMARY);

        for (i, level) in self.levels().into_iter().enumerate() {
            let column = x + i as u16 * 2;
            if column < area.right() {
                buf[(column, y)].set_symbol(LEVELS[level]).set_style(bar_style);
            }
        }

        if let Some(label) = self.label
            && y + 2 < area.bottom()
        {
            let label_width = UnicodeWidthStr::width(label.as_str()) as u16;
            let label_x = area.x + area.width.saturating_sub(label_width) / 2;
            buf.set_stringn(
                label_x,
                y + 2,
                label,
                area.width as usize,
                Style::default().fg(colors::NEUTRAL),
            );
        }
    }
}
