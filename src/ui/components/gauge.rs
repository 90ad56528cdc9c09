use ratatui::{buffer::Buffer, layout::Rect, style::Style, symbols, widgets::Widget};

/// Single-row seek bar: played part, a knob, then the remaining part.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeekBar {
    ratio: f64,
    played_style: Style,
    knob_style: Style,
    remaining_style: Style,
}

impl SeekBar {
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    pub fn played_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.played_style = style.into();
        self
    }

    pub fn knob_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.knob_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }

    /// Column of the knob relative to the bar start.
    pub fn knob_offset(&self, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        ((f64::from(width - 1) * self.ratio).round() as u16).min(width - 1)
    }
}

impl Widget for SeekBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let knob = self.knob_offset(area.width);
        let y = area.top() + area.height / 2;

        for offset in 0..area.width {
            let (symbol, style) = match offset.cmp(&knob) {
                std::cmp::Ordering::Less => (symbols::line::THICK_HORIZONTAL, self.played_style),
                std::cmp::Ordering::Equal => ("●", self.knob_style),
                std::cmp::Ordering::Greater => (symbols::line::HORIZONTAL, self.remaining_style),
            };
            buf[(area.left() + offset, y)]
                .set_symbol(symbol)
                .set_style(style);
        }
    }
}

/// Integer slider position (0..=100) under `column`, or `None` outside the bar.
pub fn percent_at(bar: Rect, column: u16) -> Option<u8> {
    if bar.width == 0 || column < bar.left() || column >= bar.right() {
        return None;
    }
    if bar.width == 1 {
        return Some(0);
    }
    let offset = f64::from(column - bar.left());
    let span = f64::from(bar.width - 1);
    Some((offset / span * 100.0).round().clamp(0.0, 100.0) as u8)
}
