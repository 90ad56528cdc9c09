use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{ui::util::animation_clock, util::colors};

/// One full turn every this many milliseconds.
const REVOLUTION_MILLIS: u128 = 3_000;
const LABEL_RADIUS: f64 = 0.38;
const SPINDLE_RADIUS: f64 = 0.08;
/// Width of the moving light reflection, in radians.
const GLARE_ARC: f64 = 0.45;

/// A record seen from above. The glare turns while the track plays.
pub struct VinylWidget<'a> {
    label: &'a str,
    spinning: bool,
    now_millis: u128,
}

impl<'a> VinylWidget<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            spinning: false,
            now_millis: animation_clock(),
        }
    }

    pub fn spinning(mut self, spinning: bool) -> Self {
        self.spinning = spinning;
        self
    }

    pub fn at(mut self, now_millis: u128) -> Self {
        self.now_millis = now_millis;
        self
    }

    /// Current rotation in radians. A stopped record rests at zero.
    pub fn angle(&self) -> f64 {
        if !self.spinning {
            return 0.0;
        }
        (self.now_millis % REVOLUTION_MILLIS) as f64 / REVOLUTION_MILLIS as f64 * TAU
    }

    fn in_glare(angle: f64, rotation: f64) -> bool {
        let delta = (angle - rotation).rem_euclid(TAU);
        delta < GLARE_ARC || (delta - TAU / 2.0).abs() < GLARE_ARC / 2.0
    }
}

impl Widget for VinylWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        // cells are roughly twice as tall as they are wide
        let radius = f64::from(area.height.min(area.width / 2)) / 2.0;
        let cx = f64::from(area.x) + f64::from(area.width) / 2.0;
        let cy = f64::from(area.y) + f64::from(area.height) / 2.0;
        let rotation = self.angle();

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let dx = (f64::from(x) + 0.5 - cx) / 2.0 / radius;
                let dy = (f64::from(y) + 0.5 - cy) / radius;
                let distance = dx.hypot(dy);
                if distance > 1.0 {
                    continue;
                }

                let (symbol, style) = if distance < SPINDLE_RADIUS {
                    ("●", Style::default().fg(colors::BACKGROUND).bg(colors::PRIMARY))
                } else if distance < LABEL_RADIUS {
                    (" ", Style::default().bg(colors::PRIMARY))
                } else if Self::in_glare(dy.atan2(dx), rotation) {
                    ("▒", Style::default().fg(colors::NEUTRAL).bg(colors::VINYL))
                } else if (distance * 10.0) as u32 % 2 == 0 {
                    ("░", Style::default().fg(colors::GROOVE).bg(colors::VINYL))
                } else {
                    (" ", Style::default().bg(colors::VINYL))
                };
                buf[(x, y)].set_symbol(symbol).set_style(style);
            }
        }

        let label_width = (2.0 * 2.0 * radius * LABEL_RADIUS) as usize;
        let row = area.y + area.height / 2;
        if label_width > 0 {
            let label: String = self
                .label
                .chars()
                .scan(0, |width, ch| {
                    *width += UnicodeWidthStr::width(ch.to_string().as_str());
                    (*width <= label_width).then_some(ch)
                })
                .collect();
            let x = (cx - UnicodeWidthStr::width(label.as_str()) as f64 / 2.0).max(0.0) as u16;
            buf.set_stringn(
                x,
                row,
                label,
                label_width,
                Style::default()
                    .fg(colors::BACKGROUND)
                    .bg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
