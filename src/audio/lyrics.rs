use crate::playlist::LyricCue;

/// Index of the cue being sung at `elapsed`: the last cue starting at or before it.
///
/// `None` before the first cue, for an empty list, or for a NaN position.
/// Relies on `cues` being sorted by time.
pub fn resolve(cues: &[LyricCue], elapsed: f64) -> Option<usize> {
    cues.partition_point(|cue| cue.time_seconds <= elapsed)
        .checked_sub(1)
}

/// Tracks the displayed lyric line. An unresolved position keeps the line on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricCursor {
    active: usize,
}

impl LyricCursor {
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn reset(&mut self) {
        self.active = 0;
    }

    /// Returns true when the displayed line changed.
    pub fn advance(&mut self, cues: &[LyricCue], elapsed: f64) -> bool {
        match resolve(cues, elapsed) {
            Some(index) if index != self.active => {
                self.active = index;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricWindow<'a> {
    pub previous: Option<&'a str>,
    pub current: &'a str,
    pub next: Option<&'a str>,
}

pub fn window(cues: &[LyricCue], active: usize) -> LyricWindow<'_> {
    let text = |index: usize| cues.get(index).map(|cue| cue.text.as_str());

    LyricWindow {
        previous: active.checked_sub(1).and_then(text),
        current: text(active).unwrap_or(""),
        next: if active + 1 < cues.len() {
            text(active + 1)
        } else {
            None
        },
    }
}
