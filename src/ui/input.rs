use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextTrack),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousTrack),
            (KeyCode::Char('s'), _) => Some(AppMessage::ToggleShuffle),
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Some(AppMessage::SeekBy(-1)),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Some(AppMessage::SeekBy(1)),
            (KeyCode::Char(digit @ '0'..='9'), _) => {
                let tenth = digit.to_digit(10).unwrap_or_default() as u8;
                Some(AppMessage::SeekTo(tenth * 10))
            }
            _ => None,
        }
    }
}
