use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00f2b8a2);
pub const NEUTRAL: Color = Color::from_u32(0x00595959);
pub const BACKGROUND: Color = Color::from_u32(0x00121212);
pub const ACCENT: Color = Color::from_u32(0x00ffe3b3);
pub const VINYL: Color = Color::from_u32(0x00262626);
pub const GROOVE: Color = Color::from_u32(0x003a3a3a);
