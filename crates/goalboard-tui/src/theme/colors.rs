use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;
pub const DROP_TARGET_BORDER: Color = Color::Yellow;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const GHOST_TEXT: Color = Color::DarkGray;

pub const BADGE_GREEN: Color = Color::Green;
pub const BADGE_BLUE: Color = Color::Blue;
pub const BADGE_PINK: Color = Color::LightMagenta;
pub const BADGE_YELLOW: Color = Color::Yellow;

pub const POPUP_BG: Color = Color::Black;
pub const SUCCESS_COLOR: Color = Color::Green;
pub const ERROR_COLOR: Color = Color::Red;
