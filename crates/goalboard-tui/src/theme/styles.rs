use super::colors::*;
use goalboard_domain::BadgeColor;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

/// Column currently under a dragged card.
pub fn drop_target_border() -> Style {
    Style::default()
        .fg(DROP_TARGET_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

/// Placeholder left in the column while the card is being dragged.
pub fn ghost_card() -> Style {
    Style::default()
        .fg(GHOST_TEXT)
        .add_modifier(Modifier::DIM)
}

pub fn floating_card() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn badge_style(color: BadgeColor) -> Style {
    let color = match color {
        BadgeColor::Green => BADGE_GREEN,
        BadgeColor::Blue => BADGE_BLUE,
        BadgeColor::Pink => BADGE_PINK,
        BadgeColor::Yellow => BADGE_YELLOW,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}
