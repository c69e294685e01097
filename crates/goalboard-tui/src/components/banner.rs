use crate::theme::{ERROR_COLOR, SUCCESS_COLOR};
use goalboard_domain::{NoticeLevel, Notification};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerVariant {
    Error,
    Success,
}

impl BannerVariant {
    fn color(self) -> Color {
        match self {
            BannerVariant::Error => ERROR_COLOR,
            BannerVariant::Success => SUCCESS_COLOR,
        }
    }
}

impl From<NoticeLevel> for BannerVariant {
    fn from(level: NoticeLevel) -> Self {
        match level {
            NoticeLevel::Success => BannerVariant::Success,
            NoticeLevel::Error => BannerVariant::Error,
        }
    }
}

/// Transient message shown in the bottom bar.
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub variant: BannerVariant,
    pub created_at: Instant,
}

impl Banner {
    pub const TTL: Duration = Duration::from_secs(4);

    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            message: notification.message.clone(),
            variant: notification.level.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let color = self.variant.color();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text_style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let widget = Paragraph::new(self.message.as_str())
            .style(text_style)
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(widget, area);
    }
}
