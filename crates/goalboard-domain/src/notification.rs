use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::goal::GoalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeKind {
    GoalAchieved,
    GoalMoved { status: GoalStatus },
    GoalCreated,
    GoalUpdated,
    GoalDeleted,
    TemplateAdded,
    MoveFailed,
    SaveFailed,
    DeleteFailed,
    TemplateFailed,
}

impl NoticeKind {
    pub fn level(self) -> NoticeLevel {
        match self {
            Self::MoveFailed | Self::SaveFailed | Self::DeleteFailed | Self::TemplateFailed => {
                NoticeLevel::Error
            }
            _ => NoticeLevel::Success,
        }
    }

    pub fn message(self) -> String {
        match self {
            Self::GoalAchieved => "Well done! Another goal achieved! 🎉".to_string(),
            Self::GoalMoved { status } => format!("Goal moved to {}", status.title()),
            Self::GoalCreated => "Goal created".to_string(),
            Self::GoalUpdated => "Goal updated".to_string(),
            Self::GoalDeleted => "Goal deleted".to_string(),
            Self::TemplateAdded => "Goal added!".to_string(),
            Self::MoveFailed => "Could not move the goal".to_string(),
            Self::SaveFailed => "Could not save the goal".to_string(),
            Self::DeleteFailed => "Could not delete the goal".to_string(),
            Self::TemplateFailed => "Could not add the goal".to_string(),
        }
    }
}

/// Transient user-facing message raised by a board operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    #[serde(flatten)]
    pub kind: NoticeKind,
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NoticeKind) -> Self {
        Self {
            kind,
            level: kind.level(),
            message: kind.message(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_celebration(&self) -> bool {
        self.kind == NoticeKind::GoalAchieved
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
