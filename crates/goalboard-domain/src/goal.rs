use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::field_update::FieldUpdate;

pub type GoalId = Uuid;
pub type OwnerId = Uuid;
pub type TemplateId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    Nutrition,
    Sport,
    #[serde(alias = "bien-etre")]
    Wellbeing,
    #[serde(alias = "autre")]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 4] = [
        GoalCategory::Nutrition,
        GoalCategory::Sport,
        GoalCategory::Wellbeing,
        GoalCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nutrition => "nutrition",
            Self::Sport => "sport",
            Self::Wellbeing => "wellbeing",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nutrition => "Nutrition",
            Self::Sport => "Sport",
            Self::Wellbeing => "Wellbeing",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nutrition" => Ok(Self::Nutrition),
            "sport" => Ok(Self::Sport),
            "wellbeing" | "well-being" | "bien-etre" => Ok(Self::Wellbeing),
            "other" | "autre" => Ok(Self::Other),
            _ => Err(UnknownVariant {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Kanban column key. Declaration order is the column order on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    #[serde(alias = "a-commencer")]
    NotStarted,
    #[serde(alias = "en-cours")]
    InProgress,
    #[serde(alias = "consolidation")]
    Consolidating,
    #[serde(alias = "acquis")]
    Achieved,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::NotStarted,
        GoalStatus::InProgress,
        GoalStatus::Consolidating,
        GoalStatus::Achieved,
    ];

    /// Column a goal lands in when created from a template.
    pub const INITIAL: GoalStatus = GoalStatus::NotStarted;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Consolidating => "consolidating",
            Self::Achieved => "achieved",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Consolidating => "Consolidating",
            Self::Achieved => "Achieved",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::NotStarted => "🎯",
            Self::InProgress => "🔄",
            Self::Consolidating => "💪",
            Self::Achieved => "✅",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Achieved
    }

    pub fn index(self) -> usize {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Consolidating => 2,
            Self::Achieved => 3,
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "not-started" | "notstarted" | "todo" | "a-commencer" => Ok(Self::NotStarted),
            "in-progress" | "inprogress" | "en-cours" => Ok(Self::InProgress),
            "consolidating" | "consolidation" => Ok(Self::Consolidating),
            "achieved" | "done" | "acquis" => Ok(Self::Achieved),
            _ => Err(UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub status: GoalStatus,
    pub order_position: i32,
    #[serde(default)]
    pub predefined_goal_id: Option<TemplateId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_from_predefined(&self) -> bool {
        self.predefined_goal_id.is_some()
    }

    pub fn apply_patch(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        patch.description.apply_to(&mut self.description);
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Insert payload. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub status: GoalStatus,
    pub order_position: i32,
    pub predefined_goal_id: Option<TemplateId>,
}

impl NewGoal {
    pub fn into_goal(self) -> Goal {
        let now = Utc::now();
        Goal {
            id: Uuid::new_v4(),
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status,
            order_position: self.order_position,
            predefined_goal_id: self.predefined_goal_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update carrying only the fields that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub category: Option<GoalCategory>,
    pub status: Option<GoalStatus>,
}

impl GoalPatch {
    pub fn status(status: GoalStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.description.is_change()
            && self.category.is_none()
            && self.status.is_none()
    }
}

/// Board order: ascending `order_position`, ties kept in insertion order.
pub fn sort_for_board(goals: &mut [Goal]) {
    goals.sort_by_key(|g| g.order_position);
}
