//! Goal form payload and its validation.
//!
//! The form carries raw text exactly as typed so every field can be
//! checked at once and reported next to the input it belongs to. Nothing
//! reaches the store until `validate` succeeds.

use goalboard_core::{FieldError, GoalsError, GoalsResult};
use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;
use crate::goal::{Goal, GoalCategory, GoalPatch, GoalStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
}

impl Default for GoalForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: GoalCategory::Wellbeing.as_str().to_string(),
            status: GoalStatus::NotStarted.as_str().to_string(),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidGoal {
    pub title: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub status: GoalStatus,
}

impl GoalForm {
    pub fn new(title: impl Into<String>, category: GoalCategory) -> Self {
        Self {
            title: title.into(),
            category: category.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status.as_str().to_string();
        self
    }

    /// Prefills the edit form from an existing goal.
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone().unwrap_or_default(),
            category: goal.category.as_str().to_string(),
            status: goal.status.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> GoalsResult<ValidGoal> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        let category = match self.category.parse::<GoalCategory>() {
            Ok(category) => Some(category),
            Err(_) => {
                errors.push(FieldError::new("category", "Please choose a category"));
                None
            }
        };

        let status = match self.status.parse::<GoalStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FieldError::new("status", "Please choose a status"));
                None
            }
        };

        match (category, status) {
            (Some(category), Some(status)) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(ValidGoal {
                    title: title.to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                    category,
                    status,
                })
            }
            _ => Err(GoalsError::Validation(errors)),
        }
    }
}

impl ValidGoal {
    /// Fields that differ from `current`, for an edit that persists deltas only.
    pub fn diff(&self, current: &Goal) -> GoalPatch {
        GoalPatch {
            title: (self.title != current.title).then(|| self.title.clone()),
            description: FieldUpdate::between(&current.description, self.description.clone()),
            category: (self.category != current.category).then_some(self.category),
            status: (self.status != current.status).then_some(self.status),
        }
    }
}
