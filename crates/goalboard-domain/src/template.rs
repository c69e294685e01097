use serde::{Deserialize, Serialize};

use crate::goal::{GoalCategory, GoalStatus, NewGoal, OwnerId, TemplateId};

/// A predefined goal suggestion. Built-in suggestions have no id; templates
/// authored by a coach and kept in the store carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTemplate {
    #[serde(default)]
    pub id: Option<TemplateId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: GoalCategory,
}

impl GoalTemplate {
    pub fn new(title: &str, category: GoalCategory, description: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            description: Some(description.to_string()),
            category,
        }
    }

    /// Insert payload for this template. Template goals always start in the first column.
    pub fn to_new_goal(&self, owner_id: OwnerId, order_position: i32) -> NewGoal {
        NewGoal {
            owner_id,
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            status: GoalStatus::INITIAL,
            order_position,
            predefined_goal_id: self.id,
        }
    }
}

/// Starter suggestions offered on every board.
pub fn builtin_templates() -> Vec<GoalTemplate> {
    vec![
        GoalTemplate::new(
            "Drink a glass of water on waking",
            GoalCategory::Nutrition,
            "Rehydrate the body after the night.",
        ),
        GoalTemplate::new(
            "Eat seated and without screens",
            GoalCategory::Nutrition,
            "Take the time to enjoy the meal.",
        ),
        GoalTemplate::new(
            "Take a 10 minute walk",
            GoalCategory::Sport,
            "A short walk after a meal or to get some air.",
        ),
        GoalTemplate::new(
            "Cardiac coherence 3x a day",
            GoalCategory::Wellbeing,
            "5 minutes of breathing to calm down.",
        ),
        GoalTemplate::new(
            "Write down 3 gratitudes in the evening",
            GoalCategory::Wellbeing,
            "Cultivate positive thinking before sleep.",
        ),
        GoalTemplate::new(
            "Put the fork down between bites",
            GoalCategory::Nutrition,
            "Slow down the pace of the meal.",
        ),
    ]
}
