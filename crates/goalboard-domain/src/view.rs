//! Column and card view models.
//!
//! Presentation-only slices over the controller's list. A column is a drop
//! target keyed by its status; a card is both a drag source and a drop
//! target. Neither mutates goals: they only turn input into intents.

use serde::Serialize;

use crate::drag::DropTarget;
use crate::goal::{Goal, GoalCategory, GoalId, GoalStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeIcon {
    Leaf,
    Dumbbell,
    Heart,
    Star,
}

impl BadgeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Leaf => "🍃",
            Self::Dumbbell => "🏋",
            Self::Heart => "♥",
            Self::Star => "★",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Blue,
    Pink,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryBadge {
    pub category: GoalCategory,
    pub icon: BadgeIcon,
    pub color: BadgeColor,
}

impl CategoryBadge {
    pub fn for_category(category: GoalCategory) -> Self {
        let (icon, color) = match category {
            GoalCategory::Nutrition => (BadgeIcon::Leaf, BadgeColor::Green),
            GoalCategory::Sport => (BadgeIcon::Dumbbell, BadgeColor::Blue),
            GoalCategory::Wellbeing => (BadgeIcon::Heart, BadgeColor::Pink),
            GoalCategory::Other => (BadgeIcon::Star, BadgeColor::Yellow),
        };
        Self {
            category,
            icon,
            color,
        }
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Part of a card that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRegion {
    Body,
    EditButton,
    DeleteButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIntent {
    BeginDrag(GoalId),
    Edit(GoalId),
    Delete(GoalId),
}

#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub goal: &'a Goal,
    /// Rendered dimmed while its floating duplicate follows the pointer.
    pub is_dragging: bool,
}

impl<'a> CardView<'a> {
    pub fn new(goal: &'a Goal, is_dragging: bool) -> Self {
        Self { goal, is_dragging }
    }

    pub fn id(&self) -> GoalId {
        self.goal.id
    }

    pub fn title(&self) -> &'a str {
        &self.goal.title
    }

    pub fn description(&self) -> Option<&'a str> {
        self.goal.description.as_deref()
    }

    pub fn badge(&self) -> CategoryBadge {
        CategoryBadge::for_category(self.goal.category)
    }

    pub fn drop_target(&self) -> DropTarget {
        DropTarget::Card(self.goal.id)
    }

    /// Only the card body starts a drag; the edit and delete controls are
    /// isolated from the drag sensor.
    pub fn pointer_down(&self, region: CardRegion) -> CardIntent {
        match region {
            CardRegion::Body => CardIntent::BeginDrag(self.goal.id),
            CardRegion::EditButton => CardIntent::Edit(self.goal.id),
            CardRegion::DeleteButton => CardIntent::Delete(self.goal.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    pub status: GoalStatus,
    pub cards: Vec<CardView<'a>>,
}

impl<'a> ColumnView<'a> {
    /// Splits the flat list into the four fixed columns, keeping list order.
    pub fn partition(goals: &'a [Goal], dragging: Option<GoalId>) -> Vec<ColumnView<'a>> {
        GoalStatus::ALL
            .iter()
            .map(|&status| ColumnView {
                status,
                cards: goals
                    .iter()
                    .filter(|g| g.status == status)
                    .map(|g| CardView::new(g, dragging == Some(g.id)))
                    .collect(),
            })
            .collect()
    }

    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    pub fn icon(&self) -> &'static str {
        self.status.icon()
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn drop_target(&self) -> DropTarget {
        DropTarget::Column(self.status)
    }

    pub fn card(&self, index: usize) -> Option<&CardView<'a>> {
        self.cards.get(index)
    }
}
