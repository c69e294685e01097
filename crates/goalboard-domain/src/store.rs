use async_trait::async_trait;
use goalboard_core::{GoalsError, GoalsResult};
use parking_lot::Mutex;

use crate::goal::{sort_for_board, Goal, GoalId, GoalPatch, NewGoal, OwnerId};
use crate::template::GoalTemplate;

/// Durable goal collection scoped by owner.
///
/// The board controller is the only caller; it reaches the store through
/// plain filtered CRUD and never holds a lock across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// The owner's goals, ascending by `order_position`.
    async fn list(&self, owner_id: OwnerId) -> GoalsResult<Vec<Goal>>;

    /// Inserts a goal; the store assigns its id and timestamps.
    async fn create(&self, goal: NewGoal) -> GoalsResult<Goal>;

    /// Fails with `NotFound` when the goal is absent or belongs to someone else.
    async fn update(&self, owner_id: OwnerId, id: GoalId, patch: GoalPatch) -> GoalsResult<()>;

    /// Fails with `NotFound` when the goal is absent.
    async fn delete(&self, owner_id: OwnerId, id: GoalId) -> GoalsResult<()>;

    /// Coach-authored templates kept alongside the goals.
    async fn templates(&self) -> GoalsResult<Vec<GoalTemplate>>;
}

pub fn goal_not_found(id: GoalId) -> GoalsError {
    GoalsError::NotFound(format!("Goal {}", id))
}

#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: Mutex<Vec<Goal>>,
    templates: Mutex<Vec<GoalTemplate>>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals: Mutex::new(goals),
            templates: Mutex::new(Vec::new()),
        }
    }

    pub fn add_template(&self, template: GoalTemplate) {
        self.templates.lock().push(template);
    }

    /// Every stored goal regardless of owner, in insertion order.
    pub fn all_goals(&self) -> Vec<Goal> {
        self.goals.lock().clone()
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn list(&self, owner_id: OwnerId) -> GoalsResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .lock()
            .iter()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect();
        sort_for_board(&mut goals);
        Ok(goals)
    }

    async fn create(&self, goal: NewGoal) -> GoalsResult<Goal> {
        let goal = goal.into_goal();
        self.goals.lock().push(goal.clone());
        Ok(goal)
    }

    async fn update(&self, owner_id: OwnerId, id: GoalId, patch: GoalPatch) -> GoalsResult<()> {
        let mut goals = self.goals.lock();
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id && g.owner_id == owner_id)
            .ok_or_else(|| goal_not_found(id))?;
        goal.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, owner_id: OwnerId, id: GoalId) -> GoalsResult<()> {
        let mut goals = self.goals.lock();
        let index = goals
            .iter()
            .position(|g| g.id == id && g.owner_id == owner_id)
            .ok_or_else(|| goal_not_found(id))?;
        goals.remove(index);
        Ok(())
    }

    async fn templates(&self) -> GoalsResult<Vec<GoalTemplate>> {
        Ok(self.templates.lock().clone())
    }
}
