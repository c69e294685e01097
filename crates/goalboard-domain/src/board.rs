//! The goal board controller.
//!
//! Owns the single authoritative, flat list of the actor's goals for the
//! session. Drag gestures arrive as start/over/end calls: hover events only
//! rearrange the in-memory list, and a drop persists just the dragged goal's
//! status. Create, edit, delete and template flows go through here too, so
//! this is the only place goal state changes.

use std::collections::VecDeque;

use goalboard_core::{GoalsError, GoalsResult};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::drag::{self, DropTarget};
use crate::goal::{sort_for_board, Goal, GoalId, GoalPatch, GoalStatus, NewGoal, OwnerId};
use crate::input::GoalForm;
use crate::notification::{NoticeKind, Notification};
use crate::store::GoalStore;
use crate::template::{builtin_templates, GoalTemplate};
use crate::view::ColumnView;

/// What happens to optimistic local changes when the store rejects a drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Keep the local change even though it was not persisted.
    #[default]
    Keep,
    /// Restore the board as it was when the drag started.
    Revert,
}

impl RollbackPolicy {
    pub fn from_flag(revert: bool) -> Self {
        if revert {
            Self::Revert
        } else {
            Self::Keep
        }
    }
}

/// The authenticated actor the board belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardContext {
    pub owner_id: OwnerId,
}

impl BoardContext {
    pub fn new(owner_id: OwnerId) -> Self {
        Self { owner_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DragOutcome {
    /// The dragged goal is not on the board.
    Ignored,
    /// Dropped back into the column it started in; nothing persisted.
    Unchanged,
    /// Status change persisted.
    Moved { goal_id: GoalId, status: GoalStatus },
    /// The store rejected the status change.
    Failed {
        goal_id: GoalId,
        status: GoalStatus,
        reverted: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

#[derive(Debug, Clone)]
struct DragSession {
    dragged: GoalId,
    origin_status: GoalStatus,
    /// Board as it was before the first hover event.
    snapshot: Vec<Goal>,
    /// Most recent hover target; the pointer repeats it many times per gesture.
    last_target: Option<DropTarget>,
}

pub struct BoardController<S> {
    store: S,
    context: BoardContext,
    policy: RollbackPolicy,
    goals: Vec<Goal>,
    drag: Option<DragSession>,
    editing: Option<Goal>,
    notifications: VecDeque<Notification>,
}

impl<S: GoalStore> BoardController<S> {
    pub fn new(store: S, context: BoardContext) -> Self {
        Self {
            store,
            context,
            policy: RollbackPolicy::default(),
            goals: Vec::new(),
            drag: None,
            editing: None,
            notifications: VecDeque::new(),
        }
    }

    pub fn with_policy(mut self, policy: RollbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owner_id(&self) -> OwnerId {
        self.context.owner_id
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    /// The four status columns, each holding its goals in list order.
    pub fn columns(&self) -> Vec<ColumnView<'_>> {
        ColumnView::partition(&self.goals, self.active_drag_id())
    }

    pub fn active_drag_id(&self) -> Option<GoalId> {
        self.drag.as_ref().map(|s| s.dragged)
    }

    /// The goal following the pointer, rendered as a floating duplicate.
    pub fn active_goal(&self) -> Option<&Goal> {
        self.active_drag_id().and_then(|id| self.goal(id))
    }

    pub fn editing_goal(&self) -> Option<&Goal> {
        self.editing.as_ref()
    }

    pub fn begin_edit(&mut self, id: GoalId) -> Option<&Goal> {
        self.editing = self.goal(id).cloned();
        self.editing.as_ref()
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, kind: NoticeKind) {
        self.notifications.push_back(Notification::new(kind));
    }

    /// Fetches the owner's goals. A failing store leaves an empty board; a
    /// later reload recovers.
    pub async fn load(&mut self) -> usize {
        match self.store.list(self.context.owner_id).await {
            Ok(mut goals) => {
                sort_for_board(&mut goals);
                self.goals = goals;
                debug!(count = self.goals.len(), "Loaded goals");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load goals");
                self.goals.clear();
            }
        }
        self.goals.len()
    }

    pub fn on_drag_start(&mut self, dragged: GoalId) -> bool {
        let Some(goal) = self.goal(dragged) else {
            debug!(%dragged, "Drag start on unknown goal");
            return false;
        };
        debug!(%dragged, status = %goal.status, "Drag started");
        self.drag = Some(DragSession {
            dragged,
            origin_status: goal.status,
            snapshot: self.goals.clone(),
            last_target: None,
        });
        true
    }

    /// Hover event. Cheap, in-memory only, and absorbs repeats of the
    /// previous target so a stream of identical events acts like one.
    pub fn on_drag_over(&mut self, dragged: GoalId, target: DropTarget) -> bool {
        if self.active_drag_id() != Some(dragged) && !self.on_drag_start(dragged) {
            return false;
        }
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        if session.last_target == Some(target) {
            return false;
        }
        session.last_target = Some(target);
        drag::apply_drag_over(&mut self.goals, dragged, target)
    }

    /// The pointer left whatever it was hovering, so re-entering the same
    /// target counts as a new hover.
    pub fn on_drag_leave(&mut self) {
        if let Some(session) = self.drag.as_mut() {
            session.last_target = None;
        }
    }

    /// Drop. Persists the dragged goal's status when it differs from the
    /// status it had at drag start. The drag session ends regardless.
    pub async fn on_drag_end(&mut self, dragged: GoalId, target: Option<DropTarget>) -> DragOutcome {
        let session = self.drag.take().filter(|s| s.dragged == dragged);

        let Some(new_status) = drag::resolve_drop_status(&self.goals, dragged, target) else {
            return DragOutcome::Ignored;
        };
        let origin_status = match &session {
            Some(s) => s.origin_status,
            None => self.goal(dragged).map_or(new_status, |g| g.status),
        };

        if let Some(goal) = self.goal_mut(dragged) {
            goal.status = new_status;
        }
        if new_status == origin_status {
            debug!(%dragged, "Dropped without a status change");
            return DragOutcome::Unchanged;
        }

        let owner_id = self.context.owner_id;
        match self
            .store
            .update(owner_id, dragged, GoalPatch::status(new_status))
            .await
        {
            Ok(()) => {
                info!(%dragged, from = %origin_status, to = %new_status, "Goal moved");
                if new_status.is_terminal() {
                    self.notify(NoticeKind::GoalAchieved);
                } else {
                    self.notify(NoticeKind::GoalMoved { status: new_status });
                }
                DragOutcome::Moved {
                    goal_id: dragged,
                    status: new_status,
                }
            }
            Err(e) => {
                warn!(%dragged, error = %e, "Failed to persist goal status");
                self.notify(NoticeKind::MoveFailed);
                let reverted = self.policy == RollbackPolicy::Revert;
                if reverted {
                    match session {
                        Some(s) => self.goals = s.snapshot,
                        None => {
                            if let Some(goal) = self.goal_mut(dragged) {
                                goal.status = origin_status;
                            }
                        }
                    }
                }
                DragOutcome::Failed {
                    goal_id: dragged,
                    status: new_status,
                    reverted,
                }
            }
        }
    }

    /// Abandons the gesture and restores the board as it was at drag start.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(session) => {
                debug!(dragged = %session.dragged, "Drag cancelled");
                self.goals = session.snapshot;
                true
            }
            None => false,
        }
    }

    /// Next position on this owner's board: one past the highest across every
    /// column, or 0 for an empty board.
    async fn next_order_position(&self) -> GoalsResult<i32> {
        let goals = self.store.list(self.context.owner_id).await?;
        match goals.iter().map(|g| g.order_position).max() {
            None => Ok(0),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                GoalsError::Internal(format!("No order position left after {}", max))
            }),
        }
    }

    async fn insert(
        &mut self,
        mut new_goal: NewGoal,
        success: NoticeKind,
        failure: NoticeKind,
    ) -> GoalsResult<Goal> {
        let created = match self.next_order_position().await {
            Ok(position) => {
                new_goal.order_position = position;
                self.store.create(new_goal).await
            }
            Err(e) => Err(e),
        };

        match created {
            Ok(goal) => {
                info!(id = %goal.id, position = goal.order_position, "Goal created");
                self.goals.push(goal.clone());
                self.notify(success);
                Ok(goal)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create goal");
                self.notify(failure);
                Err(e)
            }
        }
    }

    pub async fn create_goal(&mut self, form: &GoalForm) -> GoalsResult<Goal> {
        let valid = form.validate()?;
        let new_goal = NewGoal {
            owner_id: self.context.owner_id,
            title: valid.title,
            description: valid.description,
            category: valid.category,
            status: valid.status,
            order_position: 0,
            predefined_goal_id: None,
        };
        let goal = self
            .insert(new_goal, NoticeKind::GoalCreated, NoticeKind::SaveFailed)
            .await?;
        self.end_edit();
        Ok(goal)
    }

    /// Persists only the fields that differ from the local goal.
    pub async fn update_goal(&mut self, id: GoalId, form: &GoalForm) -> GoalsResult<Goal> {
        let valid = form.validate()?;
        let current = self
            .goal(id)
            .cloned()
            .ok_or_else(|| GoalsError::NotFound(format!("Goal {}", id)))?;

        let patch = valid.diff(&current);
        if patch.is_empty() {
            debug!(%id, "Edit without changes");
            self.end_edit();
            return Ok(current);
        }

        let owner_id = self.context.owner_id;
        match self.store.update(owner_id, id, patch.clone()).await {
            Ok(()) => {
                let goal = self
                    .goal_mut(id)
                    .ok_or_else(|| GoalsError::NotFound(format!("Goal {}", id)))?;
                goal.apply_patch(patch);
                let updated = goal.clone();
                info!(%id, "Goal updated");
                self.notify(NoticeKind::GoalUpdated);
                self.end_edit();
                Ok(updated)
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to update goal");
                self.notify(NoticeKind::SaveFailed);
                Err(e)
            }
        }
    }

    /// Deletes after the user confirms. A failed delete leaves the board as is.
    pub async fn delete_goal(
        &mut self,
        id: GoalId,
        confirm: &impl Confirm,
    ) -> GoalsResult<DeleteOutcome> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.store.delete(self.context.owner_id, id).await {
            Ok(()) => {
                self.goals.retain(|g| g.id != id);
                info!(%id, "Goal deleted");
                self.notify(NoticeKind::GoalDeleted);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to delete goal");
                self.notify(NoticeKind::DeleteFailed);
                Err(e)
            }
        }
    }

    /// Creates a goal from a suggestion, always in the first column.
    pub async fn add_from_template(&mut self, template: &GoalTemplate) -> GoalsResult<Goal> {
        let new_goal = template.to_new_goal(self.context.owner_id, 0);
        self.insert(new_goal, NoticeKind::TemplateAdded, NoticeKind::TemplateFailed)
            .await
    }

    /// Built-in suggestions followed by any the store holds.
    pub async fn templates(&self) -> Vec<GoalTemplate> {
        let mut templates = builtin_templates();
        match self.store.templates().await {
            Ok(stored) => templates.extend(stored),
            Err(e) => warn!(error = %e, "Failed to load stored templates"),
        }
        templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::Preconfirmed;
    use crate::goal::GoalCategory;
    use crate::notification::NoticeLevel;
    use crate::store::{InMemoryGoalStore, MockGoalStore};
    use mockall::predicate::eq;
    use std::cell::Cell;
    use uuid::Uuid;

    fn stored_goal(owner_id: OwnerId, title: &str, status: GoalStatus, position: i32) -> Goal {
        NewGoal {
            owner_id,
            title: title.to_string(),
            description: None,
            category: GoalCategory::Wellbeing,
            status,
            order_position: position,
            predefined_goal_id: None,
        }
        .into_goal()
    }

    async fn board_with(
        goals: &[(&str, GoalStatus)],
    ) -> (BoardController<InMemoryGoalStore>, Vec<GoalId>) {
        let owner = Uuid::new_v4();
        let goals: Vec<Goal> = goals
            .iter()
            .enumerate()
            .map(|(i, (title, status))| stored_goal(owner, title, *status, i as i32))
            .collect();
        let ids = goals.iter().map(|g| g.id).collect();
        let mut board = BoardController::new(
            InMemoryGoalStore::with_goals(goals),
            BoardContext::new(owner),
        );
        board.load().await;
        (board, ids)
    }

    fn order(board: &BoardController<impl GoalStore>) -> Vec<(String, GoalStatus)> {
        board
            .goals()
            .iter()
            .map(|g| (g.title.clone(), g.status))
            .collect()
    }

    fn mock_with_goals(goals: Vec<Goal>) -> MockGoalStore {
        let mut store = MockGoalStore::new();
        store
            .expect_list()
            .returning(move |_| Ok(goals.clone()));
        store
    }

    #[tokio::test]
    async fn test_load_orders_by_position() {
        let owner = Uuid::new_v4();
        let store = InMemoryGoalStore::with_goals(vec![
            stored_goal(owner, "late", GoalStatus::NotStarted, 9),
            stored_goal(owner, "early", GoalStatus::Achieved, 1),
        ]);
        let mut board = BoardController::new(store, BoardContext::new(owner));

        assert_eq!(board.load().await, 2);
        assert_eq!(board.goals()[0].title, "early");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_board() {
        let mut store = MockGoalStore::new();
        store
            .expect_list()
            .returning(|_| Err(GoalsError::Connection("offline".into())));
        let mut board = BoardController::new(store, BoardContext::new(Uuid::new_v4()));

        assert_eq!(board.load().await, 0);
        assert!(board.goals().is_empty());
        assert!(board.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_drag_start_records_active_goal() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::NotStarted)]).await;

        assert!(board.on_drag_start(ids[0]));
        assert_eq!(board.active_drag_id(), Some(ids[0]));
        assert_eq!(board.active_goal().map(|g| g.title.as_str()), Some("A"));
        assert!(board.columns()[0].cards[0].is_dragging);
        assert!(!board.on_drag_start(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_repeated_over_events_match_a_single_one() {
        let owner = Uuid::new_v4();
        let goals = vec![
            stored_goal(owner, "A", GoalStatus::InProgress, 0),
            stored_goal(owner, "B", GoalStatus::InProgress, 1),
            stored_goal(owner, "C", GoalStatus::InProgress, 2),
            stored_goal(owner, "D", GoalStatus::NotStarted, 3),
        ];
        let ids: Vec<GoalId> = goals.iter().map(|g| g.id).collect();
        let context = BoardContext::new(owner);
        let mut once = BoardController::new(InMemoryGoalStore::with_goals(goals.clone()), context);
        let mut many = BoardController::new(InMemoryGoalStore::with_goals(goals), context);
        once.load().await;
        many.load().await;

        for (dragged, target) in [
            (ids[0], DropTarget::Card(ids[2])),
            (ids[3], DropTarget::Card(ids[1])),
            (ids[1], DropTarget::Column(GoalStatus::Achieved)),
        ] {
            once.on_drag_start(dragged);
            once.on_drag_over(dragged, target);

            many.on_drag_start(dragged);
            for _ in 0..25 {
                many.on_drag_over(dragged, target);
            }

            assert_eq!(order(&once), order(&many));
            once.cancel_drag();
            many.cancel_drag();
        }
    }

    #[tokio::test]
    async fn test_reentering_a_target_after_leave_applies_again() {
        let (mut board, ids) = board_with(&[
            ("A", GoalStatus::InProgress),
            ("B", GoalStatus::InProgress),
        ])
        .await;

        board.on_drag_start(ids[0]);
        assert!(board.on_drag_over(ids[0], DropTarget::Card(ids[1])));
        assert!(!board.on_drag_over(ids[0], DropTarget::Card(ids[1])));

        board.on_drag_leave();
        assert!(board.on_drag_over(ids[0], DropTarget::Card(ids[1])));
        let titles: Vec<_> = board.goals().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_moving_to_other_column_changes_only_that_goal() {
        let (mut board, ids) = board_with(&[
            ("A", GoalStatus::NotStarted),
            ("B", GoalStatus::Consolidating),
            ("C", GoalStatus::InProgress),
        ])
        .await;

        board.on_drag_start(ids[0]);
        board.on_drag_over(ids[0], DropTarget::Card(ids[1]));

        assert_eq!(board.goal(ids[0]).unwrap().status, GoalStatus::Consolidating);
        assert_eq!(board.goal(ids[1]).unwrap().status, GoalStatus::Consolidating);
        assert_eq!(board.goal(ids[2]).unwrap().status, GoalStatus::InProgress);
    }

    #[tokio::test]
    async fn test_reorder_within_column_keeps_statuses_and_skips_store() {
        let owner = Uuid::new_v4();
        let goals = vec![
            stored_goal(owner, "A", GoalStatus::InProgress, 0),
            stored_goal(owner, "B", GoalStatus::InProgress, 1),
        ];
        let (a, b) = (goals[0].id, goals[1].id);
        let mut store = mock_with_goals(goals);
        store.expect_update().never();
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        board.on_drag_start(a);
        board.on_drag_over(a, DropTarget::Card(b));
        let outcome = board.on_drag_end(a, Some(DropTarget::Card(b))).await;

        assert_eq!(outcome, DragOutcome::Unchanged);
        assert_eq!(
            order(&board),
            vec![
                ("B".to_string(), GoalStatus::InProgress),
                ("A".to_string(), GoalStatus::InProgress)
            ]
        );
        assert!(board.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_card_onto_card_in_other_column_persists_once() {
        let owner = Uuid::new_v4();
        let goals = vec![
            stored_goal(owner, "A", GoalStatus::NotStarted, 0),
            stored_goal(owner, "B", GoalStatus::InProgress, 1),
        ];
        let (a, b) = (goals[0].id, goals[1].id);
        let mut store = mock_with_goals(goals);
        store
            .expect_update()
            .with(eq(owner), eq(a), eq(GoalPatch::status(GoalStatus::InProgress)))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        board.on_drag_start(a);
        for _ in 0..10 {
            board.on_drag_over(a, DropTarget::Card(b));
        }
        let outcome = board.on_drag_end(a, Some(DropTarget::Card(b))).await;

        assert_eq!(
            outcome,
            DragOutcome::Moved {
                goal_id: a,
                status: GoalStatus::InProgress
            }
        );
        let in_progress: Vec<_> = board.columns()[1]
            .cards
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(in_progress, vec!["A", "B"]);
        assert!(board.columns()[0].is_empty());
        assert_eq!(board.active_drag_id(), None);

        let notices = board.take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Goal moved to In progress");
    }

    #[tokio::test]
    async fn test_drop_on_achieved_column_celebrates() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::Consolidating)]).await;

        board.on_drag_start(ids[0]);
        board.on_drag_over(ids[0], DropTarget::Column(GoalStatus::Achieved));
        let outcome = board
            .on_drag_end(ids[0], Some(DropTarget::Column(GoalStatus::Achieved)))
            .await;

        assert!(matches!(outcome, DragOutcome::Moved { status: GoalStatus::Achieved, .. }));
        let notices = board.take_notifications();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_celebration());

        let stored = board.store().all_goals();
        assert_eq!(stored[0].status, GoalStatus::Achieved);
    }

    #[tokio::test]
    async fn test_drop_on_other_column_is_neutral() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::Achieved)]).await;

        board.on_drag_start(ids[0]);
        board
            .on_drag_end(ids[0], Some(DropTarget::Column(GoalStatus::NotStarted)))
            .await;

        let notices = board.take_notifications();
        assert_eq!(notices.len(), 1);
        assert!(!notices[0].is_celebration());
        assert_eq!(notices[0].kind, NoticeKind::GoalMoved { status: GoalStatus::NotStarted });
    }

    #[tokio::test]
    async fn test_drop_outside_after_hover_still_persists() {
        let (mut board, ids) = board_with(&[
            ("A", GoalStatus::NotStarted),
            ("B", GoalStatus::Consolidating),
        ])
        .await;

        board.on_drag_start(ids[0]);
        board.on_drag_over(ids[0], DropTarget::Card(ids[1]));
        let outcome = board.on_drag_end(ids[0], None).await;

        assert_eq!(
            outcome,
            DragOutcome::Moved {
                goal_id: ids[0],
                status: GoalStatus::Consolidating
            }
        );
        let stored = board.store().list(board.owner_id()).await.unwrap();
        assert!(stored.iter().all(|g| g.status == GoalStatus::Consolidating));
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_local_change_by_default() {
        let owner = Uuid::new_v4();
        let goals = vec![stored_goal(owner, "A", GoalStatus::NotStarted, 0)];
        let a = goals[0].id;
        let mut store = mock_with_goals(goals);
        store
            .expect_update()
            .times(1)
            .returning(|_, _, _| Err(GoalsError::Connection("offline".into())));
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        board.on_drag_start(a);
        board.on_drag_over(a, DropTarget::Column(GoalStatus::InProgress));
        let outcome = board
            .on_drag_end(a, Some(DropTarget::Column(GoalStatus::InProgress)))
            .await;

        assert_eq!(
            outcome,
            DragOutcome::Failed {
                goal_id: a,
                status: GoalStatus::InProgress,
                reverted: false
            }
        );
        assert_eq!(board.goal(a).unwrap().status, GoalStatus::InProgress);
        assert_eq!(board.active_drag_id(), None);
        let notices = board.take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_failed_persist_reverts_with_revert_policy() {
        let owner = Uuid::new_v4();
        let goals = vec![
            stored_goal(owner, "A", GoalStatus::NotStarted, 0),
            stored_goal(owner, "B", GoalStatus::InProgress, 1),
        ];
        let (a, b) = (goals[0].id, goals[1].id);
        let mut store = mock_with_goals(goals);
        store
            .expect_update()
            .returning(|_, _, _| Err(GoalsError::Store("rejected".into())));
        let mut board = BoardController::new(store, BoardContext::new(owner))
            .with_policy(RollbackPolicy::Revert);
        board.load().await;
        let before = order(&board);

        board.on_drag_start(a);
        board.on_drag_over(a, DropTarget::Card(b));
        let outcome = board.on_drag_end(a, Some(DropTarget::Card(b))).await;

        assert!(matches!(outcome, DragOutcome::Failed { reverted: true, .. }));
        assert_eq!(order(&board), before);
        assert_eq!(board.active_drag_id(), None);
    }

    #[tokio::test]
    async fn test_cancel_drag_restores_board() {
        let (mut board, ids) = board_with(&[
            ("A", GoalStatus::NotStarted),
            ("B", GoalStatus::Achieved),
        ])
        .await;
        let before = order(&board);

        board.on_drag_start(ids[0]);
        board.on_drag_over(ids[0], DropTarget::Card(ids[1]));
        assert_ne!(order(&board), before);

        assert!(board.cancel_drag());
        assert_eq!(order(&board), before);
        assert!(!board.cancel_drag());
    }

    #[tokio::test]
    async fn test_over_without_start_opens_a_session() {
        let (mut board, ids) = board_with(&[
            ("A", GoalStatus::NotStarted),
            ("B", GoalStatus::InProgress),
        ])
        .await;

        assert!(board.on_drag_over(ids[0], DropTarget::Column(GoalStatus::InProgress)));
        assert_eq!(board.active_drag_id(), Some(ids[0]));
        let outcome = board.on_drag_end(ids[0], None).await;
        assert!(matches!(outcome, DragOutcome::Moved { .. }));
    }

    #[tokio::test]
    async fn test_drag_end_for_unknown_goal_is_ignored() {
        let (mut board, _) = board_with(&[("A", GoalStatus::NotStarted)]).await;
        assert_eq!(board.on_drag_end(Uuid::new_v4(), None).await, DragOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_create_assigns_position_past_every_column() {
        let (mut board, _) = board_with(&[
            ("A", GoalStatus::NotStarted),
            ("B", GoalStatus::Achieved),
            ("C", GoalStatus::InProgress),
        ])
        .await;

        let goal = board
            .create_goal(&GoalForm::new("Sleep by 11pm", GoalCategory::Wellbeing))
            .await
            .unwrap();

        assert_eq!(goal.order_position, 3);
        assert!(board
            .goals()
            .iter()
            .filter(|g| g.id != goal.id)
            .all(|g| g.order_position < goal.order_position));
        assert_eq!(board.goals().last().unwrap().id, goal.id);
        assert_eq!(board.take_notifications()[0].kind, NoticeKind::GoalCreated);
    }

    #[tokio::test]
    async fn test_first_goal_gets_position_zero() {
        let mut board =
            BoardController::new(InMemoryGoalStore::new(), BoardContext::new(Uuid::new_v4()));
        let goal = board
            .create_goal(&GoalForm::new("Walk", GoalCategory::Sport))
            .await
            .unwrap();
        assert_eq!(goal.order_position, 0);
        assert_eq!(goal.owner_id, board.owner_id());
    }

    #[tokio::test]
    async fn test_create_past_last_position_fails_without_store_write() {
        let owner = Uuid::new_v4();
        let mut store = mock_with_goals(vec![stored_goal(
            owner,
            "A",
            GoalStatus::NotStarted,
            i32::MAX,
        )]);
        store.expect_create().never();
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        let err = board
            .create_goal(&GoalForm::new("Walk", GoalCategory::Sport))
            .await
            .unwrap_err();

        assert!(matches!(err, GoalsError::Internal(_)));
        assert_eq!(board.goals().len(), 1);
        let notices = board.take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::SaveFailed);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let mut store = MockGoalStore::new();
        store.expect_list().never();
        store.expect_create().never();
        store.expect_update().never();
        let mut board = BoardController::new(store, BoardContext::new(Uuid::new_v4()));

        let form = GoalForm {
            title: "  ".into(),
            category: "knitting".into(),
            ..Default::default()
        };
        let err = board.create_goal(&form).await.unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
        let err = board.update_goal(Uuid::new_v4(), &form).await.unwrap_err();
        assert!(!err.is_store_failure());
        assert!(board.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_notifies_and_leaves_board() {
        let mut store = MockGoalStore::new();
        store.expect_list().returning(|_| Ok(Vec::new()));
        store
            .expect_create()
            .returning(|_| Err(GoalsError::Connection("offline".into())));
        let mut board = BoardController::new(store, BoardContext::new(Uuid::new_v4()));

        let result = board
            .create_goal(&GoalForm::new("Walk", GoalCategory::Sport))
            .await;

        assert!(result.is_err());
        assert!(board.goals().is_empty());
        assert!(board.take_notifications()[0].is_error());
    }

    #[tokio::test]
    async fn test_update_sends_only_deltas() {
        let owner = Uuid::new_v4();
        let mut goal = stored_goal(owner, "Walk", GoalStatus::InProgress, 0);
        goal.description = Some("after lunch".into());
        let id = goal.id;
        let mut store = mock_with_goals(vec![goal.clone()]);
        store
            .expect_update()
            .withf(move |o, i, patch| {
                *o == owner
                    && *i == id
                    && patch.title.as_deref() == Some("Walk 20 minutes")
                    && !patch.description.is_change()
                    && patch.category.is_none()
                    && patch.status.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;
        board.begin_edit(id);

        let mut form = GoalForm::from_goal(&goal);
        form.title = "Walk 20 minutes".into();
        let updated = board.update_goal(id, &form).await.unwrap();

        assert_eq!(updated.title, "Walk 20 minutes");
        assert_eq!(updated.description.as_deref(), Some("after lunch"));
        assert_eq!(board.goal(id).unwrap().title, "Walk 20 minutes");
        assert!(board.editing_goal().is_none());
    }

    #[tokio::test]
    async fn test_update_without_changes_skips_store() {
        let owner = Uuid::new_v4();
        let goal = stored_goal(owner, "Walk", GoalStatus::InProgress, 0);
        let id = goal.id;
        let mut store = mock_with_goals(vec![goal.clone()]);
        store.expect_update().never();
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        let unchanged = board
            .update_goal(id, &GoalForm::from_goal(&goal))
            .await
            .unwrap();
        assert_eq!(unchanged.title, "Walk");
        assert!(board.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_update_can_change_status() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::NotStarted)]).await;
        let form = GoalForm::from_goal(board.goal(ids[0]).unwrap()).with_status(GoalStatus::Achieved);

        board.update_goal(ids[0], &form).await.unwrap();

        assert_eq!(board.goal(ids[0]).unwrap().status, GoalStatus::Achieved);
        assert_eq!(board.store().all_goals()[0].status, GoalStatus::Achieved);
    }

    #[tokio::test]
    async fn test_cancelled_delete_makes_no_store_call() {
        let owner = Uuid::new_v4();
        let goal = stored_goal(owner, "C", GoalStatus::NotStarted, 0);
        let id = goal.id;
        let mut store = mock_with_goals(vec![goal]);
        store.expect_delete().never();
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        let asked = Cell::new(false);
        let outcome = board
            .delete_goal(id, &|prompt: &str| {
                asked.set(true);
                assert_eq!(prompt, DELETE_PROMPT);
                false
            })
            .await
            .unwrap();

        assert!(asked.get());
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(board.goal(id).is_some());
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_goal() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::NotStarted), ("B", GoalStatus::Achieved)]).await;

        let outcome = board.delete_goal(ids[0], &Preconfirmed(true)).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(board.goal(ids[0]).is_none());
        assert_eq!(board.store().all_goals().len(), 1);
        assert_eq!(board.take_notifications()[0].kind, NoticeKind::GoalDeleted);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_goal_and_notifies() {
        let owner = Uuid::new_v4();
        let goal = stored_goal(owner, "A", GoalStatus::NotStarted, 0);
        let id = goal.id;
        let mut store = mock_with_goals(vec![goal]);
        store
            .expect_delete()
            .times(1)
            .returning(|_, id| Err(GoalsError::NotFound(format!("Goal {}", id))));
        let mut board = BoardController::new(store, BoardContext::new(owner));
        board.load().await;

        let result = board.delete_goal(id, &Preconfirmed(true)).await;

        assert!(matches!(result, Err(GoalsError::NotFound(_))));
        assert!(board.goal(id).is_some());
        assert_eq!(board.take_notifications()[0].kind, NoticeKind::DeleteFailed);
    }

    #[tokio::test]
    async fn test_add_from_template_forces_first_column() {
        let (mut board, _) = board_with(&[("A", GoalStatus::Achieved)]).await;
        let template = GoalTemplate {
            id: Some(Uuid::new_v4()),
            ..GoalTemplate::new("Stretch", GoalCategory::Sport, "Morning stretch")
        };

        let goal = board.add_from_template(&template).await.unwrap();

        assert_eq!(goal.status, GoalStatus::NotStarted);
        assert_eq!(goal.order_position, 1);
        assert_eq!(goal.predefined_goal_id, template.id);
        assert!(goal.is_from_predefined());
        assert_eq!(board.columns()[0].count(), 1);
        assert_eq!(board.take_notifications()[0].kind, NoticeKind::TemplateAdded);
    }

    #[tokio::test]
    async fn test_templates_include_stored_ones() {
        let store = InMemoryGoalStore::new();
        store.add_template(GoalTemplate::new("Coach pick", GoalCategory::Other, "From your coach"));
        let board = BoardController::new(store, BoardContext::new(Uuid::new_v4()));

        let templates = board.templates().await;
        assert_eq!(templates.len(), builtin_templates().len() + 1);
        assert_eq!(templates.last().unwrap().title, "Coach pick");
    }

    #[tokio::test]
    async fn test_begin_edit_tracks_goal() {
        let (mut board, ids) = board_with(&[("A", GoalStatus::NotStarted)]).await;
        assert_eq!(board.begin_edit(ids[0]).map(|g| g.id), Some(ids[0]));
        assert_eq!(board.editing_goal().map(|g| g.id), Some(ids[0]));
        board.end_edit();
        assert!(board.editing_goal().is_none());
        assert!(board.begin_edit(Uuid::new_v4()).is_none());
    }
}
