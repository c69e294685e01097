//! Drag reconciliation for the goal board.
//!
//! Pure list operations mapping a hover or drop onto the flat, ordered goal
//! list. Column membership is derived from `status`, so moving a card between
//! columns is a status reassignment plus a splice in the flat list. None of
//! this touches the store; `BoardController` decides what gets persisted.

use serde::{Deserialize, Serialize};

use crate::goal::{Goal, GoalId, GoalStatus};

/// What the pointer is over: another card, or a column's empty area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DropTarget {
    Card(GoalId),
    Column(GoalStatus),
}

/// Removes the item at `from` and inserts it at `to`. `to` is clamped to the
/// end of the shortened list.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

fn index_of(goals: &[Goal], id: GoalId) -> Option<usize> {
    goals.iter().position(|g| g.id == id)
}

/// Applies one hover event. Returns whether the list changed.
///
/// - Card in another column: the dragged goal takes that column's status and
///   is moved to `over_index - 1`, the hovered card's index taken before the
///   move. Hovering the first goal of the list moves it to the top.
/// - Card in the same column: classic sortable move to the hovered card's index.
/// - Column area: status reassignment only, order untouched.
pub fn apply_drag_over(goals: &mut Vec<Goal>, dragged: GoalId, target: DropTarget) -> bool {
    let Some(active_index) = index_of(goals, dragged) else {
        return false;
    };

    match target {
        DropTarget::Card(over_id) => {
            if over_id == dragged {
                return false;
            }
            let Some(over_index) = index_of(goals, over_id) else {
                return false;
            };

            let over_status = goals[over_index].status;
            if goals[active_index].status != over_status {
                goals[active_index].status = over_status;
                // Splice one slot above the hovered card's pre-move index, saturating at the top
                array_move(goals, active_index, over_index.saturating_sub(1));
            } else {
                array_move(goals, active_index, over_index);
            }
            true
        }
        DropTarget::Column(status) => {
            let goal = &mut goals[active_index];
            if goal.status == status {
                return false;
            }
            goal.status = status;
            true
        }
    }
}

/// Status the dragged goal ends up with when released over `target`.
///
/// A drop outside any target keeps whatever status the hover events left.
/// Returns `None` when the dragged goal is not on the board.
pub fn resolve_drop_status(
    goals: &[Goal],
    dragged: GoalId,
    target: Option<DropTarget>,
) -> Option<GoalStatus> {
    let current = goals.iter().find(|g| g.id == dragged)?.status;
    let status = match target {
        Some(DropTarget::Column(status)) => status,
        Some(DropTarget::Card(over_id)) => goals
            .iter()
            .find(|g| g.id == over_id)
            .map(|g| g.status)
            .unwrap_or(current),
        None => current,
    };
    Some(status)
}
