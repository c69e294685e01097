pub mod board;
pub mod confirm;
pub mod drag;
pub mod field_update;
pub mod goal;
pub mod input;
pub mod notification;
pub mod store;
pub mod template;
pub mod view;

pub use board::{BoardContext, BoardController, DeleteOutcome, DragOutcome, RollbackPolicy};
pub use confirm::{Confirm, Preconfirmed, DELETE_PROMPT};
pub use drag::DropTarget;
pub use field_update::FieldUpdate;
pub use goal::{Goal, GoalCategory, GoalId, GoalPatch, GoalStatus, NewGoal, OwnerId, TemplateId};
pub use input::{GoalForm, ValidGoal};
pub use notification::{NoticeKind, NoticeLevel, Notification};
pub use store::{goal_not_found, GoalStore, InMemoryGoalStore};
pub use template::{builtin_templates, GoalTemplate};
pub use view::{BadgeColor, BadgeIcon, CardIntent, CardRegion, CardView, CategoryBadge, ColumnView};
